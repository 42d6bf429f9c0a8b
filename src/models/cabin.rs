//! Cabin classification for fare classes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The cabin a fare class is sold in.
///
/// The five standard cabins have a fixed display order and display name.
/// Any other identifier found in a rule file is kept verbatim in
/// [`Cabin::Other`] and displays as its raw identifier.
///
/// # Example
///
/// ```
/// use earnings_engine::models::Cabin;
///
/// assert_eq!(Cabin::from("premium_economy"), Cabin::PremiumEconomy);
/// assert_eq!(Cabin::PremiumEconomy.display_name(), "Premium Economy");
/// assert_eq!(Cabin::from("lie_flat").display_name(), "lie_flat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Cabin {
    /// First class.
    First,
    /// Business class.
    Business,
    /// Premium economy.
    PremiumEconomy,
    /// Economy.
    Economy,
    /// Deep-discount saver fares.
    Saver,
    /// Any cabin identifier without a standard display name.
    Other(String),
}

impl Cabin {
    /// The standard cabins in display order.
    pub const DISPLAY_ORDER: [Cabin; 5] = [
        Cabin::First,
        Cabin::Business,
        Cabin::PremiumEconomy,
        Cabin::Economy,
        Cabin::Saver,
    ];

    /// Returns the identifier used in rule files.
    pub fn as_str(&self) -> &str {
        match self {
            Cabin::First => "first",
            Cabin::Business => "business",
            Cabin::PremiumEconomy => "premium_economy",
            Cabin::Economy => "economy",
            Cabin::Saver => "saver",
            Cabin::Other(id) => id,
        }
    }

    /// Returns the human-readable cabin name.
    ///
    /// Non-standard cabins fall back to their raw identifier.
    pub fn display_name(&self) -> &str {
        match self {
            Cabin::First => "First Class",
            Cabin::Business => "Business Class",
            Cabin::PremiumEconomy => "Premium Economy",
            Cabin::Economy => "Economy",
            Cabin::Saver => "Saver",
            Cabin::Other(id) => id,
        }
    }

    /// Returns the position of this cabin in [`Cabin::DISPLAY_ORDER`],
    /// or `None` for non-standard cabins.
    pub fn display_rank(&self) -> Option<usize> {
        Self::DISPLAY_ORDER.iter().position(|c| c == self)
    }

    /// Returns true if the cabin has a standard display name.
    pub fn is_standard(&self) -> bool {
        !matches!(self, Cabin::Other(_))
    }
}

impl From<&str> for Cabin {
    fn from(id: &str) -> Self {
        match id {
            "first" => Cabin::First,
            "business" => Cabin::Business,
            "premium_economy" => Cabin::PremiumEconomy,
            "economy" => Cabin::Economy,
            "saver" => Cabin::Saver,
            other => Cabin::Other(other.to_string()),
        }
    }
}

impl From<String> for Cabin {
    fn from(id: String) -> Self {
        Cabin::from(id.as_str())
    }
}

impl From<Cabin> for String {
    fn from(cabin: Cabin) -> Self {
        match cabin {
            Cabin::Other(id) => id,
            standard => standard.as_str().to_string(),
        }
    }
}

impl fmt::Display for Cabin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
