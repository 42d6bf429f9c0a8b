//! Configuration types for earning rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML rule files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Cabin, RoundingPolicy};

/// Metadata about the rule set.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesMetadata {
    /// The version of the rule set (e.g., "1.0.0").
    pub version: String,
    /// When the rates were last checked against the published source.
    pub last_updated: NaiveDate,
    /// URL to the published earning chart.
    pub source_url: String,
}

/// Calculation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculationSettings {
    /// How earned totals are rounded.
    #[serde(default)]
    pub rounding: RoundingPolicy,
}

/// `rules.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RulesFile {
    #[serde(flatten)]
    pub metadata: RulesMetadata,
    #[serde(default)]
    pub settings: CalculationSettings,
}

/// Multipliers applied to the base distance for a fare class.
///
/// `total` is the combined multiplier used for earning and must equal
/// `base + bonus`.
///
/// # Example
///
/// ```
/// use earnings_engine::config::FareClassRate;
/// use rust_decimal::Decimal;
///
/// let rate = FareClassRate::new(Decimal::new(100, 2), Decimal::new(50, 2));
/// assert_eq!(rate.total, Decimal::new(150, 2));
/// assert!(rate.is_consistent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareClassRate {
    /// The base multiplier.
    pub base: Decimal,
    /// The fare-class bonus multiplier.
    pub bonus: Decimal,
    /// The combined multiplier.
    pub total: Decimal,
}

impl FareClassRate {
    /// Creates a rate whose total is `base + bonus`.
    pub fn new(base: Decimal, bonus: Decimal) -> Self {
        Self {
            base,
            bonus,
            total: base + bonus,
        }
    }

    /// Returns true if all components are non-negative and `total == base + bonus`.
    pub fn is_consistent(&self) -> bool {
        self.problem().is_none()
    }

    /// Describes the first inconsistency in the rate, if any.
    pub(crate) fn problem(&self) -> Option<String> {
        for (name, value) in [("base", self.base), ("bonus", self.bonus), ("total", self.total)] {
            if value < Decimal::ZERO {
                return Some(format!("{} multiplier {} is negative", name, value));
            }
        }

        match self.base.checked_add(self.bonus) {
            Some(sum) if sum == self.total => None,
            Some(sum) => Some(format!(
                "total {} does not equal base + bonus {}",
                self.total, sum
            )),
            None => Some("base + bonus overflows".to_string()),
        }
    }
}

/// A bookable fare class of an airline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareClass {
    /// The fare class code (e.g., "Y", "F_INTL").
    pub code: String,
    /// The earning multipliers.
    #[serde(flatten)]
    pub rate: FareClassRate,
    /// The cabin this fare class is sold in.
    pub cabin: Cabin,
    /// The display name (e.g., "Y - Econ Full Fare (150%)").
    pub name: String,
}

/// An airline whose flights earn under a program.
#[derive(Debug, Clone, Deserialize)]
pub struct Airline {
    /// The airline code (e.g., "AS").
    pub code: String,
    /// The display name.
    pub name: String,
    /// Where the flight must be booked to earn at these rates.
    pub booking_channel: String,
    /// Fare classes, in the order they appear in the rule file.
    pub fare_classes: Vec<FareClass>,
}

impl Airline {
    /// Gets a fare class by its code.
    pub fn fare_class(&self, code: &str) -> Option<&FareClass> {
        self.fare_classes.iter().find(|fc| fc.code == code)
    }
}

/// An elite tier of a program.
#[derive(Debug, Clone, Deserialize)]
pub struct EliteTier {
    /// The display name (e.g., "Gold").
    pub name: String,
    /// The bonus fraction applied to base distance for redeemable miles.
    pub bonus: Decimal,
}

/// Human-readable descriptions of how a program computes earnings.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculationRules {
    /// How status points are computed.
    pub status_points: String,
    /// How redeemable miles are computed.
    pub redeemable_miles: String,
}

/// A frequent-flyer earning program.
#[derive(Debug, Clone, Deserialize)]
pub struct EarningProgram {
    /// The program id (e.g., "alaska").
    pub id: String,
    /// The display name.
    pub name: String,
    /// The earning currency (e.g., "miles").
    pub currency: String,
    /// Descriptions of the earning formulas.
    pub calculation_rules: CalculationRules,
    /// Map of tier id to elite tier.
    pub elite_tiers: HashMap<String, EliteTier>,
    /// Map of airline code to airline.
    pub airlines: HashMap<String, Airline>,
}

impl EarningProgram {
    /// Gets an airline by its code.
    pub fn airline(&self, code: &str) -> Option<&Airline> {
        self.airlines.get(code)
    }

    /// Gets the elite bonus fraction for a tier.
    pub fn elite_bonus(&self, tier: &str) -> Option<Decimal> {
        self.elite_tiers.get(tier).map(|t| t.bonus)
    }
}

/// An airport in the reference table.
///
/// Coordinates are provided for an external distance function; this crate
/// does not compute distances.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Airport {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// The display name.
    pub name: String,
}

/// `airports.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AirportsFile {
    pub airports: HashMap<String, Airport>,
}

/// The complete earning rules loaded from YAML files.
#[derive(Debug, Clone)]
pub struct RulesConfig {
    metadata: RulesMetadata,
    settings: CalculationSettings,
    programs: HashMap<String, EarningProgram>,
    airports: HashMap<String, Airport>,
}

impl RulesConfig {
    /// Creates a new RulesConfig from its component parts.
    ///
    /// Program ids must be unique; `ConfigLoader` checks this before calling.
    pub(crate) fn new(
        metadata: RulesMetadata,
        settings: CalculationSettings,
        programs: Vec<EarningProgram>,
        airports: HashMap<String, Airport>,
    ) -> Self {
        let programs = programs.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            metadata,
            settings,
            programs,
            airports,
        }
    }

    /// Returns the rule set metadata.
    pub fn metadata(&self) -> &RulesMetadata {
        &self.metadata
    }

    /// Returns the calculation settings.
    pub fn settings(&self) -> &CalculationSettings {
        &self.settings
    }

    /// Returns all programs keyed by id.
    pub fn programs(&self) -> &HashMap<String, EarningProgram> {
        &self.programs
    }

    /// Gets a program by its id.
    pub fn program(&self, id: &str) -> Option<&EarningProgram> {
        self.programs.get(id)
    }

    /// Returns the airport reference table.
    pub fn airports(&self) -> &HashMap<String, Airport> {
        &self.airports
    }
}
