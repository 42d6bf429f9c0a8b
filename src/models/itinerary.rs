//! Itinerary and flight segment models.
//!
//! This module defines the [`Itinerary`] and [`FlightSegment`] types that
//! describe the flights a traveler wants earnings calculated for.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RoundingPolicy;

/// A single flown segment.
///
/// The distance is supplied by the caller in the program's base unit; the
/// airport codes are informational and are only checked against the airport
/// reference table.
///
/// # Example
///
/// ```
/// use earnings_engine::models::FlightSegment;
/// use rust_decimal::Decimal;
///
/// let segment = FlightSegment {
///     id: "seg_001".to_string(),
///     airline: "AS".to_string(),
///     fare_class: "Y".to_string(),
///     distance: Decimal::from(1000),
///     origin: Some("SEA".to_string()),
///     destination: Some("SFO".to_string()),
/// };
/// assert_eq!(segment.route(), "SEA-SFO");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSegment {
    /// Unique identifier for the segment.
    pub id: String,
    /// The operating airline code (e.g., "AS", "PARTNER_VIA_AS").
    pub airline: String,
    /// The booked fare class code (e.g., "Y", "F_INTL").
    pub fare_class: String,
    /// The flown distance before any multiplier.
    pub distance: Decimal,
    /// Origin airport code.
    #[serde(default)]
    pub origin: Option<String>,
    /// Destination airport code.
    #[serde(default)]
    pub destination: Option<String>,
}

impl FlightSegment {
    /// Returns the route as `ORIGIN-DESTINATION`, using `?` for missing codes.
    pub fn route(&self) -> String {
        format!(
            "{}-{}",
            self.origin.as_deref().unwrap_or("?"),
            self.destination.as_deref().unwrap_or("?")
        )
    }
}

/// A set of segments flown under one earning program at one elite tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// The earning program id (e.g., "alaska").
    pub program: String,
    /// The traveler's elite tier id (e.g., "none", "gold").
    pub tier: String,
    /// The flown segments.
    pub segments: Vec<FlightSegment>,
    /// Overrides the configured rounding policy when set.
    #[serde(default)]
    pub rounding: Option<RoundingPolicy>,
}
