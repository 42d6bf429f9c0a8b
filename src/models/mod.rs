//! Core data models for the Earnings Engine.
//!
//! This module contains the domain models used throughout the engine.

mod cabin;
mod earnings;
mod earnings_report;
mod itinerary;

pub use cabin::Cabin;
pub use earnings::{Earnings, RoundingPolicy};
pub use earnings_report::{
    AuditStep, AuditTrace, AuditWarning, EarningLine, EarningsReport, EarningsTotals,
};
pub use itinerary::{FlightSegment, Itinerary};
