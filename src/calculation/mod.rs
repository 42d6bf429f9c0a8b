//! Calculation logic for the Earnings Engine.
//!
//! This module contains the earnings rule itself, fare class rate lookup,
//! cabin grouping for display, elite bonus lookup, per-segment earnings and
//! the itinerary calculation that combines them into a report.

mod cabin_grouping;
mod earnings;
mod elite_bonus;
mod itinerary;
mod rate_lookup;
mod segment_earnings;

pub use cabin_grouping::{CabinGroup, group_fare_classes_by_cabin, list_cabins};
pub use earnings::compute_earnings;
pub use elite_bonus::{EliteBonusLookupResult, resolve_elite_bonus};
pub use itinerary::calculate_itinerary;
pub use rate_lookup::{get_fare_class_table, get_rate};
pub use segment_earnings::{SegmentEarningsResult, calculate_segment_earnings};
