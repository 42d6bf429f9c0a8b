//! Earnings report models for the Earnings Engine.
//!
//! This module contains the [`EarningsReport`] type and its associated structures
//! that capture all outputs from an itinerary calculation, including per-segment
//! earning lines, totals, and audit traces.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cabin;
use crate::error::{EngineError, EngineResult};

/// Represents the earnings for a single flight segment.
///
/// # Example
///
/// ```
/// use earnings_engine::models::{Cabin, EarningLine};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let line = EarningLine {
///     segment_id: "seg_001".to_string(),
///     airline: "AS".to_string(),
///     fare_class: "Y".to_string(),
///     cabin: Cabin::Economy,
///     distance: Decimal::from(1000),
///     fare_class_total: Decimal::from_str("1.50").unwrap(),
///     elite_bonus: Decimal::from_str("0.50").unwrap(),
///     status_points: Decimal::from(1500),
///     redeemable_miles: Decimal::from(2000),
/// };
/// assert_eq!(line.elite_bonus_miles(), Decimal::from(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningLine {
    /// The ID of the segment this line was earned on.
    pub segment_id: String,
    /// The airline code the fare class was looked up under.
    pub airline: String,
    /// The fare class code.
    pub fare_class: String,
    /// The cabin of the fare class.
    pub cabin: Cabin,
    /// The flown base distance.
    pub distance: Decimal,
    /// The combined base + bonus multiplier of the fare class.
    pub fare_class_total: Decimal,
    /// The elite bonus fraction applied to the base distance.
    pub elite_bonus: Decimal,
    /// Status points earned (after rounding).
    pub status_points: Decimal,
    /// Redeemable miles earned (after rounding).
    pub redeemable_miles: Decimal,
}

impl EarningLine {
    /// The redeemable miles contributed by the elite bonus.
    pub fn elite_bonus_miles(&self) -> Decimal {
        self.redeemable_miles - self.status_points
    }
}

/// Aggregated totals for an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsTotals {
    /// Total flown base distance.
    pub distance: Decimal,
    /// Total status points.
    pub status_points: Decimal,
    /// Total redeemable miles.
    pub redeemable_miles: Decimal,
    /// Redeemable miles contributed by the elite bonus.
    pub elite_bonus_miles: Decimal,
}

impl EarningsTotals {
    /// Sums a set of earning lines.
    ///
    /// Returns a `CalculationError` if any total overflows.
    pub fn from_lines(lines: &[EarningLine]) -> EngineResult<Self> {
        let distance = checked_sum(lines, "total distance", |l| l.distance)?;
        let status_points = checked_sum(lines, "total status points", |l| l.status_points)?;
        let redeemable_miles =
            checked_sum(lines, "total redeemable miles", |l| l.redeemable_miles)?;

        Ok(Self {
            distance,
            status_points,
            redeemable_miles,
            elite_bonus_miles: redeemable_miles - status_points,
        })
    }
}

fn checked_sum(
    lines: &[EarningLine],
    what: &str,
    value: impl Fn(&EarningLine) -> Decimal,
) -> EngineResult<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(value(line)))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("{} overflowed", what),
        })
}

/// One recorded decision of an itinerary calculation.
///
/// The first step of a report resolves the elite bonus; every later step
/// prices one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// Position in the trace, starting at 1.
    pub step_number: u32,
    /// Machine id of the rule (`elite_bonus_lookup` or `segment_earnings`).
    pub rule_id: String,
    /// Display name of the rule.
    pub rule_name: String,
    /// Path into the rule set the values were read from: `program/airline/fare`
    /// for segments, `program/elite_tiers/tier` for the bonus lookup.
    pub rule_ref: String,
    /// Values the rule read, decimals as strings.
    pub input: serde_json::Value,
    /// Values the rule produced, decimals as strings.
    pub output: serde_json::Value,
    /// The arithmetic spelled out, e.g. `1000 x 1.5 = 1500 status points; ...`.
    pub reasoning: String,
}

/// Something worth flagging about an itinerary that did not change its
/// earnings, such as an airport missing from the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// Warning kind, e.g. `UNKNOWN_AIRPORT`.
    pub code: String,
    /// Names the segment and value that triggered the warning.
    pub message: String,
    /// `low` for reference-data gaps.
    pub severity: String,
}

/// How a report's earnings were reached.
///
/// # Example
///
/// ```
/// use earnings_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 42,
/// };
/// assert!(trace.warnings.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// Elite bonus step followed by one step per segment.
    pub steps: Vec<AuditStep>,
    /// Non-fatal findings.
    pub warnings: Vec<AuditWarning>,
    /// Wall-clock time spent on the calculation, in microseconds.
    pub duration_us: u64,
}

/// The complete result of an itinerary calculation.
///
/// # Example
///
/// ```
/// use earnings_engine::models::{AuditTrace, EarningsReport, EarningsTotals, RoundingPolicy};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let report = EarningsReport {
///     calculation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     rules_version: "1.0.0".to_string(),
///     program: "alaska".to_string(),
///     tier: "none".to_string(),
///     rounding: RoundingPolicy::HalfUp,
///     lines: vec![],
///     totals: EarningsTotals::from_lines(&[]).unwrap(),
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// assert_eq!(report.totals.status_points, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The version of the earning rules used.
    pub rules_version: String,
    /// The earning program id.
    pub program: String,
    /// The elite tier id.
    pub tier: String,
    /// The rounding policy applied to each line.
    pub rounding: super::RoundingPolicy,
    /// Per-segment earnings.
    pub lines: Vec<EarningLine>,
    /// Aggregated totals.
    pub totals: EarningsTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
