//! Per-segment earnings calculation.
//!
//! This module resolves a segment's fare class under a program, computes its
//! earnings and records the decision as an [`EarningLine`] and an audit step.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EarningProgram;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, EarningLine, FlightSegment, RoundingPolicy};

use super::compute_earnings;

/// The result of calculating one segment, including the line and audit step.
#[derive(Debug, Clone)]
pub struct SegmentEarningsResult {
    /// The earnings for the segment (after rounding).
    pub line: EarningLine,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the earnings for one flight segment.
///
/// # Arguments
///
/// * `segment` - The flown segment
/// * `program` - The earning program the segment is credited to
/// * `elite_bonus` - The traveler's elite bonus fraction
/// * `rounding` - How the segment's totals are rounded
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns an `InvalidInput` error naming the segment if its airline or fare
/// class is not part of the program, or any error from
/// [`compute_earnings`](super::compute_earnings).
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::calculate_segment_earnings;
/// use earnings_engine::config::ConfigLoader;
/// use earnings_engine::models::{FlightSegment, RoundingPolicy};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let program = loader.get_program("alaska").unwrap();
/// let segment = FlightSegment {
///     id: "seg_001".to_string(),
///     airline: "AS".to_string(),
///     fare_class: "X".to_string(),
///     distance: Decimal::from(1000),
///     origin: None,
///     destination: None,
/// };
///
/// let result = calculate_segment_earnings(&segment, program, Decimal::ZERO, RoundingPolicy::HalfUp, 1).unwrap();
/// assert_eq!(result.line.status_points, Decimal::from(300));
/// ```
pub fn calculate_segment_earnings(
    segment: &FlightSegment,
    program: &EarningProgram,
    elite_bonus: Decimal,
    rounding: RoundingPolicy,
    step_number: u32,
) -> EngineResult<SegmentEarningsResult> {
    let airline = program.airline(&segment.airline).ok_or_else(|| {
        EngineError::invalid_input(
            format!("segments[{}].airline", segment.id),
            format!(
                "airline '{}' does not earn under program '{}'",
                segment.airline, program.id
            ),
        )
    })?;

    let fare_class = airline.fare_class(&segment.fare_class).ok_or_else(|| {
        EngineError::invalid_input(
            format!("segments[{}].fare_class", segment.id),
            format!(
                "fare class '{}' is not defined for airline '{}'",
                segment.fare_class, segment.airline
            ),
        )
    })?;

    let exact = compute_earnings(segment.distance, &fare_class.rate, elite_bonus).map_err(
        |err| match err {
            EngineError::InvalidInput { field, message } => EngineError::InvalidInput {
                field: format!("segments[{}].{}", segment.id, field),
                message,
            },
            other => other,
        },
    )?;
    let earnings = exact.rounded(rounding);

    debug!(
        segment_id = %segment.id,
        airline = %segment.airline,
        fare_class = %segment.fare_class,
        distance = %segment.distance,
        status_points = %earnings.status_points,
        redeemable_miles = %earnings.redeemable_miles,
        "Segment earnings calculated"
    );

    let rate = fare_class.rate;
    let audit_step = AuditStep {
        step_number,
        rule_id: "segment_earnings".to_string(),
        rule_name: "Segment Earnings".to_string(),
        rule_ref: format!("{}/{}/{}", program.id, airline.code, fare_class.code),
        input: serde_json::json!({
            "segment_id": segment.id,
            "route": segment.route(),
            "distance": segment.distance.normalize().to_string(),
            "fare_class_total": rate.total.normalize().to_string(),
            "elite_bonus": elite_bonus.normalize().to_string()
        }),
        output: serde_json::json!({
            "status_points": earnings.status_points.normalize().to_string(),
            "redeemable_miles": earnings.redeemable_miles.normalize().to_string(),
            "exact_status_points": exact.status_points.normalize().to_string(),
            "exact_redeemable_miles": exact.redeemable_miles.normalize().to_string(),
            "rounding": rounding
        }),
        reasoning: format!(
            "{} x {} = {} status points; {} + {} x {} = {} redeemable miles ({})",
            segment.distance.normalize(),
            rate.total.normalize(),
            exact.status_points.normalize(),
            exact.status_points.normalize(),
            segment.distance.normalize(),
            elite_bonus.normalize(),
            exact.redeemable_miles.normalize(),
            fare_class.name
        ),
    };

    let line = EarningLine {
        segment_id: segment.id.clone(),
        airline: airline.code.clone(),
        fare_class: fare_class.code.clone(),
        cabin: fare_class.cabin.clone(),
        distance: segment.distance,
        fare_class_total: rate.total,
        elite_bonus,
        status_points: earnings.status_points,
        redeemable_miles: earnings.redeemable_miles,
    };

    Ok(SegmentEarningsResult { line, audit_step })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::Cabin;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn program() -> EarningProgram {
        ConfigLoader::builtin()
            .unwrap()
            .get_program("alaska")
            .unwrap()
            .clone()
    }

    fn create_segment(airline: &str, fare_class: &str, distance: &str) -> FlightSegment {
        FlightSegment {
            id: "seg_001".to_string(),
            airline: airline.to_string(),
            fare_class: fare_class.to_string(),
            distance: dec(distance),
            origin: Some("SEA".to_string()),
            destination: Some("SFO".to_string()),
        }
    }

    #[test]
    fn test_alaska_y_gold_line() {
        let segment = create_segment("AS", "Y", "1000");
        let result =
            calculate_segment_earnings(&segment, &program(), dec("0.50"), RoundingPolicy::HalfUp, 3)
                .unwrap();

        assert_eq!(result.line.status_points, dec("1500"));
        assert_eq!(result.line.redeemable_miles, dec("2000"));
        assert_eq!(result.line.cabin, Cabin::Economy);
        assert_eq!(result.line.fare_class_total, dec("1.50"));
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_ref, "alaska/AS/Y");
        assert_eq!(result.audit_step.input["route"].as_str().unwrap(), "SEA-SFO");
    }

    #[test]
    fn test_reasoning_explains_calculation() {
        let segment = create_segment("PARTNER_VIA_AS", "F_INTL", "5000");
        let result = calculate_segment_earnings(
            &segment,
            &program(),
            dec("1.50"),
            RoundingPolicy::HalfUp,
            1,
        )
        .unwrap();

        assert_eq!(
            result.audit_step.reasoning,
            "5000 x 3.5 = 17500 status points; 17500 + 5000 x 1.5 = 25000 redeemable miles (Int'l First (350%))"
        );
    }

    #[test]
    fn test_rounding_is_applied_to_line() {
        let segment = create_segment("AS", "H", "299");
        let result = calculate_segment_earnings(
            &segment,
            &program(),
            dec("0.25"),
            RoundingPolicy::HalfUp,
            1,
        )
        .unwrap();

        // 299 x 1.25 = 373.75; 373.75 + 74.75 = 448.5
        assert_eq!(result.line.status_points, dec("374"));
        assert_eq!(result.line.redeemable_miles, dec("449"));
        assert_eq!(
            result.audit_step.output["exact_redeemable_miles"]
                .as_str()
                .unwrap(),
            "448.5"
        );
    }

    #[test]
    fn test_exact_rounding_keeps_fraction() {
        let segment = create_segment("AS", "H", "299");
        let result =
            calculate_segment_earnings(&segment, &program(), dec("0.25"), RoundingPolicy::Exact, 1)
                .unwrap();

        assert_eq!(result.line.status_points, dec("373.75"));
        assert_eq!(result.line.redeemable_miles, dec("448.5"));
    }

    #[test]
    fn test_unknown_airline_names_segment() {
        let segment = create_segment("ZZ", "Y", "1000");
        let result =
            calculate_segment_earnings(&segment, &program(), dec("0"), RoundingPolicy::HalfUp, 1);

        match result {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "segments[seg_001].airline");
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_fare_class_names_segment() {
        let segment = create_segment("AS", "F_INTL", "1000");
        let result =
            calculate_segment_earnings(&segment, &program(), dec("0"), RoundingPolicy::HalfUp, 1);

        match result {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "segments[seg_001].fare_class");
                assert!(message.contains("F_INTL"));
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_distance_names_segment() {
        let segment = create_segment("AS", "Y", "-10");
        let result =
            calculate_segment_earnings(&segment, &program(), dec("0"), RoundingPolicy::HalfUp, 1);

        match result {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "segments[seg_001].distance");
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }
}
