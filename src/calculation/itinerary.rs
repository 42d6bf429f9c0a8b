//! Itinerary earnings calculation.
//!
//! Combines the elite bonus lookup and per-segment earnings into a single
//! [`EarningsReport`] with totals and an audit trace.

use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, EarningLine, EarningsReport, EarningsTotals, Itinerary,
};

use super::{calculate_segment_earnings, resolve_elite_bonus};

/// Calculates the earnings of every segment of an itinerary.
///
/// The rounding policy is the itinerary's override when present, otherwise
/// the configured default. Each segment is rounded on its own and the
/// totals are the sums of the rounded segments.
///
/// Airport codes that are not in the reference table produce an
/// `UNKNOWN_AIRPORT` warning; they do not stop the calculation.
///
/// # Returns
///
/// Returns an `InvalidInput` error if the program or tier is unknown, or if
/// any segment cannot be calculated. Returns a `CalculationError` if the
/// itinerary totals overflow.
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::calculate_itinerary;
/// use earnings_engine::config::ConfigLoader;
/// use earnings_engine::models::{FlightSegment, Itinerary};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let itinerary = Itinerary {
///     program: "alaska".to_string(),
///     tier: "gold".to_string(),
///     segments: vec![FlightSegment {
///         id: "seg_001".to_string(),
///         airline: "AS".to_string(),
///         fare_class: "Y".to_string(),
///         distance: Decimal::from(1000),
///         origin: Some("SEA".to_string()),
///         destination: Some("SFO".to_string()),
///     }],
///     rounding: None,
/// };
///
/// let report = calculate_itinerary(&itinerary, &loader).unwrap();
/// assert_eq!(report.totals.status_points, Decimal::from(1500));
/// assert_eq!(report.totals.redeemable_miles, Decimal::from(2000));
/// ```
pub fn calculate_itinerary(
    itinerary: &Itinerary,
    config: &ConfigLoader,
) -> EngineResult<EarningsReport> {
    let start_time = Instant::now();
    let calculation_id = Uuid::new_v4();
    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut lines: Vec<EarningLine> = Vec::with_capacity(itinerary.segments.len());
    let mut step_number: u32 = 1;

    let program = config.get_program(&itinerary.program).ok_or_else(|| {
        EngineError::invalid_input(
            "program",
            format!("unknown program '{}'", itinerary.program),
        )
    })?;

    let rounding = itinerary.rounding.unwrap_or(config.settings().rounding);

    let bonus_result = resolve_elite_bonus(program, &itinerary.tier, step_number)?;
    let elite_bonus = bonus_result.bonus;
    audit_steps.push(bonus_result.audit_step);
    step_number += 1;

    for segment in &itinerary.segments {
        for code in [&segment.origin, &segment.destination].into_iter().flatten() {
            if config.get_airport(code).is_none() {
                warn!(
                    calculation_id = %calculation_id,
                    segment_id = %segment.id,
                    airport = %code,
                    "Airport not in reference table"
                );
                warnings.push(AuditWarning {
                    code: "UNKNOWN_AIRPORT".to_string(),
                    message: format!(
                        "Segment '{}': airport '{}' is not in the reference table",
                        segment.id, code
                    ),
                    severity: "low".to_string(),
                });
            }
        }

        let segment_result =
            calculate_segment_earnings(segment, program, elite_bonus, rounding, step_number)?;
        lines.push(segment_result.line);
        audit_steps.push(segment_result.audit_step);
        step_number += 1;
    }

    let totals = EarningsTotals::from_lines(&lines)?;
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        calculation_id = %calculation_id,
        program = %program.id,
        tier = %itinerary.tier,
        segments = lines.len(),
        status_points = %totals.status_points,
        redeemable_miles = %totals.redeemable_miles,
        duration_us = duration_us,
        "Itinerary earnings calculated"
    );

    Ok(EarningsReport {
        calculation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        rules_version: config.metadata().version.clone(),
        program: program.id.clone(),
        tier: itinerary.tier.clone(),
        rounding,
        lines,
        totals,
        audit_trace: AuditTrace {
            steps: audit_steps,
            warnings,
            duration_us,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlightSegment, RoundingPolicy};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn loader() -> ConfigLoader {
        ConfigLoader::builtin().unwrap()
    }

    fn create_segment(
        id: &str,
        airline: &str,
        fare_class: &str,
        distance: &str,
        route: (&str, &str),
    ) -> FlightSegment {
        FlightSegment {
            id: id.to_string(),
            airline: airline.to_string(),
            fare_class: fare_class.to_string(),
            distance: dec(distance),
            origin: Some(route.0.to_string()),
            destination: Some(route.1.to_string()),
        }
    }

    fn create_itinerary(tier: &str, segments: Vec<FlightSegment>) -> Itinerary {
        Itinerary {
            program: "alaska".to_string(),
            tier: tier.to_string(),
            segments,
            rounding: None,
        }
    }

    #[test]
    fn test_round_trip_totals() {
        let itinerary = create_itinerary(
            "gold",
            vec![
                create_segment("seg_001", "AS", "Y", "1000", ("SEA", "SFO")),
                create_segment("seg_002", "AS", "X", "1000", ("SFO", "SEA")),
            ],
        );

        let report = calculate_itinerary(&itinerary, &loader()).unwrap();

        // 1500 + 300 status points; 2000 + (300 + 500) redeemable miles
        assert_eq!(report.lines.len(), 2);
        assert_eq!(report.totals.distance, dec("2000"));
        assert_eq!(report.totals.status_points, dec("1800"));
        assert_eq!(report.totals.redeemable_miles, dec("2800"));
        assert_eq!(report.totals.elite_bonus_miles, dec("1000"));
    }

    #[test]
    fn test_report_metadata() {
        let itinerary = create_itinerary(
            "none",
            vec![create_segment("seg_001", "HA", "U", "2500", ("HNL", "LAX"))],
        );

        let report = calculate_itinerary(&itinerary, &loader()).unwrap();

        assert_eq!(report.program, "alaska");
        assert_eq!(report.tier, "none");
        assert_eq!(report.rules_version, "1.0.0");
        assert_eq!(report.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(report.rounding, RoundingPolicy::HalfUp);
    }

    #[test]
    fn test_audit_trace_has_bonus_step_then_one_step_per_segment() {
        let itinerary = create_itinerary(
            "silver",
            vec![
                create_segment("seg_001", "AS", "M", "800", ("SEA", "DEN")),
                create_segment("seg_002", "AS", "M", "800", ("DEN", "SEA")),
            ],
        );

        let report = calculate_itinerary(&itinerary, &loader()).unwrap();
        let steps = &report.audit_trace.steps;

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].rule_id, "elite_bonus_lookup");
        assert_eq!(steps[1].rule_id, "segment_earnings");
        assert_eq!(steps[2].rule_id, "segment_earnings");
        let numbers: Vec<u32> = steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_rounding_override_is_used() {
        let mut itinerary = create_itinerary(
            "silver",
            vec![create_segment("seg_001", "AS", "X", "333", ("SEA", "PDX"))],
        );
        itinerary.rounding = Some(RoundingPolicy::Exact);

        let report = calculate_itinerary(&itinerary, &loader()).unwrap();

        // 333 x 0.30 = 99.9; 99.9 + 333 x 0.25 = 183.15
        assert_eq!(report.rounding, RoundingPolicy::Exact);
        assert_eq!(report.totals.status_points, dec("99.9"));
        assert_eq!(report.totals.redeemable_miles, dec("183.15"));
    }

    #[test]
    fn test_segments_are_rounded_individually() {
        let itinerary = create_itinerary(
            "none",
            vec![
                create_segment("seg_001", "AS", "X", "5", ("SEA", "BFI")),
                create_segment("seg_002", "AS", "X", "5", ("BFI", "SEA")),
            ],
        );

        let report = calculate_itinerary(&itinerary, &loader()).unwrap();

        // each 5 x 0.30 = 1.5 rounds to 2
        assert_eq!(report.totals.status_points, dec("4"));
    }

    #[test]
    fn test_unknown_airport_is_warning_not_error() {
        let itinerary = create_itinerary(
            "none",
            vec![create_segment("seg_001", "AS", "Y", "100", ("SEA", "XXX"))],
        );

        let report = calculate_itinerary(&itinerary, &loader()).unwrap();

        assert_eq!(report.audit_trace.warnings.len(), 1);
        assert_eq!(report.audit_trace.warnings[0].code, "UNKNOWN_AIRPORT");
        assert!(report.audit_trace.warnings[0].message.contains("XXX"));
        assert_eq!(report.totals.status_points, dec("150"));
    }

    #[test]
    fn test_missing_airports_produce_no_warning() {
        let mut segment = create_segment("seg_001", "AS", "Y", "100", ("SEA", "SFO"));
        segment.origin = None;
        segment.destination = None;
        let itinerary = create_itinerary("none", vec![segment]);

        let report = calculate_itinerary(&itinerary, &loader()).unwrap();

        assert!(report.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_empty_itinerary_earns_nothing() {
        let itinerary = create_itinerary("titanium", vec![]);

        let report = calculate_itinerary(&itinerary, &loader()).unwrap();

        assert!(report.lines.is_empty());
        assert_eq!(report.totals.status_points, Decimal::ZERO);
        assert_eq!(report.totals.redeemable_miles, Decimal::ZERO);
        assert_eq!(report.audit_trace.steps.len(), 1);
    }

    #[test]
    fn test_unknown_program_is_invalid_input() {
        let mut itinerary = create_itinerary("gold", vec![]);
        itinerary.program = "mileageplan".to_string();

        match calculate_itinerary(&itinerary, &loader()) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "program"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tier_is_invalid_input() {
        let itinerary = create_itinerary("mvp", vec![]);

        match calculate_itinerary(&itinerary, &loader()) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "tier"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_total_overflow_is_calculation_error() {
        // each segment fits on its own; their sum does not
        let distance = "50000000000000000000000000000";
        let itinerary = create_itinerary(
            "none",
            vec![
                create_segment("seg_001", "AS", "M", distance, ("SEA", "SFO")),
                create_segment("seg_002", "AS", "M", distance, ("SFO", "SEA")),
            ],
        );

        match calculate_itinerary(&itinerary, &loader()) {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("overflowed"));
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_segment_fails_whole_itinerary() {
        let itinerary = create_itinerary(
            "gold",
            vec![
                create_segment("seg_001", "AS", "Y", "1000", ("SEA", "SFO")),
                create_segment("seg_002", "AS", "Y", "-1000", ("SFO", "SEA")),
            ],
        );

        match calculate_itinerary(&itinerary, &loader()) {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "segments[seg_002].distance");
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }
}
