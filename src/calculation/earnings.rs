//! Earnings calculation functionality.
//!
//! This module applies fare-class multipliers and elite-tier bonuses to a
//! flown base distance.

use rust_decimal::Decimal;

use crate::config::FareClassRate;
use crate::error::{EngineError, EngineResult};
use crate::models::Earnings;

/// Computes status points and redeemable miles for a flown distance.
///
/// - status points = distance x fare class total
/// - redeemable miles = distance x fare class total + distance x elite bonus
///
/// The elite bonus never contributes to status points, and it is applied to
/// the base distance rather than the fare-class-adjusted distance. The
/// result is exact; see [`Earnings::rounded`](crate::models::Earnings::rounded)
/// for rounding.
///
/// # Arguments
///
/// * `distance` - The flown base distance
/// * `rate` - The fare class multipliers
/// * `elite_bonus` - The elite tier bonus fraction (0 for non-elite)
///
/// # Returns
///
/// Returns the earnings, or an error if:
/// - `distance` or `elite_bonus` is negative (`InvalidInput`)
/// - `rate` has a negative component or `total != base + bonus` (`InvalidInput`)
/// - the arithmetic overflows (`CalculationError`)
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::compute_earnings;
/// use earnings_engine::config::FareClassRate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// // Alaska Airlines Y fare, 1000 miles, Gold
/// let rate = FareClassRate::new(Decimal::from_str("1.00").unwrap(), Decimal::from_str("0.50").unwrap());
/// let earnings = compute_earnings(Decimal::from(1000), &rate, Decimal::from_str("0.50").unwrap()).unwrap();
///
/// assert_eq!(earnings.status_points, Decimal::from(1500));
/// assert_eq!(earnings.redeemable_miles, Decimal::from(2000));
/// ```
pub fn compute_earnings(
    distance: Decimal,
    rate: &FareClassRate,
    elite_bonus: Decimal,
) -> EngineResult<Earnings> {
    if distance < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "distance",
            format!("must not be negative, got {}", distance),
        ));
    }
    if elite_bonus < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "elite_bonus",
            format!("must not be negative, got {}", elite_bonus),
        ));
    }
    if let Some(problem) = rate.problem() {
        return Err(EngineError::invalid_input("fare_class_rate", problem));
    }

    let status_points = distance
        .checked_mul(rate.total)
        .ok_or_else(|| overflow("status points"))?;
    let elite_bonus_miles = distance
        .checked_mul(elite_bonus)
        .ok_or_else(|| overflow("elite bonus miles"))?;
    let redeemable_miles = status_points
        .checked_add(elite_bonus_miles)
        .ok_or_else(|| overflow("redeemable miles"))?;

    Ok(Earnings {
        status_points,
        redeemable_miles,
    })
}

fn overflow(what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} overflowed", what),
    }
}
