//! Earnings values and rounding policy.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// How earned totals are rounded to whole points and miles.
///
/// Earnings are always computed exactly; the policy is applied afterwards.
///
/// # Example
///
/// ```
/// use earnings_engine::models::RoundingPolicy;
/// use rust_decimal::Decimal;
///
/// let value = Decimal::new(12345, 1); // 1234.5
/// assert_eq!(RoundingPolicy::HalfUp.apply(value), Decimal::from(1235));
/// assert_eq!(RoundingPolicy::Down.apply(value), Decimal::from(1234));
/// assert_eq!(RoundingPolicy::Exact.apply(value), value);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Keep the exact decimal value.
    Exact,
    /// Round to the nearest whole number, midpoints away from zero.
    #[default]
    HalfUp,
    /// Truncate any fractional part.
    Down,
}

impl RoundingPolicy {
    /// Applies the policy to a value.
    pub fn apply(self, value: Decimal) -> Decimal {
        match self {
            RoundingPolicy::Exact => value,
            RoundingPolicy::HalfUp => {
                value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            }
            RoundingPolicy::Down => value.round_dp_with_strategy(0, RoundingStrategy::ToZero),
        }
    }
}

/// Status points and redeemable miles earned for a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earnings {
    /// Tier-qualifying status points (no elite bonus).
    pub status_points: Decimal,
    /// Spendable miles, including any elite bonus.
    pub redeemable_miles: Decimal,
}

impl Earnings {
    /// Earnings of zero points and zero miles.
    pub const ZERO: Earnings = Earnings {
        status_points: Decimal::ZERO,
        redeemable_miles: Decimal::ZERO,
    };

    /// Returns a copy with both values rounded by `policy`.
    pub fn rounded(&self, policy: RoundingPolicy) -> Earnings {
        Earnings {
            status_points: policy.apply(self.status_points),
            redeemable_miles: policy.apply(self.redeemable_miles),
        }
    }

    /// The part of the redeemable miles contributed by the elite bonus.
    pub fn elite_bonus_miles(&self) -> Decimal {
        self.redeemable_miles - self.status_points
    }
}
