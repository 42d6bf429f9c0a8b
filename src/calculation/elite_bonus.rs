//! Elite bonus lookup functionality.

use rust_decimal::Decimal;

use crate::config::EarningProgram;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The result of an elite bonus lookup, including the bonus and audit step.
#[derive(Debug, Clone)]
pub struct EliteBonusLookupResult {
    /// The bonus fraction applied to base distance.
    pub bonus: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Determines the elite bonus fraction of a traveler's tier.
///
/// # Returns
///
/// Returns the bonus and an audit step, or `InvalidInput` if the program
/// has no such tier.
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::resolve_elite_bonus;
/// use earnings_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let program = loader.get_program("alaska").unwrap();
///
/// let result = resolve_elite_bonus(program, "platinum", 1).unwrap();
/// assert_eq!(result.bonus, Decimal::ONE);
/// ```
pub fn resolve_elite_bonus(
    program: &EarningProgram,
    tier: &str,
    step_number: u32,
) -> EngineResult<EliteBonusLookupResult> {
    let elite_tier = program.elite_tiers.get(tier).ok_or_else(|| {
        EngineError::invalid_input(
            "tier",
            format!("unknown elite tier '{}' for program '{}'", tier, program.id),
        )
    })?;

    let bonus = elite_tier.bonus;
    let reasoning = if bonus.is_zero() {
        format!(
            "{} earns no elite bonus; redeemable miles equal status points",
            elite_tier.name
        )
    } else {
        format!(
            "{} earns a {}% bonus on base distance, added to redeemable miles only",
            elite_tier.name,
            (bonus * Decimal::ONE_HUNDRED).normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "elite_bonus_lookup".to_string(),
        rule_name: "Elite Bonus Lookup".to_string(),
        rule_ref: format!("{}/elite_tiers/{}", program.id, tier),
        input: serde_json::json!({
            "program": program.id,
            "tier": tier
        }),
        output: serde_json::json!({
            "elite_bonus": bonus.normalize().to_string(),
            "tier_name": elite_tier.name
        }),
        reasoning,
    };

    Ok(EliteBonusLookupResult { bonus, audit_step })
}
