//! Cabin grouping of fare classes for display.
//!
//! Cabins are ordered first, business, premium economy, economy, saver.
//! Cabins with non-standard identifiers follow in the order they first
//! appear in the rule file.

use serde::Serialize;

use crate::config::{FareClass, RulesConfig};
use crate::models::Cabin;

use super::get_fare_class_table;

/// The fare classes of one cabin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CabinGroup<'a> {
    /// The cabin.
    pub cabin: Cabin,
    /// The cabin display name (the raw identifier for non-standard cabins).
    pub display_name: String,
    /// Fare classes in this cabin, in rule-file order.
    pub fare_classes: Vec<&'a FareClass>,
}

fn ordered_cabins(fare_classes: &[FareClass]) -> Vec<Cabin> {
    let mut cabins: Vec<Cabin> = Cabin::DISPLAY_ORDER
        .into_iter()
        .filter(|cabin| fare_classes.iter().any(|fc| &fc.cabin == cabin))
        .collect();

    for fare_class in fare_classes {
        if !fare_class.cabin.is_standard() && !cabins.contains(&fare_class.cabin) {
            cabins.push(fare_class.cabin.clone());
        }
    }

    cabins
}

/// Lists the cabins an airline sells, in display order.
///
/// Returns an empty list when the program or airline is unknown.
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::list_cabins;
/// use earnings_engine::config::ConfigLoader;
/// use earnings_engine::models::Cabin;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let cabins = list_cabins(loader.config(), "alaska", "AS");
///
/// assert_eq!(cabins, vec![Cabin::First, Cabin::Economy, Cabin::Saver]);
/// ```
pub fn list_cabins(config: &RulesConfig, program: &str, airline: &str) -> Vec<Cabin> {
    ordered_cabins(get_fare_class_table(config, program, airline))
}

/// Groups an airline's fare classes by cabin, in display order.
///
/// Cabins the airline does not sell are omitted. Returns an empty list when
/// the program or airline is unknown.
pub fn group_fare_classes_by_cabin<'a>(
    config: &'a RulesConfig,
    program: &str,
    airline: &str,
) -> Vec<CabinGroup<'a>> {
    let fare_classes = get_fare_class_table(config, program, airline);

    ordered_cabins(fare_classes)
        .into_iter()
        .map(|cabin| CabinGroup {
            display_name: cabin.display_name().to_string(),
            fare_classes: fare_classes.iter().filter(|fc| fc.cabin == cabin).collect(),
            cabin,
        })
        .collect()
}
