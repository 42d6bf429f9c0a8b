//! Fare class rate lookup.
//!
//! Lookups never fail: an unknown program, airline or fare class yields
//! `None` or an empty table.

use crate::config::{FareClass, FareClassRate, RulesConfig};

/// Gets the rate of a fare class.
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::get_rate;
/// use earnings_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
///
/// let rate = get_rate(loader.config(), "alaska", "AS", "Y").unwrap();
/// assert_eq!(rate.total, Decimal::new(150, 2));
///
/// assert!(get_rate(loader.config(), "alaska", "ZZ", "Y").is_none());
/// ```
pub fn get_rate<'a>(
    config: &'a RulesConfig,
    program: &str,
    airline: &str,
    fare_code: &str,
) -> Option<&'a FareClassRate> {
    config
        .program(program)?
        .airline(airline)?
        .fare_class(fare_code)
        .map(|fc| &fc.rate)
}

/// Gets all fare classes of an airline, in rule-file order.
///
/// Returns an empty slice when the program or airline is unknown.
pub fn get_fare_class_table<'a>(
    config: &'a RulesConfig,
    program: &str,
    airline: &str,
) -> &'a [FareClass] {
    config
        .program(program)
        .and_then(|p| p.airline(airline))
        .map(|a| a.fare_classes.as_slice())
        .unwrap_or_default()
}
