//! Configuration loading and management for the Earnings Engine.
//!
//! This module provides functionality to load earning rules from YAML files,
//! including rule set metadata, earning programs, airlines, fare classes,
//! elite tiers and the airport reference table.
//!
//! # Example
//!
//! ```
//! use earnings_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::builtin().unwrap();
//! println!("Loaded rules version: {}", config.metadata().version);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Airline, Airport, CalculationRules, CalculationSettings, EarningProgram, EliteTier, FareClass,
    FareClassRate, RulesConfig, RulesMetadata,
};
