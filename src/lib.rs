//! Earnings Engine for airline loyalty programs
//!
//! This crate computes the status points and redeemable miles a flight earns
//! under a loyalty program, given the operating airline, the fare class, the
//! flown distance and the traveler's elite tier. Earning rules are loaded
//! from YAML rule files; a built-in rule set for Alaska Atmos Rewards is
//! embedded in the crate.
//!
//! # Example
//!
//! ```
//! use earnings_engine::config::ConfigLoader;
//! use rust_decimal::Decimal;
//!
//! let loader = ConfigLoader::builtin().unwrap();
//! let earnings = loader
//!     .compute_for("alaska", "AS", "Y", Decimal::from(1000), "gold")
//!     .unwrap();
//!
//! assert_eq!(earnings.status_points, Decimal::from(1500));
//! assert_eq!(earnings.redeemable_miles, Decimal::from(2000));
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
