//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading earning
//! rules from YAML files.

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::calculation::compute_earnings;
use crate::error::{EngineError, EngineResult};
use crate::models::Earnings;

use super::types::{
    Airline, Airport, AirportsFile, CalculationSettings, EarningProgram, FareClass, FareClassRate,
    RulesConfig, RulesFile, RulesMetadata,
};

const BUILTIN_RULES: &str = include_str!("../../config/atmos/rules.yaml");
const BUILTIN_AIRPORTS: &str = include_str!("../../config/atmos/airports.yaml");
const BUILTIN_PROGRAMS: &[(&str, &str)] = &[(
    "programs/alaska.yaml",
    include_str!("../../config/atmos/programs/alaska.yaml"),
)];

/// Loads and provides access to earning rules.
///
/// The `ConfigLoader` reads YAML rule files, validates every fare class,
/// and provides methods to query programs, airlines, rates, elite bonuses
/// and airports. The loaded rules are never mutated.
///
/// # Directory Structure
///
/// ```text
/// config/atmos/
/// ├── rules.yaml          # Rule set metadata and calculation settings
/// ├── airports.yaml       # Airport reference table
/// └── programs/
///     └── alaska.yaml     # One earning program per file
/// ```
///
/// # Example
///
/// ```
/// use earnings_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
///
/// let bonus = loader.get_elite_bonus("alaska", "gold").unwrap();
/// assert_eq!(bonus, Decimal::new(50, 2));
///
/// let earnings = loader
///     .compute_for("alaska", "AS", "Y", Decimal::from(1000), "gold")
///     .unwrap();
/// assert_eq!(earnings.status_points, Decimal::from(1500));
/// assert_eq!(earnings.redeemable_miles, Decimal::from(2000));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RulesConfig,
}

impl ConfigLoader {
    /// Loads the rule set compiled into the crate.
    pub fn builtin() -> EngineResult<Self> {
        let rules = Self::parse_yaml::<RulesFile>("builtin:rules.yaml", BUILTIN_RULES)?;
        let airports = Self::parse_yaml::<AirportsFile>("builtin:airports.yaml", BUILTIN_AIRPORTS)?;

        let programs = BUILTIN_PROGRAMS
            .iter()
            .map(|(name, content)| {
                Self::parse_yaml::<EarningProgram>(&format!("builtin:{}", name), content)
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Self::build(rules, airports, programs)
    }

    /// Loads rules from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the rules directory (e.g., "./config/atmos")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any fare class fails validation
    ///
    /// # Example
    ///
    /// ```no_run
    /// use earnings_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/atmos")?;
    /// # Ok::<(), earnings_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules = Self::load_yaml::<RulesFile>(&path.join("rules.yaml"))?;
        let airports = Self::load_yaml::<AirportsFile>(&path.join("airports.yaml"))?;
        let programs = Self::load_programs(&path.join("programs"))?;

        Self::build(rules, airports, programs)
    }

    fn build(
        rules: RulesFile,
        airports: AirportsFile,
        programs: Vec<EarningProgram>,
    ) -> EngineResult<Self> {
        let mut seen_programs = HashSet::new();
        for program in &programs {
            if !seen_programs.insert(program.id.as_str()) {
                return Err(EngineError::InvalidRule {
                    program: program.id.clone(),
                    airline: "*".to_string(),
                    fare_class: "*".to_string(),
                    message: "program defined more than once".to_string(),
                });
            }
            Self::validate_program(program)?;
        }

        let config = RulesConfig::new(rules.metadata, rules.settings, programs, airports.airports);

        info!(
            rules_version = %config.metadata().version,
            programs = config.programs().len(),
            airports = config.airports().len(),
            rounding = ?config.settings().rounding,
            "Earning rules loaded"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&path_str, &content)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(path: &str, content: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Loads all program files from the programs directory, ordered by file name.
    fn load_programs(programs_dir: &Path) -> EngineResult<Vec<EarningProgram>> {
        let programs_dir_str = programs_dir.display().to_string();

        if !programs_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: programs_dir_str,
            });
        }

        let entries = fs::read_dir(programs_dir).map_err(|_| EngineError::ConfigNotFound {
            path: programs_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: programs_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no program files found)", programs_dir_str),
            });
        }

        paths.iter().map(|p| Self::load_yaml(p)).collect()
    }

    fn validate_program(program: &EarningProgram) -> EngineResult<()> {
        let invalid = |airline: &str, fare_class: &str, message: String| EngineError::InvalidRule {
            program: program.id.clone(),
            airline: airline.to_string(),
            fare_class: fare_class.to_string(),
            message,
        };

        for (tier, elite_tier) in &program.elite_tiers {
            if elite_tier.bonus < Decimal::ZERO {
                return Err(invalid(
                    "*",
                    "*",
                    format!("elite tier '{}' has negative bonus {}", tier, elite_tier.bonus),
                ));
            }
        }

        for (key, airline) in &program.airlines {
            if key != &airline.code {
                return Err(invalid(
                    key.as_str(),
                    "*",
                    format!("airline key does not match code '{}'", airline.code),
                ));
            }

            let mut seen = HashSet::new();
            for fare_class in &airline.fare_classes {
                if !seen.insert(fare_class.code.as_str()) {
                    return Err(invalid(
                        key.as_str(),
                        fare_class.code.as_str(),
                        "fare class defined more than once".to_string(),
                    ));
                }
                if let Some(problem) = fare_class.rate.problem() {
                    return Err(invalid(key.as_str(), fare_class.code.as_str(), problem));
                }
                if !fare_class.cabin.is_standard() {
                    warn!(
                        program = %program.id,
                        airline = %key,
                        fare_class = %fare_class.code,
                        cabin = %fare_class.cabin,
                        "Cabin has no display name; its identifier will be shown"
                    );
                }
            }
        }

        Ok(())
    }

    /// Returns the underlying rules configuration.
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Returns the rule set metadata.
    pub fn metadata(&self) -> &RulesMetadata {
        self.config.metadata()
    }

    /// Returns the calculation settings.
    pub fn settings(&self) -> &CalculationSettings {
        self.config.settings()
    }

    /// Gets a program by its id.
    pub fn get_program(&self, program: &str) -> Option<&EarningProgram> {
        self.config.program(program)
    }

    /// Gets an airline of a program.
    pub fn get_airline(&self, program: &str, airline: &str) -> Option<&Airline> {
        self.get_program(program)?.airline(airline)
    }

    /// Gets a fare class of an airline.
    pub fn get_fare_class(&self, program: &str, airline: &str, code: &str) -> Option<&FareClass> {
        self.get_airline(program, airline)?.fare_class(code)
    }

    /// Gets the elite bonus fraction of a tier.
    pub fn get_elite_bonus(&self, program: &str, tier: &str) -> Option<Decimal> {
        self.get_program(program)?.elite_bonus(tier)
    }

    /// Gets an airport from the reference table.
    pub fn get_airport(&self, code: &str) -> Option<&Airport> {
        self.config.airports().get(code)
    }

    /// Looks up the fare class and tier, then computes exact earnings.
    ///
    /// # Returns
    ///
    /// Returns an `InvalidInput` error naming the first unknown key
    /// (`program`, `airline`, `fare_class` or `tier`), or any error
    /// returned by [`compute_earnings`].
    pub fn compute_for(
        &self,
        program: &str,
        airline: &str,
        fare_class: &str,
        distance: Decimal,
        tier: &str,
    ) -> EngineResult<Earnings> {
        let earning_program = self.get_program(program).ok_or_else(|| {
            EngineError::invalid_input("program", format!("unknown program '{}'", program))
        })?;
        let airline_entry = earning_program.airline(airline).ok_or_else(|| {
            EngineError::invalid_input("airline", format!("unknown airline '{}'", airline))
        })?;
        let rate: &FareClassRate = airline_entry
            .fare_class(fare_class)
            .map(|fc| &fc.rate)
            .ok_or_else(|| {
                EngineError::invalid_input(
                    "fare_class",
                    format!("unknown fare class '{}' for airline '{}'", fare_class, airline),
                )
            })?;
        let elite_bonus = earning_program.elite_bonus(tier).ok_or_else(|| {
            EngineError::invalid_input("tier", format!("unknown elite tier '{}'", tier))
        })?;

        compute_earnings(distance, rate, elite_bonus)
    }
}
