//! Seed configuration.
//!
//! Loaded from environment variables with fallback to defaults, then
//! overridden by command line flags.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const ENV_OUTPUT: &str = "TNT_SEED_OUTPUT";
pub const ENV_LOG_LEVEL: &str = "TNT_SEED_LOG_LEVEL";
pub const ENV_SHIPMENTS: &str = "TNT_SEED_SHIPMENTS";
pub const ENV_RNG_SEED: &str = "TNT_SEED_RNG_SEED";

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_SHIPMENTS: usize = 10;

pub const USAGE: &str = "\
Kenya TNT Seed Identifier Assignment

Usage: seed [OPTIONS]

Options:
  -o, --output <PATH>    Write JSON to PATH instead of stdout
  -n, --shipments <N>    Number of shipments to allocate SSCCs for (default: 10)
  -s, --seed <N>         RNG seed for reproducible SSCCs
  -h, --help             Show this help message

Environment:
  TNT_SEED_OUTPUT, TNT_SEED_SHIPMENTS, TNT_SEED_RNG_SEED, TNT_SEED_LOG_LEVEL
  RUST_LOG overrides TNT_SEED_LOG_LEVEL";

/// Seed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Output file; stdout when unset
    pub output: Option<PathBuf>,

    /// Default tracing filter when RUST_LOG is not set
    pub log_level: String,

    /// Number of shipments that receive an SSCC
    pub shipments: usize,

    /// Fixed RNG seed; drawn at random when unset
    pub rng_seed: Option<u64>,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Run(SeedConfig),
    Help,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            output: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            shipments: DEFAULT_SHIPMENTS,
            rng_seed: None,
        }
    }
}

impl SeedConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(SeedConfig {
            output: lookup(ENV_OUTPUT)
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),

            log_level: lookup(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),

            shipments: match lookup(ENV_SHIPMENTS) {
                Some(value) => parse_value(ENV_SHIPMENTS, &value)?,
                None => defaults.shipments,
            },

            rng_seed: lookup(ENV_RNG_SEED)
                .map(|value| parse_value(ENV_RNG_SEED, &value))
                .transpose()?,
        })
    }

    /// Applies command line flags on top of this configuration.
    ///
    /// `args` excludes the program name.
    pub fn apply_args<I>(mut self, args: I) -> Result<CliAction, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--output" | "-o" => {
                    self.output = Some(PathBuf::from(required_value(&arg, args.next())?));
                }
                "--shipments" | "-n" => {
                    self.shipments = parse_value(&arg, &required_value(&arg, args.next())?)?;
                }
                "--seed" | "-s" => {
                    self.rng_seed = Some(parse_value(&arg, &required_value(&arg, args.next())?)?);
                }
                "--help" | "-h" => return Ok(CliAction::Help),
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        Ok(CliAction::Run(self))
    }
}

fn required_value(flag: &str, value: Option<String>) -> Result<String, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingRequired(format!("value for {flag}")))
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = SeedConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SeedConfig::default());
        assert_eq!(config.shipments, 10);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_environment_values() {
        let config = SeedConfig::from_lookup(lookup(&[
            (ENV_OUTPUT, "out/seed.json"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_SHIPMENTS, "25"),
            (ENV_RNG_SEED, "42"),
        ]))
        .unwrap();

        assert_eq!(config.output, Some(PathBuf::from("out/seed.json")));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.shipments, 25);
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_invalid_environment_value() {
        let err = SeedConfig::from_lookup(lookup(&[(ENV_SHIPMENTS, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key) if key == ENV_SHIPMENTS));
    }

    #[test]
    fn test_flags_override_environment() {
        let config = SeedConfig::from_lookup(lookup(&[(ENV_SHIPMENTS, "25")])).unwrap();
        let action = config
            .apply_args(args(&["--shipments", "3", "-s", "7", "-o", "seed.json"]))
            .unwrap();

        let CliAction::Run(config) = action else {
            panic!("expected run");
        };
        assert_eq!(config.shipments, 3);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.output, Some(PathBuf::from("seed.json")));
    }

    #[test]
    fn test_help_flag() {
        let action = SeedConfig::default()
            .apply_args(args(&["-n", "2", "--help"]))
            .unwrap();
        assert_eq!(action, CliAction::Help);
    }

    #[test]
    fn test_bad_flags() {
        assert!(matches!(
            SeedConfig::default().apply_args(args(&["--seed"])),
            Err(ConfigError::MissingRequired(_))
        ));
        assert!(matches!(
            SeedConfig::default().apply_args(args(&["--shipments", "-1"])),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            SeedConfig::default().apply_args(args(&["--count"])),
            Err(ConfigError::UnknownArgument(_))
        ));
    }
}
