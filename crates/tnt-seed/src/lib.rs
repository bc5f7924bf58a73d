//! # tnt-seed: Seed Identifier Assignment for Kenya TNT
//!
//! Assigns GS1 identifiers to the regulator's seed data set: legal entity
//! and HQ GLNs, premise GLNs and shipment SSCCs.
//!
//! ## Flow
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────┐
//! │  SeedConfig  │───▶│   fixtures   │───▶│    assign    │───▶│   JSON   │
//! │  env + CLI   │    │ entities and │    │  tnt-core    │    │  stdout  │
//! │              │    │   premises   │    │  generators  │    │  or file │
//! └──────────────┘    └──────────────┘    └──────────────┘    └──────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Environment and command line configuration
//! - [`fixtures`] - The seed data set
//! - [`assign`] - Identifier assignment
//! - [`error`] - Seed error types

pub mod assign;
pub mod config;
pub mod error;
pub mod fixtures;

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

pub use assign::{assign_identifiers, SeedOutput};
pub use config::{CliAction, ConfigError, SeedConfig};
pub use error::{SeedError, SeedResult};

/// Runs one seed pass over the built-in fixtures.
///
/// A missing RNG seed is drawn at random and recorded in the output so the
/// run can be repeated.
pub fn run(config: &SeedConfig) -> SeedResult<SeedOutput> {
    let rng_seed = config.rng_seed.unwrap_or_else(rand::random);
    info!(rng_seed, shipments = config.shipments, "Assigning seed identifiers");

    let mut rng = StdRng::seed_from_u64(rng_seed);
    assign_identifiers(
        fixtures::LEGAL_ENTITIES,
        fixtures::PREMISES,
        config.shipments,
        rng_seed,
        &mut rng,
    )
}

/// Pretty-printed JSON of `output`.
pub fn render(output: &SeedOutput) -> SeedResult<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

/// Writes `output` to `path`, creating parent directories as needed.
pub fn write_output(output: &SeedOutput, path: &Path) -> SeedResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render(output)?)?;
    info!(path = %path.display(), "Seed output written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_with_fixed_seed() {
        let config = SeedConfig {
            shipments: 3,
            rng_seed: Some(11),
            ..SeedConfig::default()
        };

        let first = run(&config).unwrap();
        let second = run(&config).unwrap();

        assert_eq!(first.rng_seed, 11);
        assert_eq!(first.shipments.len(), 3);
        assert_eq!(
            first.shipments.iter().map(|s| &s.sscc).collect::<Vec<_>>(),
            second.shipments.iter().map(|s| &s.sscc).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_write_output() {
        let config = SeedConfig {
            shipments: 1,
            rng_seed: Some(5),
            ..SeedConfig::default()
        };
        let output = run(&config).unwrap();

        let dir = std::env::temp_dir().join(format!("tnt-seed-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("seed.json");
        write_output(&output, &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["rng_seed"], 5);
        assert_eq!(written["premises"].as_array().unwrap().len(), fixtures::PREMISES.len());

        fs::remove_dir_all(dir).unwrap();
    }
}
