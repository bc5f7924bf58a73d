//! # Seed Identifier Assignment
//!
//! Assigns GLNs and SSCCs to the seed data set and prints them as JSON.
//!
//! ## Usage
//! ```bash
//! # Print to stdout with 10 shipments (default)
//! cargo run -p tnt-seed --bin seed
//!
//! # Reproducible SSCCs written to a file
//! cargo run -p tnt-seed --bin seed -- --seed 42 --shipments 50 --output seed.json
//!
//! # Verbose logging
//! RUST_LOG=debug cargo run -p tnt-seed --bin seed
//! ```
//!
//! Logs go to stderr so stdout stays valid JSON.

use std::env;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tnt_seed::{config::USAGE, CliAction, SeedConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match SeedConfig::load()?.apply_args(env::args().skip(1))? {
        CliAction::Run(config) => config,
        CliAction::Help => {
            println!("{USAGE}");
            return Ok(());
        }
    };

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        shipments = config.shipments,
        output = ?config.output,
        "Configuration loaded"
    );

    let output = tnt_seed::run(&config)?;

    match &config.output {
        Some(path) => tnt_seed::write_output(&output, path)?,
        None => println!("{}", tnt_seed::render(&output)?),
    }

    info!(
        legal_entities = output.legal_entities.len(),
        premises = output.premises.len(),
        shipments = output.shipments.len(),
        corrections = output.corrections.len(),
        "Seed complete"
    );

    Ok(())
}
