//! # Seed Error Types
//!
//! ## Error Flow
//! ```text
//! CoreError ────┐
//! ConfigError ──┤
//! serde_json ───┼──▶ SeedError ──▶ main() ──▶ exit code 1
//! std::io ──────┘
//! ```

use thiserror::Error;
use tnt_core::CoreError;

use crate::config::ConfigError;

/// Errors raised while assigning or writing seed identifiers.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Identifier computation failed for a fixture.
    #[error("Identifier error: {0}")]
    Core(#[from] CoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A premise or shipment points at a legal entity missing from the fixtures.
    #[error("Unknown legal entity: {entity_id}")]
    UnknownEntity { entity_id: String },

    /// Shipments were requested but no supplier can ship them.
    #[error("No supplier available to ship from")]
    NoSuppliers,

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for seed operations.
pub type SeedResult<T> = Result<T, SeedError>;
