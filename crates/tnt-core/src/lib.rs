//! # tnt-core: Pure GS1 Logic for Kenya TNT
//!
//! This crate holds the GS1 identifier logic of the Kenya track-and-trace
//! system as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kenya TNT Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Scanner UI / Regulator & Supplier portals          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tnt-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │check_digit│  │identifier │  │  barcode  │  │    epc    │  │   │
//! │  │   │  Mod-10   │  │ GLN/SSCC  │  │  parser   │  │ SGTIN URN │  │   │
//! │  │   │           │  │   GTIN    │  │ warnings  │  │ SSCC URN  │  │   │
//! │  │   │           │  │           │  │           │  │ SGLN URN  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tnt-seed (seed data assignment)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`check_digit`] - GS1 Modulo-10 check digit
//! - [`identifier`] - GLN / SSCC / GTIN assembly and splitting
//! - [`barcode`] - Barcode parsing with non-fatal warnings
//! - [`epc`] - EPC pure-identity and LGTIN class URIs
//! - [`allocator`] - Collision-free SSCC and batch number allocation
//! - [`types`] - Domain types
//! - [`validation`] - Field validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tnt_core::check_digit::{compute_check_digit, validate_check_digit};
//! use tnt_core::identifier::generate_gln;
//!
//! let digit = compute_check_digit("616400100000", 13).unwrap();
//! assert_eq!(digit, 6);
//!
//! let gln = generate_gln("61640010", 0).unwrap();
//! assert_eq!(gln.as_str(), "6164001000006");
//! assert!(validate_check_digit(gln.as_str()));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocator;
pub mod barcode;
pub mod check_digit;
pub mod epc;
pub mod error;
pub mod identifier;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use barcode::parse_barcode;
pub use check_digit::{compute_check_digit, validate_check_digit};
pub use error::{CoreError, CoreResult, ValidationError};
pub use identifier::generate_identifier;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Shortest GS1 Company Prefix accepted for GLN / SSCC / GTIN assembly.
pub const MIN_COMPANY_PREFIX_LEN: usize = 6;

/// Longest GS1 Company Prefix accepted for GLN / SSCC / GTIN assembly.
pub const MAX_COMPANY_PREFIX_LEN: usize = 12;

/// Attempts made by the [`allocator`] types before giving up.
pub const DEFAULT_ALLOCATION_ATTEMPTS: u32 = 100;
