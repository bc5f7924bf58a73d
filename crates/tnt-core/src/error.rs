//! # Error Types
//!
//! Domain-specific error types for tnt-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tnt-core errors (this file)                                           │
//! │  ├── CoreError        - Identifier computation failures                │
//! │  └── ValidationError  - Field rule failures                            │
//! │                                                                         │
//! │  tnt-seed errors (separate crate)                                      │
//! │  └── SeedError        - Configuration / output failures                │
//! │                                                                         │
//! │  Barcode checksum failures are NOT errors: they surface as             │
//! │  ParseWarning values on the parsed result.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while computing, assembling or splitting GS1 identifiers.
///
/// Every variant is fatal to the single computation that raised it and is
/// never retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The base string does not have the digit count of its identifier class.
    ///
    /// ## When This Occurs
    /// - 11 or 13 digits passed for a 13-digit GLN (base must be 12)
    /// - An identifier string of the wrong length handed to a parser
    #[error("Invalid length: expected {expected} digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Prefix, base or identifier contains something other than `0-9`.
    #[error("{field} must contain only digits: '{value}'")]
    NonNumeric { field: String, value: String },

    /// The reference does not fit in the width left after the prefix.
    ///
    /// ## User Workflow
    /// ```text
    /// generate_identifier("61640010", 12345, 13)
    ///      │
    ///      ▼
    /// width = 13 - 1 - 8 = 4 digits
    ///      │
    ///      ▼
    /// "12345" needs 5 → ReferenceOverflow { reference: 12345, width: 4 }
    /// ```
    #[error("Reference {reference} does not fit in {width} digits")]
    ReferenceOverflow { reference: u64, width: usize },

    /// The prefix leaves no room for the check digit.
    #[error("Prefix '{prefix}' is too long: at most {max} digits allowed")]
    PrefixTooLong { prefix: String, max: usize },

    /// A full identifier carries the wrong trailing check digit.
    #[error("Check digit mismatch for {identifier}: expected {expected}, found {found}")]
    CheckDigitMismatch {
        identifier: String,
        expected: u8,
        found: u8,
    },

    /// A supplied company prefix disagrees with the identifier it describes.
    #[error("Company prefix mismatch: expected {expected}, found {found}")]
    PrefixMismatch { expected: String, found: String },

    /// An EPC pure-identity URI could not be parsed.
    #[error("Invalid EPC URI '{uri}': {reason}")]
    InvalidEpcUri { uri: String, reason: String },

    /// Every candidate SSCC or batch number drawn was already registered.
    #[error("Failed to allocate a unique value after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NonNumeric error for a field.
    pub fn non_numeric(field: impl Into<String>, value: impl Into<String>) -> Self {
        CoreError::NonNumeric {
            field: field.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value or length is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., letters in a company prefix).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
