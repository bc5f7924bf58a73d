//! # Validation Module
//!
//! Field rules for GS1 inputs coming from registration forms, seed data and
//! scanners.
//!
//! ## Usage
//! ```rust
//! use tnt_core::validation::{validate_batch_number, validate_company_prefix};
//!
//! assert!(validate_company_prefix("61640010").is_ok());
//! assert!(validate_batch_number("BATCH-241219-ABC123").is_ok());
//! ```

use crate::error::ValidationError;
use crate::{MAX_COMPANY_PREFIX_LEN, MIN_COMPANY_PREFIX_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a batch / lot number (AI 10, X..20).
pub const MAX_BATCH_NUMBER_LEN: usize = 20;

/// Maximum length of a serial number (AI 21, X..20).
pub const MAX_SERIAL_NUMBER_LEN: usize = 20;

// =============================================================================
// Company Prefix
// =============================================================================

/// Validates a GS1 Company Prefix.
///
/// ## Rules
/// - Must not be empty
/// - Digits only
/// - Between 6 and 12 digits
///
/// ## Example
/// ```rust
/// use tnt_core::validation::validate_company_prefix;
///
/// assert!(validate_company_prefix("73510020").is_ok());
/// assert!(validate_company_prefix("12345").is_err());
/// assert!(validate_company_prefix("7351A020").is_err());
/// ```
pub fn validate_company_prefix(prefix: &str) -> ValidationResult<()> {
    if prefix.is_empty() {
        return Err(ValidationError::Required {
            field: "company_prefix".to_string(),
        });
    }

    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "company_prefix".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    validate_prefix_length(prefix.len())
}

/// Validates a company prefix length used to split an identifier.
pub fn validate_prefix_length(len: usize) -> ValidationResult<()> {
    if !(MIN_COMPANY_PREFIX_LEN..=MAX_COMPANY_PREFIX_LEN).contains(&len) {
        return Err(ValidationError::OutOfRange {
            field: "company_prefix length".to_string(),
            min: MIN_COMPANY_PREFIX_LEN as i64,
            max: MAX_COMPANY_PREFIX_LEN as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Batch / Serial
// =============================================================================

/// Validates a batch / lot number.
///
/// ## Rules
/// - Must not be empty
/// - At most 20 characters
/// - Uppercase letters, digits and hyphens only
pub fn validate_batch_number(batch: &str) -> ValidationResult<()> {
    let batch = batch.trim();

    if batch.is_empty() {
        return Err(ValidationError::Required {
            field: "batch_number".to_string(),
        });
    }

    if batch.len() > MAX_BATCH_NUMBER_LEN {
        return Err(ValidationError::TooLong {
            field: "batch_number".to_string(),
            max: MAX_BATCH_NUMBER_LEN,
        });
    }

    if !batch
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "batch_number".to_string(),
            reason: "must contain only uppercase letters, digits, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a serial number.
///
/// ## Rules
/// - Must not be empty
/// - At most 20 characters
/// - No whitespace or `.` (it separates SGTIN URI components)
pub fn validate_serial_number(serial: &str) -> ValidationResult<()> {
    if serial.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "serial_number".to_string(),
        });
    }

    if serial.len() > MAX_SERIAL_NUMBER_LEN {
        return Err(ValidationError::TooLong {
            field: "serial_number".to_string(),
            max: MAX_SERIAL_NUMBER_LEN,
        });
    }

    if serial.chars().any(|c| c.is_whitespace() || c == '.') {
        return Err(ValidationError::InvalidFormat {
            field: "serial_number".to_string(),
            reason: "must not contain whitespace or '.'".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Application Identifier Lengths
// =============================================================================

/// Maximum value length of a variable-length application identifier.
///
/// Returns `None` for fixed-length AIs and AIs without a limit here.
pub fn ai_max_length(ai: &str) -> Option<usize> {
    match ai {
        "10" => Some(MAX_BATCH_NUMBER_LEN),
        "21" => Some(MAX_SERIAL_NUMBER_LEN),
        "37" => Some(8),
        "253" => Some(30),
        "402" => Some(17),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
