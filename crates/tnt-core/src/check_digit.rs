//! # Check Digit Module
//!
//! The GS1 Modulo-10 check digit shared by GLN, SSCC and GTIN.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base:      7   3   5   1   0   0   2   0   0   0   0   0               │
//! │  distance: 11  10   9   8   7   6   5   4   3   2   1   0  (from right) │
//! │  weight:    3   1   3   1   3   1   3   1   3   1   3   1               │
//! │                                                                         │
//! │  sum = Σ digit × weight = 21 + 3 + 15 + 1 + 6 = 46                      │
//! │  mod = 46 % 10 = 6                                                      │
//! │  check digit = mod == 0 ? 0 : 10 - mod = 4   →  7351002000004           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Weights 1 and 3 are both coprime to 10, so any single-digit substitution
//! in the base changes the check digit.

use crate::error::{CoreError, CoreResult};

/// Computes the check digit for `base`, which must hold exactly
/// `target_length - 1` decimal digits.
///
/// ## Example
/// ```rust
/// use tnt_core::check_digit::compute_check_digit;
///
/// assert_eq!(compute_check_digit("735100200000", 13).unwrap(), 4);
/// assert_eq!(compute_check_digit("000000000000", 13).unwrap(), 0);
/// assert!(compute_check_digit("73510020000", 13).is_err());
/// ```
pub fn compute_check_digit(base: &str, target_length: usize) -> CoreResult<u8> {
    let expected = target_length.saturating_sub(1);
    if base.len() != expected {
        return Err(CoreError::InvalidLength {
            expected,
            actual: base.len(),
        });
    }
    ensure_digits("base", base)?;

    Ok(check_digit_of(base.as_bytes()))
}

/// Returns true when the trailing digit of `identifier` matches the check
/// digit recomputed from the digits before it.
///
/// Never fails: empty, single-character and non-numeric input is simply
/// invalid.
pub fn validate_check_digit(identifier: &str) -> bool {
    let bytes = identifier.as_bytes();
    if bytes.len() < 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    let (base, claimed) = bytes.split_at(bytes.len() - 1);
    check_digit_of(base) == claimed[0] - b'0'
}

/// Fails with [`CoreError::NonNumeric`] unless `value` is non-empty and all
/// ASCII digits.
pub(crate) fn ensure_digits(field: &str, value: &str) -> CoreResult<()> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::non_numeric(field, value));
    }
    Ok(())
}

/// Check digit of an all-digit byte string. Callers guarantee the digits.
pub(crate) fn check_digit_of(base: &[u8]) -> u8 {
    let sum: u32 = base
        .iter()
        .rev()
        .enumerate()
        .map(|(distance, b)| {
            let weight = if distance % 2 == 0 { 1 } else { 3 };
            u32::from(b - b'0') * weight
        })
        .sum();

    match (sum % 10) as u8 {
        0 => 0,
        m => 10 - m,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
