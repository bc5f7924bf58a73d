//! # Identifier Module
//!
//! Assembles GLN / SSCC / GTIN identifiers from a company prefix and a
//! numeric reference, and splits validated identifiers back into parts.
//!
//! ## Layout
//! ```text
//! GLN      [ company prefix | location ref ][check]           13 digits
//! SSCC     [ext][ company prefix | serial ref ][check]        18 digits
//! GTIN-14  [ind][ company prefix | item ref   ][check]        14 digits
//!
//! generate_identifier("61640030", 2, 13)
//!   width = 13 - 1 - 8 = 4      → "0002"
//!   base  = "616400300002"      → check digit 8
//!   GLN   = "6164003000028"
//! ```
//!
//! The prefix / reference boundary is not recorded in the identifier itself,
//! so splitting always needs the company prefix length.

use crate::check_digit::{compute_check_digit, ensure_digits, validate_check_digit};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Identifier, IdentifierClass, IdentifierParts};
use crate::validation::{validate_company_prefix, validate_prefix_length};

// =============================================================================
// Generic Assembly
// =============================================================================

/// Builds a `target_length`-digit identifier: `prefix`, then `reference`
/// zero-padded to fill the remaining base width, then the check digit.
///
/// ## Errors
/// - [`CoreError::NonNumeric`] if `prefix` holds a non-digit
/// - [`CoreError::InvalidLength`] if `target_length` is below 2
/// - [`CoreError::PrefixTooLong`] if `prefix` leaves no room for the check digit
/// - [`CoreError::ReferenceOverflow`] if `reference` is wider than the gap
///
/// ## Example
/// ```rust
/// use tnt_core::identifier::generate_identifier;
///
/// assert_eq!(generate_identifier("73510020", 0, 13).unwrap(), "7351002000004");
/// assert_eq!(generate_identifier("73510020", 9999, 13).unwrap().len(), 13);
/// assert!(generate_identifier("73510020", 10000, 13).is_err());
/// ```
pub fn generate_identifier(
    prefix: &str,
    reference: u64,
    target_length: usize,
) -> CoreResult<String> {
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::non_numeric("prefix", prefix));
    }

    if target_length < 2 {
        return Err(CoreError::InvalidLength {
            expected: 2,
            actual: target_length,
        });
    }

    let base_length = target_length - 1;
    if prefix.len() > base_length {
        return Err(CoreError::PrefixTooLong {
            prefix: prefix.to_string(),
            max: base_length,
        });
    }

    let width = base_length - prefix.len();
    if decimal_width(reference) > width {
        return Err(CoreError::ReferenceOverflow { reference, width });
    }

    let base = format!("{}{:0width$}", prefix, reference, width = width);
    let check = compute_check_digit(&base, target_length)?;

    Ok(format!("{base}{check}"))
}

/// Same as [`generate_identifier`], typed by identifier class.
pub fn generate(class: IdentifierClass, prefix: &str, reference: u64) -> CoreResult<Identifier> {
    let digits = generate_identifier(prefix, reference, class.length())?;
    Ok(Identifier::from_trusted(class, digits))
}

fn decimal_width(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}

// =============================================================================
// Class-Specific Generators
// =============================================================================

/// Generates a GLN from a 6-12 digit company prefix and a location reference.
pub fn generate_gln(company_prefix: &str, location_reference: u64) -> CoreResult<Identifier> {
    check_company_prefix(company_prefix)?;
    generate(IdentifierClass::Gln, company_prefix, location_reference)
}

/// Generates the headquarters GLN of a legal entity (location reference 0).
pub fn generate_hq_gln(company_prefix: &str) -> CoreResult<Identifier> {
    generate_gln(company_prefix, 0)
}

/// Generates an SSCC: extension digit, company prefix, serial reference
/// padded to `16 - len(prefix)` digits, check digit.
///
/// ## Example
/// ```rust
/// use tnt_core::identifier::generate_sscc;
///
/// let sscc = generate_sscc(0, "61640010", 1).unwrap();
/// assert_eq!(sscc.as_str(), "061640010000000015");
/// ```
pub fn generate_sscc(
    extension_digit: u8,
    company_prefix: &str,
    serial_reference: u64,
) -> CoreResult<Identifier> {
    check_leading_digit("extension_digit", extension_digit)?;
    check_company_prefix(company_prefix)?;
    generate(
        IdentifierClass::Sscc,
        &format!("{extension_digit}{company_prefix}"),
        serial_reference,
    )
}

/// Generates a GTIN-14: indicator digit, company prefix, item reference,
/// check digit.
pub fn generate_gtin14(
    indicator_digit: u8,
    company_prefix: &str,
    item_reference: u64,
) -> CoreResult<Identifier> {
    check_leading_digit("indicator_digit", indicator_digit)?;
    check_company_prefix(company_prefix)?;
    generate(
        IdentifierClass::Gtin14,
        &format!("{indicator_digit}{company_prefix}"),
        item_reference,
    )
}

fn check_company_prefix(company_prefix: &str) -> CoreResult<()> {
    ensure_digits("company_prefix", company_prefix)?;
    validate_company_prefix(company_prefix)?;
    Ok(())
}

fn check_leading_digit(field: &str, digit: u8) -> CoreResult<()> {
    if digit > 9 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 9,
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Splitting
// =============================================================================

/// Splits a validated identifier at a known company prefix length.
///
/// The SSCC extension digit and GTIN-14 indicator digit are reported
/// separately and never counted as part of the prefix.
pub fn split(identifier: &Identifier, prefix_length: usize) -> CoreResult<IdentifierParts> {
    validate_prefix_length(prefix_length)?;

    let class = identifier.class();
    let leading = class.leading_digits();
    let max_prefix = class.base_length() - leading;
    if prefix_length > max_prefix {
        return Err(ValidationError::OutOfRange {
            field: "company_prefix length".to_string(),
            min: crate::MIN_COMPANY_PREFIX_LEN as i64,
            max: max_prefix as i64,
        }
        .into());
    }

    let base = identifier.base();
    let leading_digit = (leading == 1).then(|| base.as_bytes()[0] - b'0');

    Ok(IdentifierParts {
        leading_digit,
        company_prefix: base[leading..leading + prefix_length].to_string(),
        reference: base[leading + prefix_length..].to_string(),
        check_digit: identifier.check_digit(),
    })
}

/// Company prefix of `identifier`, given its length.
pub fn company_prefix(identifier: &Identifier, prefix_length: usize) -> CoreResult<String> {
    split(identifier, prefix_length).map(|parts| parts.company_prefix)
}

/// Location / serial / item reference of `identifier`, given the prefix length.
pub fn reference(identifier: &Identifier, prefix_length: usize) -> CoreResult<String> {
    split(identifier, prefix_length).map(|parts| parts.reference)
}

// =============================================================================
// Quick Checks
// =============================================================================

/// 13 digits with a correct check digit.
pub fn is_valid_gln(gln: &str) -> bool {
    gln.len() == IdentifierClass::Gln.length() && validate_check_digit(gln)
}

/// 18 digits with a correct check digit.
pub fn is_valid_sscc(sscc: &str) -> bool {
    sscc.len() == IdentifierClass::Sscc.length() && validate_check_digit(sscc)
}

/// 8, 12, 13 or 14 digits with a correct check digit.
pub fn is_valid_gtin(gtin: &str) -> bool {
    IdentifierClass::gtin_for_length(gtin.len()).is_some() && validate_check_digit(gtin)
}

/// Parses a GTIN of any supported length and left-pads it to GTIN-14.
///
/// Padding never changes the check digit, so a valid GTIN-13 stays valid.
pub fn normalize_gtin(gtin: &str) -> CoreResult<Identifier> {
    let gtin = gtin.trim();
    if IdentifierClass::gtin_for_length(gtin.len()).is_none() {
        return Err(CoreError::InvalidLength {
            expected: IdentifierClass::Gtin14.length(),
            actual: gtin.len(),
        });
    }
    Identifier::parse(IdentifierClass::Gtin14, &format!("{gtin:0>14}"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_identifier_known_values() {
        assert_eq!(generate_identifier("73510020", 0, 13).unwrap(), "7351002000004");
        assert_eq!(generate_identifier("61640010", 0, 13).unwrap(), "6164001000006");
        assert_eq!(generate_identifier("61640030", 2, 13).unwrap(), "6164003000028");
        assert_eq!(generate_identifier("", 1, 13).unwrap(), "0000000000019");
    }

    #[test]
    fn test_generate_identifier_length_invariant() {
        for prefix in ["616400", "6164001", "61640010", "616400100", "6164001000"] {
            for reference in [0, 1, 42, 99] {
                let id = generate_identifier(prefix, reference, 13).unwrap();
                assert_eq!(id.len(), 13);
                assert!(id.starts_with(prefix));
                assert!(validate_check_digit(&id));
            }
        }
    }

    #[test]
    fn test_reference_width_boundary() {
        // 8-digit prefix leaves 4 reference digits in a GLN
        assert_eq!(generate_identifier("61640010", 9999, 13).unwrap(), "6164001099994");
        assert_eq!(
            generate_identifier("61640010", 10000, 13),
            Err(CoreError::ReferenceOverflow {
                reference: 10000,
                width: 4
            })
        );

        // ext + 8-digit prefix leaves 8 serial digits in an SSCC
        assert!(generate_identifier("061640010", 99_999_999, 18).is_ok());
        assert!(matches!(
            generate_identifier("061640010", 100_000_000, 18),
            Err(CoreError::ReferenceOverflow { width: 8, .. })
        ));
    }

    #[test]
    fn test_generate_identifier_rejects_bad_prefix() {
        assert!(matches!(
            generate_identifier("6164A010", 0, 13),
            Err(CoreError::NonNumeric { .. })
        ));
        assert!(matches!(
            generate_identifier("6164001000001", 0, 13),
            Err(CoreError::PrefixTooLong { max: 12, .. })
        ));
        assert!(matches!(
            generate_identifier("", 0, 1),
            Err(CoreError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_full_width_prefix_has_no_room_for_reference() {
        assert!(matches!(
            generate_identifier("616400100000", 0, 13),
            Err(CoreError::ReferenceOverflow { width: 0, .. })
        ));
    }

    #[test]
    fn test_generate_gln() {
        let gln = generate_gln("61640030", 5).unwrap();
        assert_eq!(gln.as_str(), "6164003000055");
        assert_eq!(gln.class(), IdentifierClass::Gln);

        assert_eq!(generate_hq_gln("61640040").unwrap().as_str(), "6164004000007");

        assert!(matches!(
            generate_gln("61640", 1),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(matches!(
            generate_gln("616A0010", 1),
            Err(CoreError::NonNumeric { .. })
        ));
    }

    #[test]
    fn test_generate_sscc() {
        let sscc = generate_sscc(0, "61640010", 1).unwrap();
        assert_eq!(sscc.as_str(), "061640010000000015");
        assert!(is_valid_sscc(sscc.as_str()));

        assert!(generate_sscc(10, "61640010", 1).is_err());
        assert!(generate_sscc(0, "61640010", 100_000_000).is_err());
    }

    #[test]
    fn test_generate_gtin14() {
        let gtin = generate_gtin14(0, "0614141", 12345).unwrap();
        assert_eq!(gtin.as_str(), "00614141123450");
        assert!(is_valid_gtin(gtin.as_str()));
    }

    #[test]
    fn test_split_gln() {
        let gln = generate_gln("61640030", 3).unwrap();
        let parts = split(&gln, 8).unwrap();
        assert_eq!(parts.leading_digit, None);
        assert_eq!(parts.company_prefix, "61640030");
        assert_eq!(parts.reference, "0003");
        assert_eq!(parts.check_digit, gln.check_digit());

        assert_eq!(company_prefix(&gln, 8).unwrap(), "61640030");
        assert_eq!(reference(&gln, 8).unwrap(), "0003");
    }

    #[test]
    fn test_split_sscc_skips_extension_digit() {
        let sscc = generate_sscc(3, "61640010", 77).unwrap();
        let parts = split(&sscc, 8).unwrap();
        assert_eq!(parts.leading_digit, Some(3));
        assert_eq!(parts.company_prefix, "61640010");
        assert_eq!(parts.reference, "00000077");
    }

    #[test]
    fn test_split_rejects_bad_prefix_length() {
        let gln = generate_gln("61640030", 3).unwrap();
        assert!(split(&gln, 5).is_err());
        assert!(split(&gln, 13).is_err());

        let gtin8 = Identifier::parse(IdentifierClass::Gtin8, "06141415").unwrap();
        assert!(split(&gtin8, 6).is_ok());
        assert!(split(&gtin8, 8).is_err());
    }

    #[test]
    fn test_quick_checks() {
        assert!(is_valid_gln("6164001000006"));
        assert!(!is_valid_gln("6164001000007"));
        assert!(!is_valid_gln("061640010000000015"));

        assert!(is_valid_gtin("06141415"));
        assert!(is_valid_gtin("0614141123450"));
        assert!(is_valid_gtin("06141411234566"));
        assert!(!is_valid_gtin("06141411234567"));
        assert!(!is_valid_gtin("0614141123456662"));
    }

    #[test]
    fn test_normalize_gtin() {
        let gtin = normalize_gtin("6141411234566").unwrap();
        assert_eq!(gtin.as_str(), "06141411234566");
        assert_eq!(gtin.class(), IdentifierClass::Gtin14);

        assert!(matches!(
            normalize_gtin("61414112345"),
            Err(CoreError::InvalidLength { .. })
        ));
        assert!(matches!(
            normalize_gtin("06141411234567"),
            Err(CoreError::CheckDigitMismatch { .. })
        ));
    }
}
