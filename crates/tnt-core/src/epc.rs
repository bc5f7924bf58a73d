//! # EPC Module
//!
//! EPC pure-identity URIs for serialised trade items, logistic units and
//! locations as exchanged in EPCIS events, plus the LGTIN class URI for a
//! batch.
//!
//! ## Layout
//! ```text
//! GTIN-14   0 │ 6141411 │ 23456 │ 6        + serial SN1
//!           ▲       ▲        ▲      ▲
//!   indicator   prefix   item ref  check (dropped)
//!
//! urn:epc:id:sgtin:6141411.023456.SN1      (prefix length 7)
//!
//! SSCC      0 │ 0614141 │ 123456789 │ 2
//! urn:epc:id:sscc:0614141.0123456789
//!
//! GLN         61640010 │ 0000 │ 6
//! urn:epc:id:sgln:61640010.0000.0          (extension 0 = no extension)
//!
//! urn:epc:class:lgtin:6141411.023456.LOT12 (GTIN + batch, no serial)
//! ```

use std::fmt;
use std::str::FromStr;

use crate::check_digit::check_digit_of;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::identifier::{normalize_gtin, split};
use crate::types::{Identifier, IdentifierClass};
use crate::validation::{
    validate_batch_number, validate_company_prefix, validate_serial_number,
};

const SGTIN_URN_PREFIX: &str = "urn:epc:id:sgtin:";
const SSCC_URN_PREFIX: &str = "urn:epc:id:sscc:";
const SGLN_URN_PREFIX: &str = "urn:epc:id:sgln:";
const LGTIN_URN_PREFIX: &str = "urn:epc:class:lgtin:";

/// Digits shared by company prefix and indicator + item reference.
const SGTIN_KEY_DIGITS: usize = 13;

/// Digits shared by company prefix and location reference.
const SGLN_KEY_DIGITS: usize = 12;

/// SGLN extension meaning "the location itself".
pub const NO_GLN_EXTENSION: &str = "0";

// =============================================================================
// SGTIN
// =============================================================================

/// A serialised GTIN.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sgtin {
    company_prefix: String,
    indicator: u8,
    item_reference: String,
    serial: String,
}

impl Sgtin {
    /// Builds an SGTIN from a GTIN of any supported length.
    ///
    /// ## Example
    /// ```rust
    /// use tnt_core::epc::Sgtin;
    ///
    /// let sgtin = Sgtin::from_gtin("06141411234566", "6141411", "SN1").unwrap();
    /// assert_eq!(sgtin.to_string(), "urn:epc:id:sgtin:6141411.023456.SN1");
    /// ```
    pub fn from_gtin(gtin: &str, company_prefix: &str, serial: &str) -> CoreResult<Self> {
        let gtin = normalize_gtin(gtin)?;
        validate_company_prefix(company_prefix)?;
        validate_serial_number(serial)?;

        let parts = split(&gtin, company_prefix.len())?;
        if parts.company_prefix != company_prefix {
            return Err(CoreError::PrefixMismatch {
                expected: company_prefix.to_string(),
                found: parts.company_prefix,
            });
        }

        Ok(Sgtin {
            company_prefix: parts.company_prefix,
            indicator: parts.leading_digit.unwrap_or(0),
            item_reference: parts.reference,
            serial: serial.to_string(),
        })
    }

    pub fn company_prefix(&self) -> &str {
        &self.company_prefix
    }

    pub fn indicator(&self) -> u8 {
        self.indicator
    }

    /// Item reference without the indicator digit.
    pub fn item_reference(&self) -> &str {
        &self.item_reference
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// The GTIN-14 this SGTIN serialises, check digit recomputed.
    pub fn gtin(&self) -> Identifier {
        let base = format!(
            "{}{}{}",
            self.indicator, self.company_prefix, self.item_reference
        );
        let check = check_digit_of(base.as_bytes());
        Identifier::from_trusted(IdentifierClass::Gtin14, format!("{base}{check}"))
    }
}

impl fmt::Display for Sgtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SGTIN_URN_PREFIX}{}.{}{}.{}",
            self.company_prefix, self.indicator, self.item_reference, self.serial
        )
    }
}

impl FromStr for Sgtin {
    type Err = CoreError;

    fn from_str(uri: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoreError::InvalidEpcUri {
            uri: uri.to_string(),
            reason: reason.to_string(),
        };

        let body = uri
            .strip_prefix(SGTIN_URN_PREFIX)
            .ok_or_else(|| invalid("expected urn:epc:id:sgtin: scheme"))?;

        let mut fields = body.splitn(3, '.');
        let (Some(prefix), Some(item), Some(serial)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(invalid("expected prefix.item.serial"));
        };

        if validate_company_prefix(prefix).is_err() {
            return Err(invalid("company prefix must be 6-12 digits"));
        }
        if item.is_empty() || !item.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("item reference must be digits"));
        }
        if prefix.len() + item.len() != SGTIN_KEY_DIGITS {
            return Err(invalid("prefix and item reference must total 13 digits"));
        }
        if let Err(err) = validate_serial_number(serial) {
            return Err(invalid(&err.to_string()));
        }

        Ok(Sgtin {
            company_prefix: prefix.to_string(),
            indicator: item.as_bytes()[0] - b'0',
            item_reference: item[1..].to_string(),
            serial: serial.to_string(),
        })
    }
}

// =============================================================================
// SSCC
// =============================================================================

/// `urn:epc:id:sscc:{prefix}.{extension}{serialRef}` for a valid SSCC.
///
/// ## Example
/// ```rust
/// use tnt_core::epc::sscc_epc_uri;
///
/// let uri = sscc_epc_uri("006141411234567892", 7).unwrap();
/// assert_eq!(uri, "urn:epc:id:sscc:0614141.0123456789");
/// ```
pub fn sscc_epc_uri(sscc: &str, prefix_length: usize) -> CoreResult<String> {
    let sscc = Identifier::parse(IdentifierClass::Sscc, sscc)?;
    let parts = split(&sscc, prefix_length)?;

    Ok(format!(
        "{SSCC_URN_PREFIX}{}.{}{}",
        parts.company_prefix,
        parts.leading_digit.unwrap_or(0),
        parts.reference
    ))
}

// =============================================================================
// SGLN
// =============================================================================

/// `urn:epc:id:sgln:{prefix}.{locationRef}.{extension}` for a valid GLN.
///
/// Pass [`NO_GLN_EXTENSION`] when the URI names the location itself.
///
/// ## Example
/// ```rust
/// use tnt_core::epc::{sgln_epc_uri, NO_GLN_EXTENSION};
///
/// let uri = sgln_epc_uri("6164001000006", 8, NO_GLN_EXTENSION).unwrap();
/// assert_eq!(uri, "urn:epc:id:sgln:61640010.0000.0");
/// ```
pub fn sgln_epc_uri(gln: &str, prefix_length: usize, extension: &str) -> CoreResult<String> {
    let gln = Identifier::parse(IdentifierClass::Gln, gln)?;
    check_gln_extension(extension)?;
    let parts = split(&gln, prefix_length)?;

    Ok(format!(
        "{SGLN_URN_PREFIX}{}.{}.{extension}",
        parts.company_prefix, parts.reference
    ))
}

/// The GLN an SGLN URI points at, with its check digit rebuilt.
///
/// The extension is checked but not returned; every extension of a
/// location maps to the same GLN.
///
/// ## Example
/// ```rust
/// use tnt_core::epc::gln_from_sgln_uri;
///
/// let gln = gln_from_sgln_uri("urn:epc:id:sgln:0614141.00000.0").unwrap();
/// assert_eq!(gln.as_str(), "0614141000007");
/// ```
pub fn gln_from_sgln_uri(uri: &str) -> CoreResult<Identifier> {
    let invalid = |reason: &str| CoreError::InvalidEpcUri {
        uri: uri.to_string(),
        reason: reason.to_string(),
    };

    let body = uri
        .strip_prefix(SGLN_URN_PREFIX)
        .ok_or_else(|| invalid("expected urn:epc:id:sgln: scheme"))?;

    let mut fields = body.splitn(3, '.');
    let (Some(prefix), Some(location), Some(extension)) =
        (fields.next(), fields.next(), fields.next())
    else {
        return Err(invalid("expected prefix.location.extension"));
    };

    if validate_company_prefix(prefix).is_err() {
        return Err(invalid("company prefix must be 6-12 digits"));
    }
    if !location.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("location reference must be digits"));
    }
    if prefix.len() + location.len() != SGLN_KEY_DIGITS {
        return Err(invalid("prefix and location reference must total 12 digits"));
    }
    if let Err(err) = check_gln_extension(extension) {
        return Err(invalid(&err.to_string()));
    }

    let base = format!("{prefix}{location}");
    let check = check_digit_of(base.as_bytes());
    Identifier::parse(IdentifierClass::Gln, &format!("{base}{check}"))
}

/// Extensions follow the serial rules (AI 254 shares the X..20 limit).
fn check_gln_extension(extension: &str) -> Result<(), ValidationError> {
    validate_serial_number(extension).map_err(|_| ValidationError::InvalidFormat {
        field: "gln_extension".to_string(),
        reason: "must be 1-20 characters without whitespace or '.'".to_string(),
    })
}

// =============================================================================
// LGTIN
// =============================================================================

/// `urn:epc:class:lgtin:{prefix}.{indicator}{itemRef}.{batch}` for a GTIN
/// and a batch / lot number.
///
/// ## Example
/// ```rust
/// use tnt_core::epc::lgtin_epc_uri;
///
/// let uri = lgtin_epc_uri("06141411234566", "614141", "BATCH-241219-K3P9QZ").unwrap();
/// assert_eq!(uri, "urn:epc:class:lgtin:614141.0123456.BATCH-241219-K3P9QZ");
/// ```
pub fn lgtin_epc_uri(gtin: &str, company_prefix: &str, batch: &str) -> CoreResult<String> {
    validate_batch_number(batch)?;
    let sgtin = Sgtin::from_gtin(gtin, company_prefix, batch.trim())?;

    Ok(format!(
        "{LGTIN_URN_PREFIX}{}.{}{}.{}",
        sgtin.company_prefix, sgtin.indicator, sgtin.item_reference, sgtin.serial
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================
