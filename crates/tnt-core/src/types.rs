//! # Domain Types
//!
//! Core GS1 types used throughout Kenya TNT.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ IdentifierClass │   │   Identifier    │   │  ParsedBarcode  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Gln     (13)   │   │  class          │   │  gtin / sscc    │       │
//! │  │  Sscc    (18)   │   │  digits (valid  │   │  batch / serial │       │
//! │  │  Gtin8..Gtin14  │   │   check digit)  │   │  dates / GLNs   │       │
//! │  └─────────────────┘   └─────────────────┘   │  warnings       │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CodeType     │   │  BarcodeFormat  │   │  ParseWarning   │       │
//! │  │  GTIN SSCC GLN  │   │  Traditional    │   │  non-fatal scan │       │
//! │  │  GDTI GSIN      │   │  Digital Link   │   │  problems       │       │
//! │  └─────────────────┘   │  Plain          │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::check_digit::{check_digit_of, ensure_digits};
use crate::error::{CoreError, CoreResult};

// =============================================================================
// Identifier Class
// =============================================================================

/// The GS1 key classes handled by the toolkit, each with a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierClass {
    /// Global Location Number (13 digits).
    Gln,
    /// Serial Shipping Container Code (18 digits).
    Sscc,
    Gtin8,
    Gtin12,
    Gtin13,
    Gtin14,
}

impl IdentifierClass {
    /// Total digit count including the check digit.
    #[inline]
    pub const fn length(self) -> usize {
        match self {
            IdentifierClass::Gln => 13,
            IdentifierClass::Sscc => 18,
            IdentifierClass::Gtin8 => 8,
            IdentifierClass::Gtin12 => 12,
            IdentifierClass::Gtin13 => 13,
            IdentifierClass::Gtin14 => 14,
        }
    }

    /// Digit count of the base (everything but the check digit).
    #[inline]
    pub const fn base_length(self) -> usize {
        self.length() - 1
    }

    /// Number of leading digits that sit in front of the company prefix
    /// (SSCC extension digit, GTIN-14 indicator digit).
    #[inline]
    pub const fn leading_digits(self) -> usize {
        match self {
            IdentifierClass::Sscc | IdentifierClass::Gtin14 => 1,
            _ => 0,
        }
    }

    /// GTIN class for a digit count, if it is one of 8, 12, 13, 14.
    pub const fn gtin_for_length(len: usize) -> Option<Self> {
        match len {
            8 => Some(IdentifierClass::Gtin8),
            12 => Some(IdentifierClass::Gtin12),
            13 => Some(IdentifierClass::Gtin13),
            14 => Some(IdentifierClass::Gtin14),
            _ => None,
        }
    }
}

impl fmt::Display for IdentifierClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdentifierClass::Gln => "GLN",
            IdentifierClass::Sscc => "SSCC",
            IdentifierClass::Gtin8 => "GTIN-8",
            IdentifierClass::Gtin12 => "GTIN-12",
            IdentifierClass::Gtin13 => "GTIN-13",
            IdentifierClass::Gtin14 => "GTIN-14",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Identifier
// =============================================================================

/// A complete GS1 key whose check digit is known to be correct.
///
/// Only built through [`Identifier::parse`] or the generators in
/// [`crate::identifier`], so holding one means the digits are valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier {
    class: IdentifierClass,
    digits: String,
}

impl Identifier {
    /// Parses and verifies a full identifier of the given class.
    ///
    /// ## Example
    /// ```rust
    /// use tnt_core::types::{Identifier, IdentifierClass};
    ///
    /// let gln = Identifier::parse(IdentifierClass::Gln, "6164001000006").unwrap();
    /// assert_eq!(gln.check_digit(), 6);
    /// assert!(Identifier::parse(IdentifierClass::Gln, "6164001000007").is_err());
    /// ```
    pub fn parse(class: IdentifierClass, value: &str) -> CoreResult<Self> {
        let value = value.trim();
        if value.len() != class.length() {
            return Err(CoreError::InvalidLength {
                expected: class.length(),
                actual: value.len(),
            });
        }
        ensure_digits("identifier", value)?;

        let (base, claimed) = value.split_at(class.base_length());
        let expected = check_digit_of(base.as_bytes());
        let found = claimed.as_bytes()[0] - b'0';
        if expected != found {
            return Err(CoreError::CheckDigitMismatch {
                identifier: value.to_string(),
                expected,
                found,
            });
        }

        Ok(Identifier {
            class,
            digits: value.to_string(),
        })
    }

    /// Builds an identifier from digits the caller has just computed.
    pub(crate) fn from_trusted(class: IdentifierClass, digits: String) -> Self {
        debug_assert_eq!(digits.len(), class.length());
        Identifier { class, digits }
    }

    #[inline]
    pub fn class(&self) -> IdentifierClass {
        self.class
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// All digits except the check digit.
    #[inline]
    pub fn base(&self) -> &str {
        &self.digits[..self.class.base_length()]
    }

    /// The trailing check digit.
    #[inline]
    pub fn check_digit(&self) -> u8 {
        self.digits.as_bytes()[self.class.base_length()] - b'0'
    }

    pub fn into_string(self) -> String {
        self.digits
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.digits
    }
}

/// The parts of an identifier once the company prefix length is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierParts {
    /// Extension digit (SSCC) or indicator digit (GTIN-14), if the class has one.
    pub leading_digit: Option<u8>,
    pub company_prefix: String,
    /// Location, serial or item reference, zero-padded.
    pub reference: String,
    pub check_digit: u8,
}

// =============================================================================
// Barcode Types
// =============================================================================

/// Primary GS1 key found in a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum CodeType {
    Gtin,
    Sscc,
    Gdti,
    Gsin,
    Gln,
}

/// Encoding the scanned data arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BarcodeFormat {
    /// GS1 element string, bracketed or FNC1-separated.
    Traditional,
    #[serde(rename = "Digital Link")]
    DigitalLink,
    /// A bare GTIN or SSCC.
    Plain,
}

/// A non-fatal problem found while parsing a scan.
///
/// The offending field is still returned (truncated where noted) so the
/// caller can decide what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// The key's trailing digit does not match its recomputed check digit.
    CheckDigitMismatch { ai: String, value: String },
    /// A fixed-length key arrived with the wrong digit count.
    InvalidLength { ai: String, expected: usize, actual: usize },
    /// The value exceeded its AI maximum and was truncated.
    FieldTooLong { ai: String, max: usize, actual: usize },
    /// A YYMMDD value that is not a calendar date.
    InvalidDate { ai: String, value: String },
    /// A numeric AI carried other characters.
    NonNumeric { ai: String, value: String },
    /// Leading characters that are not a known AI; element-string parsing
    /// stopped there.
    UnknownApplicationIdentifier { ai: String },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::CheckDigitMismatch { ai, value } => {
                write!(f, "AI ({ai}) check digit mismatch: {value}")
            }
            ParseWarning::InvalidLength { ai, expected, actual } => {
                write!(f, "AI ({ai}) expects {expected} digits, got {actual}")
            }
            ParseWarning::FieldTooLong { ai, max, actual } => {
                write!(f, "AI ({ai}) value exceeds max length {max} ({actual} chars)")
            }
            ParseWarning::InvalidDate { ai, value } => {
                write!(f, "AI ({ai}) is not a valid YYMMDD date: {value}")
            }
            ParseWarning::NonNumeric { ai, value } => {
                write!(f, "AI ({ai}) must be numeric: {value}")
            }
            ParseWarning::UnknownApplicationIdentifier { ai } => {
                write!(f, "Unknown application identifier: {ai}")
            }
        }
    }
}

/// Fields recovered from a GS1 barcode scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParsedBarcode {
    /// GTIN, always left-padded to 14 digits.
    pub gtin: Option<String>,
    pub sscc: Option<String>,
    pub serial_number: Option<String>,
    /// ISO dates (YYYY-MM-DD).
    pub expiry_date: Option<String>,
    pub batch_number: Option<String>,
    pub production_date: Option<String>,
    pub best_before_date: Option<String>,
    pub packaging_date: Option<String>,
    /// e.g. "12.34 kg"
    pub net_weight: Option<String>,
    pub trade_item_count: Option<String>,
    pub gdti: Option<String>,
    pub gsin: Option<String>,
    pub gln_ship_to: Option<String>,
    pub gln_bill_to: Option<String>,
    pub gln_purchase_from: Option<String>,
    pub gln_ship_for: Option<String>,
    pub gln_physical: Option<String>,
    pub gln_invoicing: Option<String>,
    /// The scan exactly as received.
    pub raw_data: String,
    pub code_type: Option<CodeType>,
    pub format: Option<BarcodeFormat>,
    #[serde(default)]
    pub validation_warnings: Vec<ParseWarning>,
}

impl ParsedBarcode {
    /// Empty result for `raw`.
    pub fn new(raw: impl Into<String>, format: BarcodeFormat) -> Self {
        ParsedBarcode {
            raw_data: raw.into(),
            format: Some(format),
            ..Default::default()
        }
    }

    /// True when at least one of the six party / location GLNs is present.
    pub fn has_gln(&self) -> bool {
        [
            &self.gln_ship_to,
            &self.gln_bill_to,
            &self.gln_purchase_from,
            &self.gln_ship_for,
            &self.gln_physical,
            &self.gln_invoicing,
        ]
        .iter()
        .any(|gln| gln.is_some())
    }

    /// True when the scan raised no warnings.
    pub fn is_clean(&self) -> bool {
        self.validation_warnings.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
