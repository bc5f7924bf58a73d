//! # Barcode Module
//!
//! Parses what a scanner hands over into a [`ParsedBarcode`].
//!
//! ## Accepted Inputs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Digital Link   https://id.gs1.org/01/06141411234566/10/LOT1?17=251231 │
//! │  Plain SSCC     006141411234567892                                      │
//! │  Plain GTIN     06141415 | 614141123450 | 6141411234566 | 0614141...   │
//! │  Bracketed      (01)06141411234566(17)251231(10)LOT12345                │
//! │  FNC1           ]d2 01 06141411234566 17 251231 10 LOT12345 <GS> 21 SN1 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parsing never fails. Anything suspicious (a wrong check digit, an
//! overlong batch, an impossible date) is recorded as a [`ParseWarning`] and
//! the rest of the scan is still returned, so a damaged label can be
//! inspected instead of rejected.

use chrono::NaiveDate;
use percent_encoding::percent_decode_str;
use url::Url;

use crate::check_digit::validate_check_digit;
use crate::types::{BarcodeFormat, CodeType, IdentifierClass, ParseWarning, ParsedBarcode};
use crate::validation::ai_max_length;

/// FNC1 stand-ins that terminate variable-length fields.
const SEPARATORS: [char; 3] = ['\x1D', '\x1E', '\x1F'];

/// Symbology identifiers some scanners prepend (DataMatrix, GS1-128, QR, DataBar).
const SYMBOLOGY_IDENTIFIERS: [&str; 4] = ["]d2", "]C1", "]Q3", "]e0"];

// =============================================================================
// Application Identifiers
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueLength {
    Fixed(usize),
    Variable,
}

/// Value length of a supported AI, or `None` if the AI is not supported.
fn value_length(ai: &str) -> Option<ValueLength> {
    match ai {
        "00" => Some(ValueLength::Fixed(18)),
        "01" => Some(ValueLength::Fixed(14)),
        "11" | "13" | "15" | "17" => Some(ValueLength::Fixed(6)),
        "10" | "21" | "37" | "253" => Some(ValueLength::Variable),
        "402" => Some(ValueLength::Fixed(17)),
        "410" | "411" | "412" | "413" | "414" | "415" => Some(ValueLength::Fixed(13)),
        _ if net_weight_decimals(ai).is_some() => Some(ValueLength::Fixed(6)),
        _ => None,
    }
}

/// Decimal places of a `310n` net weight AI. A bare `310` has none.
fn net_weight_decimals(ai: &str) -> Option<u32> {
    let n = ai.strip_prefix("310")?;
    match n.as_bytes() {
        [] => Some(0),
        [d @ b'0'..=b'5'] => Some(u32::from(d - b'0')),
        _ => None,
    }
}

/// The supported AI at the start of `data`. `310` is a prefix of `3100`..`3105`
/// and an element string always carries the decimals digit, so the longest
/// match wins.
fn leading_ai(data: &str) -> Option<&str> {
    [4, 3, 2]
        .into_iter()
        .filter(|&len| data.is_char_boundary(len))
        .map(|len| &data[..len])
        .find(|ai| value_length(ai).is_some())
}

// =============================================================================
// Entry Point
// =============================================================================

/// Parses any supported GS1 barcode representation.
///
/// ## Example
/// ```rust
/// use tnt_core::barcode::parse_barcode;
/// use tnt_core::types::{BarcodeFormat, CodeType};
///
/// let parsed = parse_barcode("(01)06141411234566(17)251231(10)LOT12345");
/// assert_eq!(parsed.gtin.as_deref(), Some("06141411234566"));
/// assert_eq!(parsed.expiry_date.as_deref(), Some("2025-12-31"));
/// assert_eq!(parsed.batch_number.as_deref(), Some("LOT12345"));
/// assert_eq!(parsed.code_type, Some(CodeType::Gtin));
/// assert_eq!(parsed.format, Some(BarcodeFormat::Traditional));
/// assert!(parsed.validation_warnings.is_empty());
/// ```
pub fn parse_barcode(data: &str) -> ParsedBarcode {
    let mut result = parse_formats(data);
    result.code_type = classify(&result);
    result
}

fn parse_formats(data: &str) -> ParsedBarcode {
    if data.starts_with("http://") || data.starts_with("https://") {
        if let Some(result) = parse_digital_link(data) {
            return result;
        }
    }

    let trimmed = data.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        if trimmed.len() == IdentifierClass::Sscc.length() {
            let mut result = ParsedBarcode::new(data, BarcodeFormat::Plain);
            apply_element("00", trimmed, &mut result);
            return result;
        }
        if IdentifierClass::gtin_for_length(trimmed.len()).is_some() {
            let mut result = ParsedBarcode::new(data, BarcodeFormat::Plain);
            apply_element("01", trimmed, &mut result);
            return result;
        }
    }

    let mut result = ParsedBarcode::new(data, BarcodeFormat::Traditional);
    if trimmed.contains('(') {
        parse_bracketed(trimmed, &mut result);
    } else {
        parse_separated(trimmed, &mut result);
    }
    result
}

/// Primary key of the scan: GSIN > GDTI > SSCC > GTIN > GLN.
fn classify(result: &ParsedBarcode) -> Option<CodeType> {
    if result.gsin.is_some() {
        Some(CodeType::Gsin)
    } else if result.gdti.is_some() {
        Some(CodeType::Gdti)
    } else if result.sscc.is_some() {
        Some(CodeType::Sscc)
    } else if result.gtin.is_some() {
        Some(CodeType::Gtin)
    } else if result.has_gln() {
        Some(CodeType::Gln)
    } else {
        None
    }
}

// =============================================================================
// Formats
// =============================================================================

/// `https://id.gs1.org/01/{gtin}/10/{batch}?17={expiry}`
///
/// Returns `None` for URLs that are not Digital Links so the caller can try
/// the other formats.
fn parse_digital_link(data: &str) -> Option<ParsedBarcode> {
    let url = Url::parse(data).ok()?;
    let host = url.host_str().unwrap_or_default();
    if !host.contains("gs1.org") && !url.path().contains("/01/") && !url.path().contains("/00/") {
        return None;
    }

    let mut result = ParsedBarcode::new(data, BarcodeFormat::DigitalLink);

    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    // Tolerates a path prefix before the first AI (e.g. /brand/01/...).
    let mut i = 0;
    while i < segments.len() {
        let ai = segments[i];
        match segments.get(i + 1) {
            Some(value) if value_length(ai).is_some() => {
                let value = percent_decode_str(value).decode_utf8_lossy();
                apply_element(ai, &value, &mut result);
                i += 2;
            }
            _ => i += 1,
        }
    }

    for (ai, value) in url.query_pairs() {
        if value_length(&ai).is_some() {
            apply_element(&ai, &value, &mut result);
        }
    }

    Some(result)
}

/// `(01)06141411234566(17)251231(10)LOT12345`
fn parse_bracketed(data: &str, result: &mut ParsedBarcode) {
    for segment in data.split('(').skip(1) {
        let Some((ai, value)) = segment.split_once(')') else {
            continue;
        };

        if value_length(ai).is_none() {
            result
                .validation_warnings
                .push(ParseWarning::UnknownApplicationIdentifier { ai: ai.to_string() });
            continue;
        }

        apply_element(ai, value.trim_matches(SEPARATORS), result);
    }
}

/// Raw element string. Fixed-length values need no terminator; variable
/// values end at a separator or at the end of the data.
fn parse_separated(data: &str, result: &mut ParsedBarcode) {
    let mut rest = SYMBOLOGY_IDENTIFIERS
        .iter()
        .find_map(|id| data.strip_prefix(*id))
        .unwrap_or(data)
        .trim_start_matches(SEPARATORS);

    while !rest.is_empty() {
        let Some(ai) = leading_ai(rest) else {
            result
                .validation_warnings
                .push(ParseWarning::UnknownApplicationIdentifier {
                    ai: rest.chars().take(4).collect(),
                });
            return;
        };

        let after_ai = &rest[ai.len()..];
        let (value, next) = match value_length(ai) {
            Some(ValueLength::Fixed(len)) => split_at_char(after_ai, len),
            _ => after_ai.split_at(after_ai.find(SEPARATORS).unwrap_or(after_ai.len())),
        };

        apply_element(ai, value, result);
        rest = next.trim_start_matches(SEPARATORS);
    }
}

fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let idx = s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    s.split_at(idx)
}

// =============================================================================
// Field Handling
// =============================================================================

/// Stores one AI value on `result`, recording warnings as it goes.
fn apply_element(ai: &str, value: &str, result: &mut ParsedBarcode) {
    let warnings = &mut result.validation_warnings;

    match ai {
        "00" => {
            let length = IdentifierClass::Sscc.length();
            result.sscc = Some(checked_key(ai, value, length, warnings));
        }
        "01" => result.gtin = Some(checked_gtin(value, warnings)),
        "10" => result.batch_number = Some(limited(ai, value.trim(), warnings)),
        "21" => result.serial_number = Some(limited(ai, value.trim(), warnings)),
        "11" => result.production_date = Some(resolve_date(ai, value, warnings)),
        "13" => result.packaging_date = Some(resolve_date(ai, value, warnings)),
        "15" => result.best_before_date = Some(resolve_date(ai, value, warnings)),
        "17" => result.expiry_date = Some(resolve_date(ai, value, warnings)),
        "37" => {
            let count = limited(ai, value, warnings);
            if !is_digits(&count) {
                warnings.push(ParseWarning::NonNumeric {
                    ai: ai.to_string(),
                    value: count.clone(),
                });
            }
            result.trade_item_count = Some(count);
        }
        "253" => {
            let gdti = limited(ai, value, warnings);
            let key: String = gdti.chars().take(13).collect();
            checked_key(ai, &key, 13, warnings);
            result.gdti = Some(gdti);
        }
        "402" => result.gsin = Some(checked_key(ai, value, 17, warnings)),
        "410" => result.gln_ship_to = Some(checked_key(ai, value, 13, warnings)),
        "411" => result.gln_bill_to = Some(checked_key(ai, value, 13, warnings)),
        "412" => result.gln_purchase_from = Some(checked_key(ai, value, 13, warnings)),
        "413" => result.gln_ship_for = Some(checked_key(ai, value, 13, warnings)),
        "414" => result.gln_physical = Some(checked_key(ai, value, 13, warnings)),
        "415" => result.gln_invoicing = Some(checked_key(ai, value, 13, warnings)),
        _ => {
            if let Some(decimals) = net_weight_decimals(ai) {
                match format_net_weight(value, decimals) {
                    Some(weight) => result.net_weight = Some(weight),
                    None => warnings.push(ParseWarning::NonNumeric {
                        ai: ai.to_string(),
                        value: value.to_string(),
                    }),
                }
            }
        }
    }
}

/// Numeric key of a fixed length ending in a check digit.
fn checked_key(ai: &str, value: &str, expected: usize, warnings: &mut Vec<ParseWarning>) -> String {
    if !is_digits(value) {
        warnings.push(ParseWarning::NonNumeric {
            ai: ai.to_string(),
            value: value.to_string(),
        });
    } else if value.len() != expected {
        warnings.push(ParseWarning::InvalidLength {
            ai: ai.to_string(),
            expected,
            actual: value.len(),
        });
    } else if !validate_check_digit(value) {
        warnings.push(ParseWarning::CheckDigitMismatch {
            ai: ai.to_string(),
            value: value.to_string(),
        });
    }
    value.to_string()
}

/// GTIN-8/12/13/14, left-padded to 14 digits.
fn checked_gtin(value: &str, warnings: &mut Vec<ParseWarning>) -> String {
    let padded = if is_digits(value) && IdentifierClass::gtin_for_length(value.len()).is_some() {
        format!("{value:0>14}")
    } else {
        value.to_string()
    };
    checked_key("01", &padded, IdentifierClass::Gtin14.length(), warnings)
}

/// Truncates a variable-length value to its AI maximum.
fn limited(ai: &str, value: &str, warnings: &mut Vec<ParseWarning>) -> String {
    let actual = value.chars().count();
    match ai_max_length(ai) {
        Some(max) if actual > max => {
            warnings.push(ParseWarning::FieldTooLong {
                ai: ai.to_string(),
                max,
                actual,
            });
            value.chars().take(max).collect()
        }
        _ => value.to_string(),
    }
}

/// `YYMMDD` to `20YY-MM-DD`. Day `00` means the last day of the month.
/// Impossible dates keep the raw value.
fn resolve_date(ai: &str, value: &str, warnings: &mut Vec<ParseWarning>) -> String {
    match parse_gs1_date(value) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => {
            warnings.push(ParseWarning::InvalidDate {
                ai: ai.to_string(),
                value: value.to_string(),
            });
            value.to_string()
        }
    }
}

fn parse_gs1_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 6 || !is_digits(value) {
        return None;
    }

    let year = 2000 + value[0..2].parse::<i32>().ok()?;
    let month: u32 = value[2..4].parse().ok()?;
    let day: u32 = value[4..6].parse().ok()?;

    if day != 0 {
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month.checked_add(1)?, 1)
    };
    // Reject month 0 / 13+ before stepping back a day.
    NaiveDate::from_ymd_opt(year, month, 1)?;
    first_of_next?.pred_opt()
}

/// `001234` with 2 decimals renders as `12.34 kg`.
fn format_net_weight(value: &str, decimals: u32) -> Option<String> {
    if !is_digits(value) {
        return None;
    }
    let raw: u64 = value.parse().ok()?;
    let scale = 10u64.pow(decimals);
    let (whole, fraction) = (raw / scale, raw % scale);

    if fraction == 0 {
        return Some(format!("{whole} kg"));
    }
    let fraction = format!("{:0width$}", fraction, width = decimals as usize);
    Some(format!("{whole}.{} kg", fraction.trim_end_matches('0')))
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// Helpers for Callers
// =============================================================================

/// True when the scan yielded at least one key or a batch / serial number.
pub fn is_valid_gs1_data(data: &ParsedBarcode) -> bool {
    data.gtin.is_some()
        || data.sscc.is_some()
        || data.serial_number.is_some()
        || data.batch_number.is_some()
        || data.gdti.is_some()
        || data.gsin.is_some()
        || data.has_gln()
}

/// `06141411234566` → `0-6141-4112-3456-6`. Other input is returned as is.
pub fn format_gtin(gtin: &str) -> String {
    if gtin.len() != 14 || !is_digits(gtin) {
        return gtin.to_string();
    }
    format!(
        "{}-{}-{}-{}-{}",
        &gtin[0..1],
        &gtin[1..5],
        &gtin[5..9],
        &gtin[9..13],
        &gtin[13..]
    )
}

/// `006141411234567892` → `0-061414112-3456789-2`. Other input is returned as is.
pub fn format_sscc(sscc: &str) -> String {
    if sscc.len() != 18 || !is_digits(sscc) {
        return sscc.to_string();
    }
    format!("{}-{}-{}-{}", &sscc[0..1], &sscc[1..10], &sscc[10..17], &sscc[17..])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const GTIN: &str = "06141411234566";
    const BAD_GTIN: &str = "06141411234567";
    const SSCC: &str = "006141411234567892";

    #[test]
    fn test_plain_sscc() {
        let parsed = parse_barcode(SSCC);
        assert_eq!(parsed.sscc.as_deref(), Some(SSCC));
        assert_eq!(parsed.code_type, Some(CodeType::Sscc));
        assert_eq!(parsed.format, Some(BarcodeFormat::Plain));
        assert_eq!(parsed.raw_data, SSCC);
        assert!(parsed.is_clean());
    }

    #[test]
    fn test_plain_gtins_are_padded() {
        assert_eq!(parse_barcode(GTIN).gtin.as_deref(), Some(GTIN));
        assert_eq!(parse_barcode("6141411234566").gtin.as_deref(), Some(GTIN));
        assert_eq!(
            parse_barcode("614141123450").gtin.as_deref(),
            Some("00614141123450")
        );

        let gtin8 = parse_barcode("06141415");
        assert_eq!(gtin8.gtin.as_deref(), Some("00000006141415"));
        assert_eq!(gtin8.code_type, Some(CodeType::Gtin));
        assert_eq!(gtin8.format, Some(BarcodeFormat::Plain));
        assert!(gtin8.is_clean());
    }

    #[test]
    fn test_plain_gtin_with_bad_check_digit_still_parses() {
        let parsed = parse_barcode(BAD_GTIN);
        assert_eq!(parsed.gtin.as_deref(), Some(BAD_GTIN));
        assert_eq!(
            parsed.validation_warnings,
            vec![ParseWarning::CheckDigitMismatch {
                ai: "01".to_string(),
                value: BAD_GTIN.to_string(),
            }]
        );
    }

    #[test]
    fn test_bracketed_gtin_batch_expiry() {
        let parsed = parse_barcode("(01)06141411234566(17)251231(10)LOT12345");
        assert_eq!(parsed.gtin.as_deref(), Some(GTIN));
        assert_eq!(parsed.batch_number.as_deref(), Some("LOT12345"));
        assert_eq!(parsed.expiry_date.as_deref(), Some("2025-12-31"));
        assert_eq!(parsed.code_type, Some(CodeType::Gtin));
        assert_eq!(parsed.format, Some(BarcodeFormat::Traditional));
        assert!(parsed.is_clean());
    }

    #[test]
    fn test_bracketed_short_gtin_is_padded() {
        let parsed = parse_barcode("(01)6141411234566(21)SN123456789");
        assert_eq!(parsed.gtin.as_deref(), Some(GTIN));
        assert_eq!(parsed.serial_number.as_deref(), Some("SN123456789"));
    }

    #[test]
    fn test_bracketed_sscc_wins_code_type() {
        let parsed = parse_barcode("(00)006141411234567892(10)BATCH123(17)260630");
        assert_eq!(parsed.sscc.as_deref(), Some(SSCC));
        assert_eq!(parsed.batch_number.as_deref(), Some("BATCH123"));
        assert_eq!(parsed.expiry_date.as_deref(), Some("2026-06-30"));
        assert_eq!(parsed.code_type, Some(CodeType::Sscc));
    }

    #[test]
    fn test_separated_element_string() {
        let parsed = parse_barcode("01061414112345661725123110LOT12345\x1D21SN123456789");
        assert_eq!(parsed.gtin.as_deref(), Some(GTIN));
        assert_eq!(parsed.expiry_date.as_deref(), Some("2025-12-31"));
        assert_eq!(parsed.batch_number.as_deref(), Some("LOT12345"));
        assert_eq!(parsed.serial_number.as_deref(), Some("SN123456789"));
        assert_eq!(parsed.format, Some(BarcodeFormat::Traditional));
        assert!(parsed.is_clean());
    }

    #[test]
    fn test_separated_with_symbology_identifier_and_other_separators() {
        for data in [
            "]d20106141411234566\x1E10LOT12345\x1F21SN1",
            "\x1D0106141411234566\x1D10LOT12345\x1D21SN1",
            "]C10106141411234566",
        ] {
            let parsed = parse_barcode(data);
            assert_eq!(parsed.gtin.as_deref(), Some(GTIN), "input {data:?}");
            assert!(parsed.is_clean(), "input {data:?}");
        }
    }

    #[test]
    fn test_all_dates() {
        let parsed = parse_barcode("(11)250101(13)250201(15)250301(17)250401");
        assert_eq!(parsed.production_date.as_deref(), Some("2025-01-01"));
        assert_eq!(parsed.packaging_date.as_deref(), Some("2025-02-01"));
        assert_eq!(parsed.best_before_date.as_deref(), Some("2025-03-01"));
        assert_eq!(parsed.expiry_date.as_deref(), Some("2025-04-01"));
    }

    #[test]
    fn test_day_zero_is_end_of_month() {
        assert_eq!(
            parse_barcode("(17)250200").expiry_date.as_deref(),
            Some("2025-02-28")
        );
        assert_eq!(
            parse_barcode("(17)241200").expiry_date.as_deref(),
            Some("2024-12-31")
        );
    }

    #[test]
    fn test_invalid_date_keeps_raw_value() {
        let parsed = parse_barcode("(01)06141411234566(17)251332");
        assert_eq!(parsed.expiry_date.as_deref(), Some("251332"));
        assert_eq!(
            parsed.validation_warnings,
            vec![ParseWarning::InvalidDate {
                ai: "17".to_string(),
                value: "251332".to_string(),
            }]
        );
        assert_eq!(parse_barcode("(17)251300").validation_warnings.len(), 1);
    }

    #[test]
    fn test_net_weight() {
        assert_eq!(
            parse_barcode("(3102)001234").net_weight.as_deref(),
            Some("12.34 kg")
        );
        assert_eq!(
            parse_barcode("0106141411234566\x1D3100000015").net_weight.as_deref(),
            Some("15 kg")
        );
        assert_eq!(
            parse_barcode("(3103)001500").net_weight.as_deref(),
            Some("1.5 kg")
        );
    }

    #[test]
    fn test_bare_net_weight_ai_has_no_decimals() {
        let parsed = parse_barcode("(01)06141411234566(310)000015");
        assert_eq!(parsed.net_weight.as_deref(), Some("15 kg"));
        assert!(parsed.validation_warnings.is_empty());

        let parsed = parse_barcode("https://id.gs1.org/01/06141411234566?310=000250");
        assert_eq!(parsed.net_weight.as_deref(), Some("250 kg"));
    }

    #[test]
    fn test_separated_net_weight_keeps_decimals_digit() {
        let parsed = parse_barcode("310200123410LOT7");
        assert_eq!(parsed.net_weight.as_deref(), Some("12.34 kg"));
        assert_eq!(parsed.batch_number.as_deref(), Some("LOT7"));
    }

    #[test]
    fn test_trade_item_count() {
        let parsed = parse_barcode("(01)06141411234566(37)100");
        assert_eq!(parsed.trade_item_count.as_deref(), Some("100"));
        assert!(parsed.is_clean());
    }

    #[test]
    fn test_party_glns() {
        let parsed = parse_barcode("(410)0614141000007(411)0614141000016(412)0614141000025");
        assert_eq!(parsed.gln_ship_to.as_deref(), Some("0614141000007"));
        assert_eq!(parsed.gln_bill_to.as_deref(), Some("0614141000016"));
        assert_eq!(parsed.gln_purchase_from.as_deref(), Some("0614141000025"));
        assert_eq!(parsed.code_type, Some(CodeType::Gln));
        assert!(parsed.is_clean());

        let separated = parse_barcode("4140614141000007415061414100002541306141410000");
        assert_eq!(separated.gln_physical.as_deref(), Some("0614141000007"));
        assert_eq!(separated.gln_invoicing.as_deref(), Some("0614141000025"));
        assert_eq!(separated.gln_ship_for.as_deref(), Some("06141410000"));
        assert!(matches!(
            separated.validation_warnings.as_slice(),
            [ParseWarning::InvalidLength { expected: 13, actual: 11, .. }]
        ));
    }

    #[test]
    fn test_gdti_and_gsin() {
        let gdti = parse_barcode("(253)0614141123450SERIAL123");
        assert_eq!(gdti.gdti.as_deref(), Some("0614141123450SERIAL123"));
        assert_eq!(gdti.code_type, Some(CodeType::Gdti));
        assert!(gdti.is_clean());

        let gsin = parse_barcode("(402)06141411234567892");
        assert_eq!(gsin.gsin.as_deref(), Some("06141411234567892"));
        assert_eq!(gsin.code_type, Some(CodeType::Gsin));
        assert!(gsin.is_clean());
    }

    #[test]
    fn test_overlong_batch_is_truncated() {
        let batch = "ABCDEFGHIJKLMNOPQRSTUVWXY";
        let parsed = parse_barcode(&format!("(01)06141411234566(10){batch}"));
        assert_eq!(parsed.batch_number.as_deref(), Some(&batch[..20]));
        assert_eq!(
            parsed.validation_warnings,
            vec![ParseWarning::FieldTooLong {
                ai: "10".to_string(),
                max: 20,
                actual: 25,
            }]
        );
    }

    #[test]
    fn test_bad_sscc_check_digit_is_a_warning() {
        let parsed = parse_barcode("(00)006141411234567895(10)BATCH123");
        assert_eq!(parsed.sscc.as_deref(), Some("006141411234567895"));
        assert_eq!(parsed.batch_number.as_deref(), Some("BATCH123"));
        assert!(matches!(
            parsed.validation_warnings.as_slice(),
            [ParseWarning::CheckDigitMismatch { ai, .. }] if ai == "00"
        ));
    }

    #[test]
    fn test_unknown_ai_stops_separated_parsing() {
        let parsed = parse_barcode("010614141123456699ABC");
        assert_eq!(parsed.gtin.as_deref(), Some(GTIN));
        assert_eq!(
            parsed.validation_warnings,
            vec![ParseWarning::UnknownApplicationIdentifier {
                ai: "99AB".to_string()
            }]
        );
    }

    #[test]
    fn test_unknown_ai_is_skipped_in_brackets() {
        let parsed = parse_barcode("(99)XYZ(01)06141411234566");
        assert_eq!(parsed.gtin.as_deref(), Some(GTIN));
        assert_eq!(parsed.validation_warnings.len(), 1);
    }

    #[test]
    fn test_digital_link() {
        let parsed = parse_barcode("https://id.gs1.org/01/06141411234566");
        assert_eq!(parsed.gtin.as_deref(), Some(GTIN));
        assert_eq!(parsed.code_type, Some(CodeType::Gtin));
        assert_eq!(parsed.format, Some(BarcodeFormat::DigitalLink));
    }

    #[test]
    fn test_digital_link_with_path_and_query_attributes() {
        let parsed =
            parse_barcode("https://id.gs1.org/01/06141411234566/10/LOT12345/21/SN%2F123?17=251231");
        assert_eq!(parsed.gtin.as_deref(), Some(GTIN));
        assert_eq!(parsed.batch_number.as_deref(), Some("LOT12345"));
        assert_eq!(parsed.serial_number.as_deref(), Some("SN/123"));
        assert_eq!(parsed.expiry_date.as_deref(), Some("2025-12-31"));
        assert!(parsed.is_clean());
    }

    #[test]
    fn test_digital_link_on_brand_domain() {
        let parsed = parse_barcode("https://scan.example.co.ke/brand/01/6141411234566/21/SN1");
        assert_eq!(parsed.gtin.as_deref(), Some(GTIN));
        assert_eq!(parsed.serial_number.as_deref(), Some("SN1"));
        assert_eq!(parsed.format, Some(BarcodeFormat::DigitalLink));
    }

    #[test]
    fn test_non_gs1_url_falls_through() {
        let parsed = parse_barcode("https://example.com/products/123");
        assert_eq!(parsed.format, Some(BarcodeFormat::Traditional));
        assert_eq!(parsed.code_type, None);
        assert!(!is_valid_gs1_data(&parsed));
    }

    #[test]
    fn test_is_valid_gs1_data() {
        assert!(is_valid_gs1_data(&parse_barcode(GTIN)));
        assert!(is_valid_gs1_data(&parse_barcode("(10)LOT12345")));
        assert!(is_valid_gs1_data(&parse_barcode("(414)0614141000007")));
        assert!(!is_valid_gs1_data(&parse_barcode("(17)251231")));
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(format_gtin(GTIN), "0-6141-4112-3456-6");
        assert_eq!(format_gtin("123"), "123");
        assert_eq!(format_sscc(SSCC), "0-061414112-3456789-2");
        assert_eq!(format_sscc(""), "");
    }

    #[test]
    fn test_parsed_barcode_json_shape() {
        let parsed = parse_barcode(BAD_GTIN);
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["code_type"], "GTIN");
        assert_eq!(json["format"], "Plain");
        assert_eq!(json["validation_warnings"][0]["kind"], "check_digit_mismatch");
    }
}
