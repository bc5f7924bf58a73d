//! # Allocator Module
//!
//! Draws SSCCs that no shipment, package or case has used yet, and batch
//! numbers that no earlier batch of the product carries.
//!
//! ## Flow
//! ```text
//! ┌──────────────┐   random serial   ┌──────────────┐   contains?   ┌──────────┐
//! │ SsccAllocator│ ────────────────▶ │  candidate   │ ────────────▶ │ registry │
//! └──────────────┘                   └──────────────┘               └────┬─────┘
//!        ▲                                                  yes          │ no
//!        └──────────────── retry (max_attempts) ◀────────────────────────┤
//!                                                                        ▼
//!                                                                  Ok(sscc)
//! ```
//!
//! Neither allocator owns randomness or storage. The caller passes the
//! registry of assigned values and the RNG, so a seeded RNG reproduces the
//! same sequence.

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use chrono::NaiveDate;
use rand::Rng;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::identifier::{generate, generate_sscc};
use crate::types::{Identifier, IdentifierClass};
use crate::validation::{validate_batch_number, validate_company_prefix, MAX_BATCH_NUMBER_LEN};
use crate::DEFAULT_ALLOCATION_ATTEMPTS;

/// Digits between the extension digit and the check digit.
const SSCC_BODY_DIGITS: u32 = 16;

/// Prefix of generated batch numbers when the caller has none.
pub const DEFAULT_BATCH_PREFIX: &str = "BATCH";

const BATCH_RANDOM_LEN: usize = 6;
const BATCH_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// `-YYMMDD-` plus the random part.
const BATCH_SUFFIX_LEN: usize = 8 + BATCH_RANDOM_LEN;

// =============================================================================
// Registry
// =============================================================================

/// Lookup of values already assigned: SSCCs anywhere in the hierarchy, or
/// batch numbers of one product.
pub trait Registry {
    fn contains(&self, value: &str) -> bool;
}

impl<S: BuildHasher> Registry for HashSet<String, S> {
    fn contains(&self, value: &str) -> bool {
        HashSet::contains(self, value)
    }
}

impl Registry for BTreeSet<String> {
    fn contains(&self, value: &str) -> bool {
        BTreeSet::contains(self, value)
    }
}

// =============================================================================
// Allocator
// =============================================================================

/// Allocates unique SSCCs for one extension digit and company prefix.
///
/// ## Example
/// ```rust
/// use std::collections::HashSet;
/// use rand::{rngs::StdRng, SeedableRng};
/// use tnt_core::allocator::SsccAllocator;
///
/// let allocator = SsccAllocator::new(0, Some("61640010")).unwrap();
/// let mut assigned: HashSet<String> = HashSet::new();
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let sscc = allocator.allocate(&assigned, &mut rng).unwrap();
/// assert!(sscc.as_str().starts_with("061640010"));
/// assigned.insert(sscc.into_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsccAllocator {
    extension_digit: u8,
    company_prefix: Option<String>,
    max_attempts: u32,
}

impl SsccAllocator {
    /// Without a company prefix every digit after the extension digit is
    /// random.
    pub fn new(extension_digit: u8, company_prefix: Option<&str>) -> CoreResult<Self> {
        if extension_digit > 9 {
            return Err(ValidationError::OutOfRange {
                field: "extension_digit".to_string(),
                min: 0,
                max: 9,
            }
            .into());
        }
        if let Some(prefix) = company_prefix {
            validate_company_prefix(prefix)?;
        }

        Ok(Self {
            extension_digit,
            company_prefix: company_prefix.map(str::to_string),
            max_attempts: DEFAULT_ALLOCATION_ATTEMPTS,
        })
    }

    /// Overrides the number of candidates drawn before giving up (at least 1).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Draws candidates until one is absent from `registry`.
    ///
    /// ## Errors
    /// [`CoreError::AllocationExhausted`] after `max_attempts` collisions.
    pub fn allocate<Reg, R>(&self, registry: &Reg, rng: &mut R) -> CoreResult<Identifier>
    where
        Reg: Registry + ?Sized,
        R: Rng + ?Sized,
    {
        for _ in 0..self.max_attempts {
            let candidate = self.candidate(rng)?;
            if !registry.contains(candidate.as_str()) {
                return Ok(candidate);
            }
        }

        Err(CoreError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }

    fn candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> CoreResult<Identifier> {
        match &self.company_prefix {
            Some(prefix) => {
                let width = SSCC_BODY_DIGITS - prefix.len() as u32;
                let serial = rng.random_range(0..10u64.pow(width));
                generate_sscc(self.extension_digit, prefix, serial)
            }
            None => {
                let body = rng.random_range(0..10u64.pow(SSCC_BODY_DIGITS));
                generate(
                    IdentifierClass::Sscc,
                    &self.extension_digit.to_string(),
                    body,
                )
            }
        }
    }
}

// =============================================================================
// Batch Numbers
// =============================================================================

/// Generates batch / lot numbers of the form `{PREFIX}-{YYMMDD}-{XXXXXX}`.
///
/// The random part is six characters from `0-9A-Z`. The date uses the GS1
/// `YYMMDD` layout so a full number stays within the 20 characters of AI (10).
///
/// ## Example
/// ```rust
/// use std::collections::HashSet;
/// use chrono::NaiveDate;
/// use rand::{rngs::StdRng, SeedableRng};
/// use tnt_core::allocator::BatchNumberGenerator;
/// use tnt_core::validation::validate_batch_number;
///
/// let generator = BatchNumberGenerator::new(None).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 12, 19).unwrap();
/// let used: HashSet<String> = HashSet::new();
///
/// let batch = generator
///     .generate(date, &used, &mut StdRng::seed_from_u64(3))
///     .unwrap();
/// assert!(batch.starts_with("BATCH-241219-"));
/// assert!(validate_batch_number(&batch).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchNumberGenerator {
    prefix: String,
    max_attempts: u32,
}

impl BatchNumberGenerator {
    /// A missing or blank prefix falls back to [`DEFAULT_BATCH_PREFIX`].
    pub fn new(prefix: Option<&str>) -> CoreResult<Self> {
        let prefix = prefix
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_BATCH_PREFIX);

        let max = MAX_BATCH_NUMBER_LEN - BATCH_SUFFIX_LEN;
        if prefix.len() > max {
            return Err(ValidationError::TooLong {
                field: "batch_prefix".to_string(),
                max,
            }
            .into());
        }
        if !prefix
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(ValidationError::InvalidFormat {
                field: "batch_prefix".to_string(),
                reason: "must contain only uppercase letters and digits".to_string(),
            }
            .into());
        }

        Ok(Self {
            prefix: prefix.to_string(),
            max_attempts: DEFAULT_ALLOCATION_ATTEMPTS,
        })
    }

    /// Overrides the number of candidates drawn before giving up (at least 1).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Draws batch numbers for `date` until one is absent from `registry`.
    ///
    /// ## Errors
    /// [`CoreError::AllocationExhausted`] after `max_attempts` collisions.
    pub fn generate<Reg, R>(
        &self,
        date: NaiveDate,
        registry: &Reg,
        rng: &mut R,
    ) -> CoreResult<String>
    where
        Reg: Registry + ?Sized,
        R: Rng + ?Sized,
    {
        let stamp = date.format("%y%m%d").to_string();

        for _ in 0..self.max_attempts {
            let candidate = self.candidate(&stamp, rng);
            if !registry.contains(&candidate) {
                validate_batch_number(&candidate)?;
                return Ok(candidate);
            }
        }

        Err(CoreError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }

    fn candidate<R: Rng + ?Sized>(&self, stamp: &str, rng: &mut R) -> String {
        let random: String = (0..BATCH_RANDOM_LEN)
            .map(|_| char::from(BATCH_ALPHABET[rng.random_range(0..BATCH_ALPHABET.len())]))
            .collect();
        format!("{}-{stamp}-{random}", self.prefix)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
