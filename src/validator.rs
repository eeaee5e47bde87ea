//! Synchronous `from`/`to` checks run on every keystroke of a range form.

use tracing::trace;

use crate::codec::{self, SerialCode};
use crate::error::Result;
use crate::range::{RangeExpander, SerialRange};

/// Validates a pair of raw range inputs.
///
/// Checks run in order: both ends parse, prefixes match, digit widths match,
/// `from <= to`, and (when a ceiling is set) the range size. No I/O.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeValidator {
    max_expansion: Option<u64>,
}

impl RangeValidator {
    /// A validator with no size ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also reject ranges holding more than `limit` serials.
    pub fn with_max_expansion(mut self, limit: u64) -> Self {
        self.max_expansion = Some(limit);
        self
    }

    pub fn max_expansion(&self) -> Option<u64> {
        self.max_expansion
    }

    /// Validate raw `from`/`to` input and return the range they denote.
    ///
    /// Fails with `Malformed`, `RangeMismatch`, `WidthMismatch`,
    /// `RangeOrderInvalid` or `RangeTooLarge`.
    pub fn validate(&self, from_raw: &str, to_raw: &str) -> Result<SerialRange> {
        let from = codec::parse(from_raw)?;
        let to = codec::parse(to_raw)?;
        self.validate_codes(&from, &to)
    }

    /// Same as [`validate`](Self::validate) for already parsed endpoints.
    pub fn validate_codes(&self, from: &SerialCode, to: &SerialCode) -> Result<SerialRange> {
        let range = SerialRange::new(from, to)?;
        if let Some(limit) = self.max_expansion {
            RangeExpander::new(limit).check_size(&range)?;
        }
        trace!(from = %from, to = %to, len = range.len(), "range validated");
        Ok(range)
    }

    /// Validate a single field in isolation, for inline feedback before the
    /// other end of the range has been typed.
    pub fn validate_field(&self, raw: &str) -> Result<SerialCode> {
        codec::parse(raw)
    }
}
