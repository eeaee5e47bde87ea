//! Range expansion and its bounding-summary inverse.
//!
//! [`RangeExpander::expand`] turns a `from`/`to` pair into the ordered,
//! gap-free list of serials between them. [`collapse`] goes the other way for
//! display only: it reports the lowest and highest serial of an arbitrary set
//! plus its true size, and says nothing about contiguity.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::codec::SerialCode;
use crate::config::DEFAULT_MAX_EXPANSION;
use crate::error::{Result, SerialError};

// ---------------------------------------------------------------------------
// SerialRange
// ---------------------------------------------------------------------------

/// An inclusive `from..=to` run of serials sharing one prefix and width.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SerialRange {
    from: SerialCode,
    to: SerialCode,
}

impl SerialRange {
    /// Build a range from two parsed endpoints.
    ///
    /// Fails with `RangeMismatch` if prefixes differ, `WidthMismatch` if digit
    /// widths differ and `RangeOrderInvalid` if `from` is after `to`. The
    /// endpoints are never swapped.
    pub fn new(from: &SerialCode, to: &SerialCode) -> Result<Self> {
        if from.prefix() == to.prefix() && from.width() != to.width() {
            return Err(SerialError::WidthMismatch {
                from_width: from.width(),
                to_width: to.width(),
            });
        }
        Self::window(from, to)
    }

    /// Like [`new`](Self::new) but the endpoints may differ in width. Only
    /// for [`covers`](Self::covers); such a range is never expanded.
    pub(crate) fn window(from: &SerialCode, to: &SerialCode) -> Result<Self> {
        if from.prefix() != to.prefix() {
            return Err(SerialError::RangeMismatch {
                from_prefix: from.prefix().to_string(),
                to_prefix: to.prefix().to_string(),
            });
        }
        if from.value() > to.value() {
            return Err(SerialError::RangeOrderInvalid {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(Self {
            from: from.clone(),
            to: to.clone(),
        })
    }

    pub fn prefix(&self) -> &str {
        self.from.prefix()
    }

    pub fn from_value(&self) -> u64 {
        self.from.value()
    }

    pub fn to_value(&self) -> u64 {
        self.to.value()
    }

    pub fn width(&self) -> usize {
        self.from.width()
    }

    pub fn from_code(&self) -> SerialCode {
        self.from.clone()
    }

    pub fn to_code(&self) -> SerialCode {
        self.to.clone()
    }

    /// Number of serials in the range. Never zero.
    pub fn len(&self) -> u64 {
        self.to_value() - self.from_value() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if `code` is one of the serials this range expands to: same
    /// prefix, same width, value inside the bounds.
    pub fn contains(&self, code: &SerialCode) -> bool {
        code.width() == self.width() && self.covers(code)
    }

    /// True if `code` has this range's prefix and a value inside the bounds,
    /// whatever its digit width.
    ///
    /// This is the window rule shared by range selection, range deselection
    /// and [`SerialQuery::within`](crate::SerialQuery::within).
    pub fn covers(&self, code: &SerialCode) -> bool {
        code.prefix() == self.prefix()
            && (self.from_value()..=self.to_value()).contains(&code.value())
    }

    /// Lazily yield every serial in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = SerialCode> + '_ {
        // `to` is a valid code, so every value up to it fits the width.
        (self.from_value()..=self.to_value()).map(move |v| self.from.in_series(v))
    }
}

// ---------------------------------------------------------------------------
// RangeExpander
// ---------------------------------------------------------------------------

/// Materializes ranges into concrete serial lists, refusing ranges longer
/// than a configured ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeExpander {
    max_expansion: u64,
}

impl Default for RangeExpander {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EXPANSION)
    }
}

impl RangeExpander {
    pub fn new(max_expansion: u64) -> Self {
        Self { max_expansion }
    }

    pub fn max_expansion(&self) -> u64 {
        self.max_expansion
    }

    /// Expand `from..=to` into an ascending list of serials.
    ///
    /// Fails like [`SerialRange::new`], and with `RangeTooLarge` when the
    /// range holds more than `max_expansion` serials.
    pub fn expand(&self, from: &SerialCode, to: &SerialCode) -> Result<Vec<SerialCode>> {
        let range = SerialRange::new(from, to)?;
        self.expand_range(&range)
    }

    /// Expand an already validated range.
    pub fn expand_range(&self, range: &SerialRange) -> Result<Vec<SerialCode>> {
        self.check_size(range)?;
        let serials: Vec<SerialCode> = range.iter().collect();
        debug!(
            prefix = range.prefix(),
            from = range.from_value(),
            to = range.to_value(),
            count = serials.len(),
            "expanded serial range"
        );
        Ok(serials)
    }

    /// Fail with `RangeTooLarge` if `range` holds more serials than the
    /// ceiling.
    ///
    /// The limit counts serials (`to - from + 1`), not the difference
    /// `to - from`: a ceiling of 100 admits `A000001..=A000100`.
    pub fn check_size(&self, range: &SerialRange) -> Result<()> {
        let size = range.len();
        if size > self.max_expansion {
            return Err(SerialError::RangeTooLarge {
                size,
                limit: self.max_expansion,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// collapse
// ---------------------------------------------------------------------------

/// Bounding summary of a set of serials: lowest, highest and true count.
///
/// `from`/`to` are chosen by numeric value; the set between them may have
/// gaps or mixed prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeSummary {
    pub from: SerialCode,
    pub to: SerialCode,
    pub count: usize,
}

/// Summarize `serials` as `{from = min, to = max, count}`.
///
/// Returns `None` for an empty input. Repeated entries are counted once.
pub fn collapse<'a, I>(serials: I) -> Option<RangeSummary>
where
    I: IntoIterator<Item = &'a SerialCode>,
{
    let distinct: BTreeSet<&SerialCode> = serials.into_iter().collect();
    let by_value = |c: &&&SerialCode| (c.value(), c.prefix().to_string(), c.width());

    let from = distinct.iter().min_by_key(by_value)?;
    let to = distinct.iter().max_by_key(by_value)?;
    Some(RangeSummary {
        from: (*from).clone(),
        to: (*to).clone(),
        count: distinct.len(),
    })
}
