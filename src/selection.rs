//! Interactive selection over a pool of candidate serials.
//!
//! A [`SelectionManager`] owns the selection set of one form session (one
//! purchase line item or one assembly batch). It tracks:
//!
//! - `available`: the candidate pool, from an expanded range or a fetched list
//! - `selected`: what the user has chosen; its size is the line quantity
//! - `manual`: selected entries the user typed in or toggled on from outside
//!   the pool, which survive a re-seed
//! - `consumed`: a snapshot of serials already sold or assigned elsewhere,
//!   used to reject manual additions
//!
//! Every fallible operation is all-or-nothing: on `Err` nothing has changed.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::codec::{self, SerialCode};
use crate::error::{Result, SerialError};
use crate::range::{collapse, RangeSummary, SerialRange};

/// Whether anything is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    Populated,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    available: BTreeSet<SerialCode>,
    selected: BTreeSet<SerialCode>,
    manual: BTreeSet<SerialCode>,
    consumed: HashSet<SerialCode>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager seeded with `candidates` and nothing selected.
    pub fn with_candidates<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = SerialCode>,
    {
        let mut manager = Self::new();
        manager.seed(candidates);
        manager
    }

    // -- Read access ---------------------------------------------------------

    pub fn state(&self) -> SelectionState {
        if self.selected.is_empty() {
            SelectionState::Empty
        } else {
            SelectionState::Populated
        }
    }

    /// The authoritative quantity for a serial-tracked line item.
    pub fn quantity(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, serial: &SerialCode) -> bool {
        self.selected.contains(serial)
    }

    /// Selected serials in ascending order.
    pub fn selected(&self) -> &BTreeSet<SerialCode> {
        &self.selected
    }

    /// Selected serials rendered as strings, ascending.
    pub fn selected_strings(&self) -> Vec<String> {
        self.selected.iter().map(|c| c.to_string()).collect()
    }

    pub fn available(&self) -> &BTreeSet<SerialCode> {
        &self.available
    }

    /// Selected entries that were added by hand rather than from the pool.
    pub fn manual(&self) -> &BTreeSet<SerialCode> {
        &self.manual
    }

    pub fn consumed(&self) -> &HashSet<SerialCode> {
        &self.consumed
    }

    /// Bounding `{from, to, count}` of the selection, or `None` when empty.
    pub fn summary(&self) -> Option<RangeSummary> {
        collapse(&self.selected)
    }

    // -- Pool management -----------------------------------------------------

    /// Replace the candidate pool.
    ///
    /// Selected entries that are neither in the new pool nor manually added
    /// are dropped so a range edit cannot leave stale selections behind.
    /// Returns how many were dropped.
    pub fn seed<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = SerialCode>,
    {
        self.available = candidates.into_iter().collect();

        let before = self.selected.len();
        let available = &self.available;
        let manual = &self.manual;
        self.selected
            .retain(|c| available.contains(c) || manual.contains(c));
        let dropped = before - self.selected.len();

        debug!(
            available = self.available.len(),
            dropped, "seeded selection pool"
        );
        dropped
    }

    /// Parse and seed a pool supplied as plain strings. Nothing changes if
    /// any entry is malformed.
    pub fn seed_raw<I, S>(&mut self, candidates: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = codec::parse_all(candidates)?;
        Ok(self.seed(parsed))
    }

    /// Replace the consumed snapshot checked by [`add_manual`](Self::add_manual).
    pub fn set_consumed<I>(&mut self, consumed: I)
    where
        I: IntoIterator<Item = SerialCode>,
    {
        self.consumed = consumed.into_iter().collect();
    }

    /// Parse and install a consumed snapshot supplied as plain strings.
    pub fn set_consumed_raw<I, S>(&mut self, consumed: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = codec::parse_all(consumed)?;
        self.set_consumed(parsed);
        Ok(())
    }

    // -- Mutations -----------------------------------------------------------

    /// Select every candidate in the pool. Manual additions are cleared.
    pub fn select_all(&mut self) {
        self.selected = self.available.clone();
        self.manual.clear();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
        self.manual.clear();
    }

    /// Flip membership of one serial. Returns `true` if it is now selected.
    ///
    /// Serials outside the pool that get toggled on count as manual.
    pub fn toggle(&mut self, serial: &SerialCode) -> bool {
        if self.selected.remove(serial) {
            self.manual.remove(serial);
            false
        } else {
            if !self.available.contains(serial) {
                self.manual.insert(serial.clone());
            }
            self.selected.insert(serial.clone());
            true
        }
    }

    /// Select every pool candidate whose prefix and value fall in
    /// `from..=to`, whatever its digit width. This is the same window
    /// [`bulk_deselect_by_range`](Self::bulk_deselect_by_range) removes.
    /// Fails with `RangeMismatch` or `RangeOrderInvalid` on bad bounds.
    /// Returns how many were newly selected.
    pub fn select_range(&mut self, from: &SerialCode, to: &SerialCode) -> Result<usize> {
        let window = SerialRange::window(from, to)?;
        let picks: Vec<SerialCode> = self
            .available
            .iter()
            .filter(|c| window.covers(c))
            .cloned()
            .collect();

        let mut added = 0;
        for code in picks {
            if self.selected.insert(code) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Add comma-separated serials typed by the user.
    ///
    /// The whole batch is rejected with `DuplicateSerial`, listing every
    /// offender once, if any entry is already selected, repeats within the
    /// batch, or is in the consumed snapshot. A malformed entry rejects the
    /// batch with `Malformed`. Blank entries are ignored. Returns the added
    /// serials in input order.
    pub fn add_manual(&mut self, raw_csv: &str) -> Result<Vec<SerialCode>> {
        let candidates = codec::parse_all(
            raw_csv
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        )?;

        let mut seen: BTreeSet<&SerialCode> = BTreeSet::new();
        let mut duplicates: Vec<String> = Vec::new();
        for code in &candidates {
            let repeated = !seen.insert(code);
            if repeated || self.selected.contains(code) || self.consumed.contains(code) {
                let rendered = code.to_string();
                if !duplicates.contains(&rendered) {
                    duplicates.push(rendered);
                }
            }
        }

        if !duplicates.is_empty() {
            debug!(?duplicates, "rejected manual serial batch");
            return Err(SerialError::DuplicateSerial {
                serials: duplicates,
            });
        }

        for code in &candidates {
            self.selected.insert(code.clone());
            self.manual.insert(code.clone());
        }
        debug!(added = candidates.len(), "added manual serials");
        Ok(candidates)
    }

    /// Deselect every member whose prefix and value fall in `from..=to`.
    ///
    /// Members with another prefix or outside the window are untouched; digit
    /// width is not compared, matching [`select_range`](Self::select_range).
    /// Fails with `RangeMismatch` or `RangeOrderInvalid` on bad bounds.
    /// Returns how many were removed.
    pub fn bulk_deselect_by_range(&mut self, from: &SerialCode, to: &SerialCode) -> Result<usize> {
        let window = SerialRange::window(from, to)?;
        let in_window = |c: &SerialCode| window.covers(c);

        let before = self.selected.len();
        self.selected.retain(|c| !in_window(c));
        self.manual.retain(|c| !in_window(c));
        let removed = before - self.selected.len();

        debug!(from = %from, to = %to, removed, "bulk deselected range");
        Ok(removed)
    }

    // -- Queries -------------------------------------------------------------

    /// Selected serials that also appear in `consumed`.
    ///
    /// Point-in-time check only; whether a conflict blocks submission is the
    /// caller's decision.
    pub fn check_conflicts<'a, I>(&self, consumed: I) -> BTreeSet<SerialCode>
    where
        I: IntoIterator<Item = &'a SerialCode>,
    {
        let conflicts: BTreeSet<SerialCode> = consumed
            .into_iter()
            .filter(|c| self.selected.contains(*c))
            .cloned()
            .collect();
        if !conflicts.is_empty() {
            debug!(count = conflicts.len(), "selection conflicts with consumed serials");
        }
        conflicts
    }

    /// [`check_conflicts`](Self::check_conflicts) against plain strings.
    pub fn check_conflicts_raw<I, S>(&self, consumed: I) -> Result<BTreeSet<SerialCode>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = codec::parse_all(consumed)?;
        Ok(self.check_conflicts(&parsed))
    }
}
