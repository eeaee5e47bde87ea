//! Search and pagination over a pool of serials.
//!
//! Used by the serial-selection dialog to filter a candidate pool before
//! showing one page of it. Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use serial_range::{codec, SerialQuery};
//!
//! let pool = codec::parse_all(["PCB000001", "PCB000002", "PCA000001"]).unwrap();
//! let page = SerialQuery::new()
//!     .prefix("pcb")
//!     .limit(1)
//!     .run(&pool);
//! assert_eq!(page.total, 2);
//! assert_eq!(page.items[0].to_string(), "PCB000001");
//! ```

use std::collections::HashSet;

use serde::Serialize;

use crate::codec::{normalize, SerialCode};
use crate::range::SerialRange;

/// One page of query results plus the number of matches before paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerialPage {
    pub items: Vec<SerialCode>,
    pub total: usize,
}

/// Filters, orders and pages a pool of serials.
///
/// Results are in ascending canonical order (prefix, then numeric value)
/// unless [`descending`](Self::descending) is set.
#[derive(Debug, Clone, Default)]
pub struct SerialQuery {
    prefix: Option<String>,
    search: Option<String>,
    within: Option<SerialRange>,
    exclude: HashSet<SerialCode>,
    descending: bool,
    limit_val: Option<usize>,
    offset_val: Option<usize>,
}

impl SerialQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep serials with exactly this prefix (normalized like input).
    pub fn prefix(&mut self, prefix: &str) -> &mut Self {
        self.prefix = Some(normalize(prefix));
        self
    }

    /// Keep serials whose rendered form contains `term`.
    ///
    /// The term is normalized first, so the match ignores case, spaces and
    /// hyphens. A blank term matches everything.
    pub fn search(&mut self, term: &str) -> &mut Self {
        let term = normalize(term);
        self.search = if term.is_empty() { None } else { Some(term) };
        self
    }

    /// Keep serials whose prefix and value fall inside `range`, whatever
    /// their digit width.
    pub fn within(&mut self, range: &SerialRange) -> &mut Self {
        self.within = Some(range.clone());
        self
    }

    /// Drop serials in `serials`, e.g. the consumed set.
    pub fn exclude<'a, I>(&mut self, serials: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a SerialCode>,
    {
        self.exclude.extend(serials.into_iter().cloned());
        self
    }

    pub fn descending(&mut self) -> &mut Self {
        self.descending = true;
        self
    }

    /// Maximum number of items per page.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    /// Number of matches to skip before the page starts.
    pub fn offset(&mut self, n: usize) -> &mut Self {
        self.offset_val = Some(n);
        self
    }

    fn matches(&self, code: &SerialCode) -> bool {
        if let Some(prefix) = &self.prefix {
            if code.prefix() != prefix.as_str() {
                return false;
            }
        }
        if let Some(term) = &self.search {
            if !code.to_string().contains(term.as_str()) {
                return false;
            }
        }
        if let Some(range) = &self.within {
            if !range.covers(code) {
                return false;
            }
        }
        !self.exclude.contains(code)
    }

    /// Run the query against `pool`. Repeated pool entries appear once.
    pub fn run<'a, I>(&self, pool: I) -> SerialPage
    where
        I: IntoIterator<Item = &'a SerialCode>,
    {
        let mut hits: Vec<&SerialCode> = pool.into_iter().filter(|c| self.matches(c)).collect();
        hits.sort();
        hits.dedup();
        if self.descending {
            hits.reverse();
        }

        let total = hits.len();
        let items = hits
            .into_iter()
            .skip(self.offset_val.unwrap_or(0))
            .take(self.limit_val.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        SerialPage { items, total }
    }
}
