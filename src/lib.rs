//! Serial-number range engine.
//!
//! Parses prefixed serials such as `PCB000123`, validates and expands
//! `from`/`to` ranges into concrete serial lists, and manages the selection a
//! user builds over those serials before a line item is submitted. Everything
//! is synchronous and in-memory; fetching candidate pools and submitting the
//! result belong to the caller.
//!
//! # Quick start
//!
//! ```rust
//! use serial_range::SerialEngine;
//!
//! let engine = SerialEngine::builder().build().unwrap();
//!
//! let mut selection = engine.selection_from_range("PCB000001", "PCB000005").unwrap();
//! selection.select_all();
//! selection.add_manual("PCB000042").unwrap();
//!
//! let summary = selection.summary().unwrap();
//! assert_eq!(summary.from.to_string(), "PCB000001");
//! assert_eq!(summary.to.to_string(), "PCB000042");
//! assert_eq!(summary.count, 6);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod query;
pub mod range;
pub mod selection;
pub mod submission;
pub mod validator;

pub use codec::SerialCode;
pub use config::EngineConfig;
pub use error::{ErrorKind, Result, SerialError};
pub use query::{SerialPage, SerialQuery};
pub use range::{collapse, RangeExpander, RangeSummary, SerialRange};
pub use selection::{SelectionManager, SelectionState};
pub use submission::LineItemPayload;
pub use validator::RangeValidator;

use std::fmt;

// ---------------------------------------------------------------------------
// SerialEngineBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SerialEngine`].
///
/// Use [`SerialEngine::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](SerialEngineBuilder::build).
#[derive(Default)]
pub struct SerialEngineBuilder {
    config: EngineConfig,
}

impl SerialEngineBuilder {
    /// Start from an existing config, e.g. one loaded with
    /// [`EngineConfig::load_or_default`].
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Digit width used by [`SerialEngine::code`]. Defaults to 6.
    pub fn canonical_width(mut self, width: usize) -> Self {
        self.config.canonical_width = width;
        self
    }

    /// Largest range, in serials, that validation and expansion accept.
    ///
    /// Defaults to 10,000.
    pub fn max_expansion(mut self, limit: u64) -> Self {
        self.config.max_expansion = limit;
        self
    }

    /// Validate the configuration and build the engine.
    pub fn build(self) -> Result<SerialEngine> {
        self.config.validate()?;
        Ok(SerialEngine {
            config: self.config,
        })
    }
}

// ---------------------------------------------------------------------------
// SerialEngine
// ---------------------------------------------------------------------------

/// Entry point tying the codec, validator, expander and selection manager
/// to one [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct SerialEngine {
    config: EngineConfig,
}

impl SerialEngine {
    pub fn builder() -> SerialEngineBuilder {
        SerialEngineBuilder::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn validator(&self) -> RangeValidator {
        RangeValidator::new().with_max_expansion(self.config.max_expansion)
    }

    pub fn expander(&self) -> RangeExpander {
        RangeExpander::new(self.config.max_expansion)
    }

    pub fn parse(&self, raw: &str) -> Result<SerialCode> {
        codec::parse(raw)
    }

    /// Build a code at the configured canonical width.
    ///
    /// Fails like [`SerialCode::from_parts`].
    pub fn code(&self, prefix: &str, value: u64) -> Result<SerialCode> {
        SerialCode::from_parts(prefix, value, self.config.canonical_width)
    }

    pub fn validate(&self, from_raw: &str, to_raw: &str) -> Result<SerialRange> {
        self.validator().validate(from_raw, to_raw)
    }

    pub fn expand(&self, from: &SerialCode, to: &SerialCode) -> Result<Vec<SerialCode>> {
        self.expander().expand(from, to)
    }

    /// Validate raw input and expand it in one step.
    pub fn expand_raw(&self, from_raw: &str, to_raw: &str) -> Result<Vec<SerialCode>> {
        let range = self.validate(from_raw, to_raw)?;
        self.expander().expand_range(&range)
    }

    pub fn collapse<'a, I>(&self, serials: I) -> Option<RangeSummary>
    where
        I: IntoIterator<Item = &'a SerialCode>,
    {
        collapse(serials)
    }

    /// A fresh, empty selection.
    pub fn selection(&self) -> SelectionManager {
        SelectionManager::new()
    }

    /// A selection whose pool is the expansion of `from_raw..=to_raw`.
    /// Nothing is selected yet.
    pub fn selection_from_range(&self, from_raw: &str, to_raw: &str) -> Result<SelectionManager> {
        let serials = self.expand_raw(from_raw, to_raw)?;
        Ok(SelectionManager::with_candidates(serials))
    }
}

impl fmt::Display for SerialEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SerialEngine(canonical_width={}, max_expansion={})",
            self.config.canonical_width, self.config.max_expansion
        )
    }
}
