//! Parsing and rendering of prefixed serial numbers.
//!
//! A serial is an alphanumeric prefix followed by a trailing run of digits,
//! e.g. `PCB000123`. Input is normalized before parsing: surrounding and
//! internal whitespace and hyphens are removed and letters are uppercased,
//! so `" pcb-000 123 "` parses to the same code as `"PCB000123"`.
//!
//! # Example
//!
//! ```rust
//! use serial_range::codec::{parse, render};
//!
//! let code = parse("pcb-000123").unwrap();
//! assert_eq!(code.prefix(), "PCB");
//! assert_eq!(code.value(), 123);
//! assert_eq!(code.width(), 6);
//! assert_eq!(render(&code), "PCB000123");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_WIDTH, MAX_WIDTH};
use crate::error::{Result, SerialError};

// ---------------------------------------------------------------------------
// SerialCode
// ---------------------------------------------------------------------------

/// A parsed serial: `{prefix, numeric value, digit width}`.
///
/// Ordering is by prefix, then numeric value, then width, so ordered
/// collections of codes iterate in canonical ascending order. Serializes as
/// its rendered string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerialCode {
    prefix: String,
    value: u64,
    width: usize,
}

impl SerialCode {
    /// Build a code with the canonical width ([`DEFAULT_WIDTH`]).
    ///
    /// Fails like [`from_parts`](Self::from_parts).
    pub fn new(prefix: &str, value: u64) -> Result<Self> {
        Self::from_parts(prefix, value, DEFAULT_WIDTH)
    }

    /// Build a code from its parts, guaranteeing `parse(render(code)) == code`.
    ///
    /// The prefix is normalized the same way [`parse`] normalizes input. Fails
    /// with `Malformed` if the prefix holds anything but ASCII letters and
    /// digits or ends in a digit (it would be read back as part of the number),
    /// and with `InvalidArgument` if `width` is outside `1..=MAX_WIDTH` or
    /// `value` needs more than `width` digits.
    pub fn from_parts(prefix: &str, value: u64, width: usize) -> Result<Self> {
        let prefix = normalize(prefix);
        let prefix_ok = prefix.chars().all(|c| c.is_ascii_alphanumeric())
            && !prefix.ends_with(|c: char| c.is_ascii_digit());
        if !prefix_ok {
            return Err(SerialError::malformed(format!("{}{}", prefix, value)));
        }
        if width == 0 || width > MAX_WIDTH {
            return Err(SerialError::InvalidArgument(format!(
                "serial width must be between 1 and {}, got {}",
                MAX_WIDTH, width
            )));
        }
        if digit_count(value) > width {
            return Err(SerialError::InvalidArgument(format!(
                "value {} does not fit in {} digits",
                value, width
            )));
        }
        Ok(Self {
            prefix,
            value,
            width,
        })
    }

    /// Same prefix and value rendered at another width.
    ///
    /// Callers changing the width must keep it consistent with the other
    /// serials of the same range.
    pub fn with_width(&self, width: usize) -> Result<Self> {
        Self::from_parts(&self.prefix, self.value, width)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Code with the same prefix and width but a different numeric value.
    pub fn with_value(&self, value: u64) -> Result<Self> {
        Self::from_parts(&self.prefix, value, self.width)
    }

    /// Next code in the same series, inside a range whose upper bound is
    /// already known to fit the width.
    pub(crate) fn in_series(&self, value: u64) -> Self {
        debug_assert!(digit_count(value) <= self.width);
        Self {
            prefix: self.prefix.clone(),
            value,
            width: self.width,
        }
    }

    /// True if `other` has the same prefix and width.
    pub fn same_series(&self, other: &SerialCode) -> bool {
        self.prefix == other.prefix && self.width == other.width
    }
}

impl fmt::Display for SerialCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", self.prefix, self.value, width = self.width)
    }
}

impl FromStr for SerialCode {
    type Err = SerialError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl TryFrom<String> for SerialCode {
    type Error = SerialError;

    fn try_from(s: String) -> Result<Self> {
        parse(&s)
    }
}

impl From<SerialCode> for String {
    fn from(code: SerialCode) -> Self {
        code.to_string()
    }
}

// ---------------------------------------------------------------------------
// parse / render
// ---------------------------------------------------------------------------

/// Strip whitespace and hyphens and uppercase letters.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Parse a raw serial string.
///
/// The longest trailing digit run is the numeric segment and its length is
/// the width; everything before it is the prefix (possibly empty).
///
/// Returns `Err(Malformed)` when there is no trailing digit run, the digit run
/// is longer than [`MAX_WIDTH`], or the prefix contains anything other than
/// ASCII letters and digits.
pub fn parse(raw: &str) -> Result<SerialCode> {
    let normalized = normalize(raw);
    let split = normalized
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .len();
    let (prefix, digits) = normalized.split_at(split);

    if digits.is_empty() || digits.len() > MAX_WIDTH {
        return Err(SerialError::malformed(raw));
    }
    if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(SerialError::malformed(raw));
    }

    let value: u64 = digits.parse().map_err(|_| SerialError::malformed(raw))?;
    Ok(SerialCode {
        prefix: prefix.to_string(),
        value,
        width: digits.len(),
    })
}

fn digit_count(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Render a code as `prefix + zero-padded value`.
pub fn render(code: &SerialCode) -> String {
    code.to_string()
}

/// Parse every entry of `raw`, failing on the first malformed one.
pub fn parse_all<I, S>(raw: I) -> Result<Vec<SerialCode>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter().map(|s| parse(s.as_ref())).collect()
}
