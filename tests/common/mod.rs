//! Shared fixtures for the serial-range integration tests.

use serial_range::{codec, SelectionManager, SerialCode};

/// Parse a serial, panicking on malformed test input.
pub fn code(raw: &str) -> SerialCode {
    codec::parse(raw).unwrap()
}

/// Parse a list of serials.
pub fn codes(raw: &[&str]) -> Vec<SerialCode> {
    codec::parse_all(raw).unwrap()
}

/// Render a list of codes back to strings.
pub fn rendered<'a, I>(serials: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a SerialCode>,
{
    serials.into_iter().map(|c| c.to_string()).collect()
}

/// A selection whose pool is `from..=to` with every candidate selected.
pub fn selected_range(from: &str, to: &str) -> SelectionManager {
    let pool = serial_range::RangeExpander::default()
        .expand(&code(from), &code(to))
        .unwrap();
    let mut selection = SelectionManager::with_candidates(pool);
    selection.select_all();
    selection
}
