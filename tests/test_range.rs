//! Range construction, expansion and collapse.

mod common;

use common::{code, codes, rendered};
use proptest::prelude::*;
use serial_range::{collapse, ErrorKind, RangeExpander, SerialCode, SerialError, SerialRange};

// ---------------------------------------------------------------------------
// SerialRange
// ---------------------------------------------------------------------------

#[test]
fn range_len_and_bounds() {
    let range = SerialRange::new(&code("PCB000010"), &code("PCB000019")).unwrap();
    assert_eq!(range.len(), 10);
    assert_eq!(range.prefix(), "PCB");
    assert_eq!(range.width(), 6);
    assert_eq!(range.from_code().to_string(), "PCB000010");
    assert_eq!(range.to_code().to_string(), "PCB000019");
}

#[test]
fn single_serial_range_has_len_one() {
    let range = SerialRange::new(&code("A01"), &code("A01")).unwrap();
    assert_eq!(range.len(), 1);
    assert!(!range.is_empty());
}

#[test]
fn range_contains_checks_prefix_width_and_value() {
    let range = SerialRange::new(&code("A000005"), &code("A000009")).unwrap();
    assert!(range.contains(&code("A000005")));
    assert!(range.contains(&code("A000009")));
    assert!(!range.contains(&code("A000010")));
    assert!(!range.contains(&code("B000007")));
    assert!(!range.contains(&code("A07")));
}

#[test]
fn range_covers_ignores_width() {
    let range = SerialRange::new(&code("A000005"), &code("A000009")).unwrap();
    assert!(range.covers(&code("A07")));
    assert!(!range.covers(&code("A10")));
    assert!(!range.covers(&code("B000007")));
}

#[test]
fn range_never_swaps_reversed_endpoints() {
    let err = SerialRange::new(&code("A000009"), &code("A000001")).unwrap_err();
    assert!(matches!(
        err,
        SerialError::RangeOrderInvalid { ref from, ref to } if from == "A000009" && to == "A000001"
    ));
}

// ---------------------------------------------------------------------------
// expand
// ---------------------------------------------------------------------------

#[test]
fn expand_happy_path() {
    let serials = RangeExpander::default()
        .expand(&code("PCB000001"), &code("PCB000005"))
        .unwrap();
    assert_eq!(
        rendered(&serials),
        vec!["PCB000001", "PCB000002", "PCB000003", "PCB000004", "PCB000005"]
    );
}

#[test]
fn expand_keeps_width_across_digit_boundary() {
    let serials = RangeExpander::default()
        .expand(&code("X0098"), &code("X0101"))
        .unwrap();
    assert_eq!(rendered(&serials), vec!["X0098", "X0099", "X0100", "X0101"]);
}

#[test]
fn expand_prefix_mismatch_fails() {
    let err = RangeExpander::default()
        .expand(&code("PCB000001"), &code("PCA000005"))
        .unwrap_err();
    assert!(matches!(
        err,
        SerialError::RangeMismatch { ref from_prefix, ref to_prefix }
            if from_prefix == "PCB" && to_prefix == "PCA"
    ));
}

#[test]
fn expand_over_ceiling_fails_with_size() {
    let err = RangeExpander::new(100)
        .expand(&code("A000001"), &code("A000101"))
        .unwrap_err();
    assert!(matches!(err, SerialError::RangeTooLarge { size: 101, limit: 100 }));
}

#[test]
fn expand_at_ceiling_succeeds() {
    let serials = RangeExpander::new(100)
        .expand(&code("A000001"), &code("A000100"))
        .unwrap();
    assert_eq!(serials.len(), 100);
}

#[test]
fn default_ceiling_blocks_typo_ranges() {
    let err = RangeExpander::default()
        .expand(&code("PCB000001"), &code("PCB900000"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeTooLarge);
}

#[test]
fn expand_is_idempotent() {
    let expander = RangeExpander::default();
    let a = expander.expand(&code("Q000100"), &code("Q000140")).unwrap();
    let b = expander.expand(&code("Q000100"), &code("Q000140")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn expansion_cannot_outgrow_its_width() {
    assert!(SerialCode::new("A", 1_000_000).is_err());
    let err = RangeExpander::default()
        .expand(&code("A999999"), &code("A1000000"))
        .unwrap_err();
    assert!(matches!(
        err,
        SerialError::WidthMismatch { from_width: 6, to_width: 7 }
    ));
}

#[test]
fn expand_up_to_widest_value_stays_padded() {
    let serials = RangeExpander::default()
        .expand(&code("A999998"), &code("A999999"))
        .unwrap();
    assert_eq!(rendered(&serials), vec!["A999998", "A999999"]);
}

proptest! {
    /// Expansion yields exactly `to - from + 1` consecutive serials.
    #[test]
    fn expand_size_and_order_hold(
        from_value in 0u64..900_000,
        span in 0u64..500,
    ) {
        let to_value = from_value + span;
        let from = SerialCode::new("RND", from_value).unwrap();
        let to = SerialCode::new("RND", to_value).unwrap();

        let serials = RangeExpander::default().expand(&from, &to).unwrap();
        prop_assert_eq!(serials.len() as u64, span + 1);
        prop_assert!(serials.windows(2).all(|w| w[0].value() + 1 == w[1].value()));
        prop_assert!(serials.iter().all(|c| c.width() == 6));
        prop_assert_eq!(serials.first(), Some(&from));
        prop_assert_eq!(serials.last(), Some(&to));
    }
}

// ---------------------------------------------------------------------------
// collapse
// ---------------------------------------------------------------------------

#[test]
fn collapse_full_expansion() {
    let serials = RangeExpander::default()
        .expand(&code("PCB000001"), &code("PCB000005"))
        .unwrap();
    let summary = collapse(&serials).unwrap();
    assert_eq!(summary.from.to_string(), "PCB000001");
    assert_eq!(summary.to.to_string(), "PCB000005");
    assert_eq!(summary.count, 5);
}

#[test]
fn collapse_reports_bounds_not_contiguity() {
    let serials = codes(&["A000009", "A000002", "A000050"]);
    let summary = collapse(&serials).unwrap();
    assert_eq!(summary.from.to_string(), "A000002");
    assert_eq!(summary.to.to_string(), "A000050");
    assert_eq!(summary.count, 3);
}

#[test]
fn collapse_orders_by_numeric_value_across_prefixes() {
    let serials = codes(&["Z000001", "A000007"]);
    let summary = collapse(&serials).unwrap();
    assert_eq!(summary.from.to_string(), "Z000001");
    assert_eq!(summary.to.to_string(), "A000007");
}

#[test]
fn collapse_empty_is_none() {
    let serials: Vec<SerialCode> = Vec::new();
    assert!(collapse(&serials).is_none());
}

#[test]
fn collapse_counts_repeats_once() {
    let serials = codes(&["A000001", "A000001", "A000002"]);
    assert_eq!(collapse(&serials).unwrap().count, 2);
}
