//! Line-item payload construction.

mod common;

use common::{code, codes, selected_range};
use serial_range::{ErrorKind, LineItemPayload, SelectionManager, SerialError};

#[test]
fn payload_carries_selection_and_summary() {
    let mut selection = selected_range("PCB000001", "PCB000004");
    selection.toggle(&code("PCB000003"));

    let payload = LineItemPayload::builder(&selection)
        .sparepart_id(12)
        .build()
        .unwrap();

    assert_eq!(payload.sparepart_id, Some(12));
    assert_eq!(payload.product_id, None);
    assert_eq!(payload.quantity, 3);
    assert_eq!(payload.from_serial, "PCB000001");
    assert_eq!(payload.to_serial, "PCB000004");
    assert_eq!(payload.serials, vec!["PCB000001", "PCB000002", "PCB000004"]);
}

#[test]
fn payload_serializes_with_snake_case_fields() {
    let selection = selected_range("A000001", "A000002");
    let payload = LineItemPayload::builder(&selection)
        .product_id(7)
        .build()
        .unwrap();

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["product_id"], 7);
    assert!(json["sparepart_id"].is_null());
    assert_eq!(json["quantity"], 2);
    assert_eq!(json["from_serial"], "A000001");
    assert_eq!(json["to_serial"], "A000002");
    assert_eq!(json["serials"], serde_json::json!(["A000001", "A000002"]));
}

#[test]
fn empty_selection_cannot_be_submitted() {
    let selection = SelectionManager::new();
    let err = LineItemPayload::builder(&selection).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn reject_conflicts_blocks_consumed_serials() {
    let selection = selected_range("PCB000001", "PCB000010");
    let consumed = codes(&["PCB000005", "PCB000007", "PCB000500"]);

    let err = LineItemPayload::builder(&selection)
        .reject_conflicts(&consumed)
        .build()
        .unwrap_err();
    match err {
        SerialError::DuplicateSerial { serials } => {
            assert_eq!(serials, vec!["PCB000005", "PCB000007"])
        }
        other => panic!("expected DuplicateSerial, got {:?}", other),
    }
}

#[test]
fn conflicts_are_advisory_unless_rejected() {
    let selection = selected_range("PCB000001", "PCB000003");
    let consumed = codes(&["PCB000002"]);

    assert_eq!(selection.check_conflicts(&consumed).len(), 1);
    let payload = LineItemPayload::builder(&selection).build().unwrap();
    assert_eq!(payload.quantity, 3);
}
