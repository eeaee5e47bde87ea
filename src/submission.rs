//! Line-item payload handed to the submission layer.
//!
//! The payload carries the final selection plus its bounding summary:
//!
//! ```json
//! {
//!   "sparepart_id": 12,
//!   "product_id": null,
//!   "quantity": 3,
//!   "from_serial": "PCB000001",
//!   "to_serial": "PCB000004",
//!   "serials": ["PCB000001", "PCB000002", "PCB000004"]
//! }
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::SerialCode;
use crate::error::{Result, SerialError};
use crate::selection::SelectionManager;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemPayload {
    pub sparepart_id: Option<i64>,
    pub product_id: Option<i64>,
    pub quantity: usize,
    pub from_serial: String,
    pub to_serial: String,
    pub serials: Vec<String>,
}

impl LineItemPayload {
    /// Start building a payload from the current state of `selection`.
    pub fn builder(selection: &SelectionManager) -> LineItemPayloadBuilder<'_> {
        LineItemPayloadBuilder {
            selection,
            sparepart_id: None,
            product_id: None,
            consumed: None,
        }
    }
}

/// Builder for [`LineItemPayload`].
pub struct LineItemPayloadBuilder<'a> {
    selection: &'a SelectionManager,
    sparepart_id: Option<i64>,
    product_id: Option<i64>,
    consumed: Option<BTreeSet<SerialCode>>,
}

impl<'a> LineItemPayloadBuilder<'a> {
    pub fn sparepart_id(mut self, id: i64) -> Self {
        self.sparepart_id = Some(id);
        self
    }

    pub fn product_id(mut self, id: i64) -> Self {
        self.product_id = Some(id);
        self
    }

    /// Treat any overlap with `consumed` as fatal: [`build`](Self::build)
    /// then fails with `DuplicateSerial` listing the conflicts.
    pub fn reject_conflicts<'c, I>(mut self, consumed: I) -> Self
    where
        I: IntoIterator<Item = &'c SerialCode>,
    {
        self.consumed = Some(consumed.into_iter().cloned().collect());
        self
    }

    /// Build the payload.
    ///
    /// Fails with `InvalidArgument` for an empty selection and with
    /// `DuplicateSerial` when conflict rejection is enabled and hits.
    pub fn build(self) -> Result<LineItemPayload> {
        let summary = self.selection.summary().ok_or_else(|| {
            SerialError::InvalidArgument("cannot submit an empty serial selection".to_string())
        })?;

        if let Some(consumed) = &self.consumed {
            let conflicts = self.selection.check_conflicts(consumed);
            if !conflicts.is_empty() {
                return Err(SerialError::DuplicateSerial {
                    serials: conflicts.iter().map(|c| c.to_string()).collect(),
                });
            }
        }

        let payload = LineItemPayload {
            sparepart_id: self.sparepart_id,
            product_id: self.product_id,
            quantity: self.selection.quantity(),
            from_serial: summary.from.to_string(),
            to_serial: summary.to.to_string(),
            serials: self.selection.selected_strings(),
        };
        debug!(
            quantity = payload.quantity,
            from = %payload.from_serial,
            to = %payload.to_serial,
            "built line item payload"
        );
        Ok(payload)
    }
}
