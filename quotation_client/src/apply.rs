//! Applying change events to the in-memory display list.
//!
//! Events mutate only what is on screen; the persisted snapshot is left
//! alone, so a restart falls back to the last full fetch.
use log::{debug, warn};
use serde_json::Value;

use quotation_common::event::{ChangeEvent, OperationType};
use quotation_common::QuotationRecord;

/// Applies one change event to the in-memory list.
///
/// - insert appends the event's full document;
/// - delete removes the matching record, silently ignoring unknown ids;
/// - update shallow-merges the changed field set into the matching record,
///   replacing named fields only.
pub fn apply_event(records: &mut Vec<QuotationRecord>, event: ChangeEvent) {
    match event.operation_type {
        OperationType::Insert => {
            if let Some(document) = event.full_document {
                records.push(document);
            } else {
                debug!(
                    "Insert event for {} carries no document, skipping",
                    event.document_key.id
                );
            }
        }
        OperationType::Delete => {
            records.retain(|record| record.id != event.document_key.id);
        }
        OperationType::Update => {
            let Some(description) = event.update_description else {
                debug!(
                    "Update event for {} carries no fields, skipping",
                    event.document_key.id
                );
                return;
            };
            let Some(record) = records
                .iter_mut()
                .find(|record| record.id == event.document_key.id)
            else {
                return;
            };

            let mut value = match serde_json::to_value(&*record) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Failed to re-encode record for merge: {}", e);
                    return;
                }
            };
            if let Value::Object(fields) = &mut value {
                for (name, field) in description.updated_fields {
                    fields.insert(name, field);
                }
            }
            match serde_json::from_value::<QuotationRecord>(value) {
                Ok(merged) => *record = merged,
                Err(e) => warn!(
                    "Ignoring update for {} that does not merge into a valid record: {}",
                    event.document_key.id, e
                ),
            }
        }
    }
}
