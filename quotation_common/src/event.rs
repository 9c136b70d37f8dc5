//! Change-event envelopes broadcast from server to client.
//!
//! Every insert/update/delete on the quotation collection produces one
//! `ChangeEvent`, serialized as JSON and pushed to all connected WebSocket
//! listeners. The envelope carries the operation type and the affected
//! document key; inserts include the full document, updates only the
//! changed field set.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString};

use crate::quotation::QuotationRecord;

/// Kind of mutation observed on the quotation collection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OperationType {
    /// A new document was added to the collection.
    Insert,
    /// Fields of an existing document changed.
    Update,
    /// A document was removed from the collection.
    Delete,
}

/// Key of the document a change event refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentKey {
    /// Identifier of the affected quotation.
    #[serde(rename = "_id")]
    pub id: String,
}

/// Changed field set carried by update events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDescription {
    /// Field name to new value, shallow.
    pub updated_fields: Map<String, Value>,
}

/// Envelope describing a single change on the quotation collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    /// What happened to the document.
    pub operation_type: OperationType,
    /// Which document it happened to.
    pub document_key: DocumentKey,
    /// The whole document; present on inserts only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_document: Option<QuotationRecord>,
    /// The changed field set; present on updates only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_description: Option<UpdateDescription>,
}

impl ChangeEvent {
    /// Event for a freshly inserted record.
    pub fn insert(record: QuotationRecord) -> Self {
        ChangeEvent {
            operation_type: OperationType::Insert,
            document_key: DocumentKey {
                id: record.id.clone(),
            },
            full_document: Some(record),
            update_description: None,
        }
    }

    /// Event for a partial update of the record with the given id.
    pub fn update(id: impl Into<String>, updated_fields: Map<String, Value>) -> Self {
        ChangeEvent {
            operation_type: OperationType::Update,
            document_key: DocumentKey { id: id.into() },
            full_document: None,
            update_description: Some(UpdateDescription { updated_fields }),
        }
    }

    /// Event for a deleted record.
    pub fn delete(id: impl Into<String>) -> Self {
        ChangeEvent {
            operation_type: OperationType::Delete,
            document_key: DocumentKey { id: id.into() },
            full_document: None,
            update_description: None,
        }
    }

    /// Identifier of the affected document.
    pub fn id(&self) -> &str {
        &self.document_key.id
    }
}
