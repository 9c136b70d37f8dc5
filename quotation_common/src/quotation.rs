//! Quotation record and draft types shared by client and server.
//!
//! A `QuotationRecord` is one booking request as stored by the server and
//! displayed by the client. Records travel as camelCase JSON with the
//! identifier serialized under `_id`, matching the shape of the backing
//! document store. A `QuotationDraft` is the client-supplied body of a
//! create request: everything except the identity and timestamp fields,
//! which the server assigns.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuotationError;
use crate::result::Result;

/// One bar-service booking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRecord {
    /// Opaque unique identifier, assigned by the server. Immutable.
    #[serde(rename = "_id")]
    pub id: String,
    /// Name of the client requesting the service.
    pub client_name: String,
    /// Company the client represents.
    pub company_name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Venue address.
    pub address: String,
    /// Date of the event.
    pub event_date: String,
    /// Service start time.
    pub start_time: String,
    /// Service end time.
    pub end_time: String,
    /// Expected number of guests.
    pub number_of_guests: u32,
    /// Requested services, in the order the client listed them.
    pub services_requested: Vec<String>,
    /// Free-text notes, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated. Never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied fields of a new quotation.
///
/// The server turns a draft into a full `QuotationRecord` by assigning an
/// identifier and stamping both timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationDraft {
    /// Name of the client requesting the service.
    pub client_name: String,
    /// Company the client represents.
    pub company_name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Venue address.
    pub address: String,
    /// Date of the event.
    pub event_date: String,
    /// Service start time.
    pub start_time: String,
    /// Service end time.
    pub end_time: String,
    /// Expected number of guests.
    pub number_of_guests: u32,
    /// Requested services, in the order the client listed them.
    pub services_requested: Vec<String>,
    /// Free-text notes, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl QuotationDraft {
    /// Checks that every required text field carries a value.
    ///
    /// This is basic required-field validation only; no format checks are
    /// performed on emails, phone numbers, or dates.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("clientName", &self.client_name),
            ("companyName", &self.company_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("eventDate", &self.event_date),
            ("startTime", &self.start_time),
            ("endTime", &self.end_time),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(QuotationError::Validation(format!(
                    "required field `{}` is empty",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Builds a full record from the draft with the given identity and
    /// creation instant. Both timestamps start equal.
    pub fn into_record(self, id: String, now: DateTime<Utc>) -> QuotationRecord {
        QuotationRecord {
            id,
            client_name: self.client_name,
            company_name: self.company_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            event_date: self.event_date,
            start_time: self.start_time,
            end_time: self.end_time,
            number_of_guests: self.number_of_guests,
            services_requested: self.services_requested,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuotationDraft {
        QuotationDraft {
            client_name: "Ada Lovelace".into(),
            company_name: "Analytical Engines Ltd".into(),
            email: "ada@example.com".into(),
            phone: "+1 555 0100".into(),
            address: "12 Byron Street, Denver".into(),
            event_date: "2025-06-14".into(),
            start_time: "18:00".into(),
            end_time: "23:00".into(),
            number_of_guests: 80,
            services_requested: vec!["bar".into(), "cocktails".into()],
            notes: None,
        }
    }

    #[test]
    fn record_serializes_with_wire_field_names() {
        let record = draft().into_record(
            "abc123".into(),
            "2025-01-02T10:00:00Z".parse().unwrap(),
        );
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["_id"], "abc123");
        assert_eq!(obj["clientName"], "Ada Lovelace");
        assert_eq!(obj["numberOfGuests"], 80);
        assert!(obj.contains_key("servicesRequested"));
        // notes is absent, not null
        assert!(!obj.contains_key("notes"));
        assert_eq!(obj["createdAt"], obj["updatedAt"]);
    }

    #[test]
    fn into_record_starts_with_equal_timestamps() {
        let now = Utc::now();
        let record = draft().into_record("q1".into(), now);
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, now);
    }

    #[test]
    fn validate_rejects_empty_required_field() {
        let mut bad = draft();
        bad.client_name = "   ".into();
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("clientName"));
    }

    #[test]
    fn validate_accepts_complete_draft() {
        assert!(draft().validate().is_ok());
    }
}
