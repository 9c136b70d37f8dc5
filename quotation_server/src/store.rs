//! SQLite-backed document store for quotations.
//!
//! Each quotation is stored as one row carrying the full JSON document,
//! keeping the single-collection document-store shape of the data. The
//! store also owns the change feed: every successful mutation sends one
//! `ChangeEvent` into a broadcast channel that WebSocket connections
//! subscribe to.
//!
//! Design notes:
//! - The store is an explicitly constructed value handed to the router
//!   state; there is no global connection object.
//! - Emitting events is best-effort: with no subscribers the event is
//!   dropped, and a subscriber that falls more than `EVENT_BUFFER` events
//!   behind loses the overrun ones.
//! - `_id` and `createdAt` are protected fields; partial updates can never
//!   rewrite them, and `updatedAt` is always stamped by the store, which
//!   keeps the per-record timestamps monotonic.
use chrono::Utc;
use log::info;
use serde_json::{Map, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use tokio::sync::broadcast;
use uuid::Uuid;

use quotation_common::{ChangeEvent, QuotationDraft, QuotationError, QuotationRecord, Result};

/// Capacity of the change-event broadcast channel.
const EVENT_BUFFER: usize = 64;

/// Handle to the quotation collection and its change feed.
#[derive(Clone)]
pub struct QuotationStore {
    pool: SqlitePool,
    events: broadcast::Sender<ChangeEvent>,
}

impl QuotationStore {
    /// Connects to the database named by `database_url` and prepares the
    /// schema.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| {
                QuotationError::Database(format!("failed to connect to {}: {}", database_url, e))
            })?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS quotations (id TEXT PRIMARY KEY, doc TEXT NOT NULL)",
        )
        .execute(&pool)
        .await
        .map_err(db_err)?;

        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Ok(QuotationStore { pool, events })
    }

    /// Subscribes to the change feed. Only events emitted after this call
    /// are observed; there is no backlog or replay.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }

    /// All quotations, in insertion order.
    pub async fn list(&self) -> Result<Vec<QuotationRecord>> {
        let rows = sqlx::query("SELECT doc FROM quotations ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let doc: String = row.get("doc");
            records.push(serde_json::from_str(&doc)?);
        }
        Ok(records)
    }

    /// Validates and stores a new quotation, assigning an identifier and
    /// stamping both timestamps. Emits an insert event.
    pub async fn insert(&self, draft: QuotationDraft) -> Result<QuotationRecord> {
        draft.validate()?;
        let record = draft.into_record(Uuid::new_v4().to_string(), Utc::now());
        let doc = serde_json::to_string(&record)?;

        sqlx::query("INSERT INTO quotations (id, doc) VALUES (?, ?)")
            .bind(&record.id)
            .bind(&doc)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        info!("Stored quotation {} for {}", record.id, record.client_name);
        self.emit(ChangeEvent::insert(record.clone()));
        Ok(record)
    }

    /// Shallow-merges `fields` into the record with the given id and bumps
    /// `updatedAt`. Emits an update event carrying the merged field set.
    pub async fn update(
        &self,
        id: &str,
        mut fields: Map<String, Value>,
    ) -> Result<QuotationRecord> {
        fields.remove("_id");
        fields.remove("createdAt");
        fields.insert("updatedAt".to_string(), serde_json::to_value(Utc::now())?);

        let row = sqlx::query("SELECT doc FROM quotations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or_else(|| QuotationError::NotFound(id.to_string()))?;
        let doc: String = row.get("doc");

        let mut value: Value = serde_json::from_str(&doc)?;
        if let Value::Object(obj) = &mut value {
            for (name, field) in fields.clone() {
                obj.insert(name, field);
            }
        }
        let record: QuotationRecord = serde_json::from_value(value).map_err(|e| {
            QuotationError::Validation(format!("update does not produce a valid quotation: {}", e))
        })?;

        sqlx::query("UPDATE quotations SET doc = ? WHERE id = ?")
            .bind(serde_json::to_string(&record)?)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        self.emit(ChangeEvent::update(id, fields));
        Ok(record)
    }

    /// Removes the record with the given id. Emits a delete event.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM quotations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(QuotationError::NotFound(id.to_string()));
        }
        self.emit(ChangeEvent::delete(id));
        Ok(())
    }

    fn emit(&self, event: ChangeEvent) {
        // No receivers is fine; the event is dropped.
        let _ = self.events.send(event);
    }
}

fn db_err(e: sqlx::Error) -> QuotationError {
    QuotationError::Database(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotation_common::event::OperationType;
    use serde_json::json;
    use tempfile::TempDir;

    fn draft() -> QuotationDraft {
        QuotationDraft {
            client_name: "Grace Hopper".into(),
            company_name: "Compilers Inc".into(),
            email: "grace@example.com".into(),
            phone: "+1 555 0199".into(),
            address: "1 Harbor Way, Denver".into(),
            event_date: "2025-09-20".into(),
            start_time: "19:00".into(),
            end_time: "23:30".into(),
            number_of_guests: 120,
            services_requested: vec!["bar".into(), "staff".into()],
            notes: Some("outdoor venue".into()),
        }
    }

    async fn test_store() -> (QuotationStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let store = QuotationStore::connect(&db_url).await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn insert_assigns_identity_and_emits_insert_event() {
        let (store, _dir) = test_store().await;
        let mut events = store.subscribe();

        let record = store.insert(draft()).await.unwrap();
        assert!(!record.id.is_empty());
        assert_eq!(record.created_at, record.updated_at);

        let event = events.recv().await.unwrap();
        assert_eq!(event.operation_type, OperationType::Insert);
        assert_eq!(event.id(), record.id);
        assert_eq!(event.full_document, Some(record));
    }

    #[tokio::test]
    async fn list_returns_stored_records() {
        let (store, _dir) = test_store().await;
        let first = store.insert(draft()).await.unwrap();
        let second = store.insert(draft()).await.unwrap();

        let records = store.list().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, first.id);
        assert_eq!(records[1].id, second.id);
    }

    #[tokio::test]
    async fn update_merges_named_fields_and_emits_update_event() {
        let (store, _dir) = test_store().await;
        let record = store.insert(draft()).await.unwrap();
        let mut events = store.subscribe();

        let mut fields = Map::new();
        fields.insert("numberOfGuests".into(), json!(150));
        let updated = store.update(&record.id, fields).await.unwrap();

        assert_eq!(updated.number_of_guests, 150);
        assert_eq!(updated.client_name, record.client_name);
        assert_eq!(updated.created_at, record.created_at);
        assert!(updated.updated_at >= record.updated_at);

        let event = events.recv().await.unwrap();
        assert_eq!(event.operation_type, OperationType::Update);
        assert_eq!(event.id(), record.id);
        let fields = event.update_description.unwrap().updated_fields;
        assert_eq!(fields["numberOfGuests"], 150);
        assert!(fields.contains_key("updatedAt"));
        assert!(!fields.contains_key("clientName"));
    }

    #[tokio::test]
    async fn update_never_rewrites_protected_fields() {
        let (store, _dir) = test_store().await;
        let record = store.insert(draft()).await.unwrap();

        let mut fields = Map::new();
        fields.insert("_id".into(), json!("forged"));
        fields.insert("createdAt".into(), json!("1970-01-01T00:00:00Z"));
        fields.insert("notes".into(), json!("rooftop"));
        let updated = store.update(&record.id, fields).await.unwrap();

        assert_eq!(updated.id, record.id);
        assert_eq!(updated.created_at, record.created_at);
        assert_eq!(updated.notes.as_deref(), Some("rooftop"));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let (store, _dir) = test_store().await;
        let err = store.update("missing", Map::new()).await.unwrap_err();
        assert!(matches!(err, QuotationError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_rejects_merge_that_breaks_the_record() {
        let (store, _dir) = test_store().await;
        let record = store.insert(draft()).await.unwrap();

        let mut fields = Map::new();
        fields.insert("numberOfGuests".into(), json!("lots"));
        let err = store.update(&record.id, fields).await.unwrap_err();
        assert!(matches!(err, QuotationError::Validation(_)));

        // The stored document is untouched.
        let records = store.list().await.unwrap();
        assert_eq!(records[0].number_of_guests, record.number_of_guests);
    }

    #[tokio::test]
    async fn delete_removes_record_and_emits_delete_event() {
        let (store, _dir) = test_store().await;
        let record = store.insert(draft()).await.unwrap();
        let mut events = store.subscribe();

        store.delete(&record.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());

        let event = events.recv().await.unwrap();
        assert_eq!(event.operation_type, OperationType::Delete);
        assert_eq!(event.id(), record.id);
        assert!(event.full_document.is_none());
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let (store, _dir) = test_store().await;
        let err = store.delete("missing").await.unwrap_err();
        assert!(matches!(err, QuotationError::NotFound(_)));
    }

    #[tokio::test]
    async fn insert_rejects_incomplete_draft() {
        let (store, _dir) = test_store().await;
        let mut incomplete = draft();
        incomplete.email = String::new();
        let err = store.insert(incomplete).await.unwrap_err();
        assert!(matches!(err, QuotationError::Validation(_)));
        assert!(store.list().await.unwrap().is_empty());
    }
}
