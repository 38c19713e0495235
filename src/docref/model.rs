use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMeta {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl RecordMeta {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            is_deleted: false,
            deleted_at: None,
        }
    }
}

impl Default for RecordMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// A stored record: bookkeeping metadata plus an arbitrary JSON body.
///
/// The body is deliberately untyped. Document URIs live somewhere inside
/// it, addressed by JSON Pointer, and the rest of its shape is the
/// caller's business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub meta: RecordMeta,
    pub data: Value,
}

impl Record {
    pub fn new(data: Value) -> Self {
        Self {
            meta: RecordMeta::new(),
            data,
        }
    }

    // Listing reads a top-level "title" field when present; records
    // without one are still perfectly valid.
    pub fn title(&self) -> Option<&str> {
        self.data.get("title").and_then(Value::as_str)
    }
}
