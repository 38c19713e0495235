use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::RecordStore;
use crate::error::{DocrefError, Result};
use crate::model::Record;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    records: HashMap<Uuid, Record>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryStore {
    fn create(&mut self, data: Value) -> Result<Record> {
        let record = Record::new(data);
        self.records.insert(record.meta.id, record.clone());
        Ok(record)
    }

    fn get(&self, id: &Uuid) -> Result<Record> {
        let record = self.get_any(id)?;
        if record.meta.is_deleted {
            return Err(DocrefError::RecordDeleted(*id));
        }
        Ok(record)
    }

    fn get_any(&self, id: &Uuid) -> Result<Record> {
        self.records
            .get(id)
            .cloned()
            .ok_or(DocrefError::RecordNotFound(*id))
    }

    fn commit(&mut self, record: &mut Record) -> Result<()> {
        record.meta.updated_at = Utc::now();
        self.records.insert(record.meta.id, record.clone());
        Ok(())
    }

    fn soft_delete(&mut self, id: &Uuid) -> Result<()> {
        let record = self
            .records
            .get_mut(id)
            .ok_or(DocrefError::RecordNotFound(*id))?;
        record.meta.is_deleted = true;
        record.meta.deleted_at = Some(Utc::now());
        record.meta.updated_at = Utc::now();
        Ok(())
    }

    fn list(&self) -> Result<Vec<Record>> {
        Ok(self.records.values().cloned().collect())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use serde_json::json;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_records(mut self, count: usize) -> Self {
            for i in 0..count {
                let data = json!({
                    "title": format!("Record {}", i + 1),
                    "document": {"uri": null},
                });
                self.store.create(data).unwrap();
            }
            self
        }

        pub fn with_titled_record(mut self, title: &str, uri: Option<&str>) -> Self {
            let data = json!({
                "title": title,
                "document": {"uri": uri},
            });
            self.store.create(data).unwrap();
            self
        }

        pub fn with_deleted_record(mut self, title: &str) -> Self {
            let record = self
                .store
                .create(json!({"title": title, "document": {"uri": null}}))
                .unwrap();
            self.store.soft_delete(&record.meta.id).unwrap();
            self
        }
    }
}
