use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::RecordStore;
use crate::error::{DocrefError, Result};
use crate::model::{Record, RecordMeta};

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_filename(id: &Uuid) -> String {
        format!("record-{}.json", id)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DocrefError::Io)?;
        }
        Ok(())
    }

    fn load_index(&self) -> Result<HashMap<Uuid, RecordMeta>> {
        let data_file = self.root.join("data.json");
        if !data_file.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(data_file).map_err(DocrefError::Io)?;
        let index = serde_json::from_str(&content).map_err(DocrefError::Serialization)?;
        Ok(index)
    }

    fn save_index(&self, index: &HashMap<Uuid, RecordMeta>) -> Result<()> {
        let content = serde_json::to_string_pretty(index).map_err(DocrefError::Serialization)?;
        self.write_atomic(&self.root.join("data.json"), content.as_bytes())
    }

    // Write to a temp file in the same directory, then rename over the
    // target, so readers never observe a half-written file.
    fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<()> {
        let tmp_file = self.root.join(format!(".data-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(DocrefError::Io)?;
        fs::rename(&tmp_file, path).map_err(DocrefError::Io)?;
        Ok(())
    }

    fn read_body(&self, id: &Uuid) -> Result<Value> {
        let path = self.root.join(Self::record_filename(id));
        if !path.exists() {
            // Indexed but bodyless records read as null rather than
            // failing every listing.
            return Ok(Value::Null);
        }
        let content = fs::read_to_string(path).map_err(DocrefError::Io)?;
        let body = serde_json::from_str(&content).map_err(DocrefError::Serialization)?;
        Ok(body)
    }

    fn write_body(&self, id: &Uuid, data: &Value) -> Result<()> {
        let content = serde_json::to_string_pretty(data).map_err(DocrefError::Serialization)?;
        self.write_atomic(&self.root.join(Self::record_filename(id)), content.as_bytes())
    }
}

impl RecordStore for FileStore {
    fn create(&mut self, data: Value) -> Result<Record> {
        self.ensure_dir()?;
        let record = Record::new(data);

        let mut index = self.load_index()?;
        index.insert(record.meta.id, record.meta.clone());
        self.save_index(&index)?;
        self.write_body(&record.meta.id, &record.data)?;

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
        let index = self.load_index()?;
        let meta = index
            .get(id)
            .ok_or(DocrefError::RecordNotFound(*id))?
            .clone();
        let data = self.read_body(id)?;
        Ok(Record { meta, data })
    }

    fn commit(&mut self, record: &mut Record) -> Result<()> {
        self.ensure_dir()?;
        record.meta.updated_at = Utc::now();

        let mut index = self.load_index()?;
        index.insert(record.meta.id, record.meta.clone());
        self.save_index(&index)?;
        self.write_body(&record.meta.id, &record.data)
    }

    fn soft_delete(&mut self, id: &Uuid) -> Result<()> {
        let mut index = self.load_index()?;
        let meta = index.get_mut(id).ok_or(DocrefError::RecordNotFound(*id))?;
        meta.is_deleted = true;
        meta.deleted_at = Some(Utc::now());
        meta.updated_at = Utc::now();
        self.save_index(&index)
    }

    fn list(&self) -> Result<Vec<Record>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let index = self.load_index()?;
        let mut records = Vec::new();
        for (id, meta) in index {
            let data = self.read_body(&id)?;
            records.push(Record { meta, data });
        }
        Ok(records)
    }
}
