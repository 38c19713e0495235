//! # Record Storage
//!
//! Records live behind the [`RecordStore`] trait so the command layer
//! never touches persistence directly.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production file-based storage
//!   - Metadata index in `data.json`
//!   - Record bodies in individual files: `record-{uuid}.json`
//!   - All writes go through a tmp-then-rename step
//!
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! ## Lifecycle
//!
//! Records are soft-deleted: `soft_delete` flips a flag in the metadata
//! and keeps the body file around. `get` refuses deleted records,
//! `get_any` and `list` still see them.

use serde_json::Value;
use uuid::Uuid;

use crate::error::Result;
use crate::model::Record;

pub mod fs;
pub mod memory;

/// Abstract interface for record persistence.
pub trait RecordStore {
    /// Create and persist a record around the given JSON body.
    fn create(&mut self, data: Value) -> Result<Record>;

    /// Get a record by id. Soft-deleted records report `RecordDeleted`.
    fn get(&self, id: &Uuid) -> Result<Record>;

    /// Get a record by id, soft-deleted ones included.
    fn get_any(&self, id: &Uuid) -> Result<Record>;

    /// Persist the record's current state (create or update) and bump
    /// its `updated_at`.
    fn commit(&mut self, record: &mut Record) -> Result<()>;

    /// Mark a record deleted without touching its body.
    fn soft_delete(&mut self, id: &Uuid) -> Result<()>;

    /// All records, soft-deleted ones included. No ordering guarantee.
    fn list(&self) -> Result<Vec<Record>>;
}
