//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the
//! single entry point for all docref operations, regardless of the UI being
//! used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Holds shared context** (store, scheme registry, hook registry)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! The API explicitly avoids:
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O formatting**: No stdout, stderr, or string rendering
//!
//! ## Generic Over RecordStore
//!
//! `DocrefApi<S: RecordStore>` is generic over the storage backend:
//! - Production: `DocrefApi<FileStore>`
//! - Testing: `DocrefApi<InMemoryStore>`
//!
//! This enables testing the API layer without touching the filesystem.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::commands;
use crate::error::Result;
use crate::hooks::HookRegistry;
use crate::store::RecordStore;
use crate::vfs::SchemeRegistry;

/// The main API facade for docref operations.
///
/// Generic over `RecordStore` to allow different storage backends.
/// All UI clients (CLI, web, etc.) should interact through this API.
pub struct DocrefApi<S: RecordStore> {
    store: S,
    registry: SchemeRegistry,
    hooks: HookRegistry,
    store_dir: PathBuf,
}

impl<S: RecordStore> DocrefApi<S> {
    pub fn new(store: S, store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            registry: SchemeRegistry::with_defaults(),
            hooks: HookRegistry::new(),
            store_dir: store_dir.into(),
        }
    }

    /// Replaces the scheme registry, e.g. to honor a configured default
    /// scheme or to add custom backends.
    pub fn with_registry(mut self, registry: SchemeRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    pub fn create_record(&mut self, data: Value) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, &self.hooks, data)
    }

    pub fn list_records(&self, show_deleted: bool) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, show_deleted)
    }

    pub fn show_record(&self, id: &str) -> Result<commands::CmdResult> {
        commands::show::run(&self.store, id)
    }

    pub fn delete_record(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn cat_document(&self, id: &str, pointer: &str) -> Result<commands::CmdResult> {
        commands::cat::run(&self.store, &self.registry, id, pointer)
    }

    pub fn copy_document(
        &self,
        id: &str,
        pointer: &str,
        destination: &str,
    ) -> Result<commands::CmdResult> {
        commands::cp::run(&self.store, &self.registry, id, pointer, destination)
    }

    pub fn move_document(
        &mut self,
        id: &str,
        pointer: &str,
        destination: &str,
    ) -> Result<commands::CmdResult> {
        commands::mv::run(
            &mut self.store,
            &self.registry,
            &self.hooks,
            id,
            pointer,
            destination,
        )
    }

    pub fn remove_document(
        &mut self,
        id: &str,
        pointer: &str,
        force: bool,
    ) -> Result<commands::CmdResult> {
        commands::rm::run(
            &mut self.store,
            &self.registry,
            &self.hooks,
            id,
            pointer,
            force,
        )
    }

    pub fn set_contents(
        &self,
        id: &str,
        pointer: &str,
        source: &mut dyn Read,
    ) -> Result<commands::CmdResult> {
        commands::setcontents::run(&self.store, &self.registry, &self.hooks, id, pointer, source)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.store_dir)
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }
}

pub use commands::{CmdMessage, CmdResult, MessageLevel};
