//! # Virtual Filesystem Layer
//!
//! Everything the document layer does to a file goes through this module.
//! A [`Backend`] knows how to open and remove files for one kind of
//! storage; a [`SchemeRegistry`] maps URI schemes to backends so that
//! `mem://scratch/a.txt` and `/tmp/a.txt` are handled by different code
//! without the caller noticing.
//!
//! ## Implementations
//!
//! - [`osfs::OsFs`]: the local filesystem (`file://`, and bare paths via
//!   the default scheme)
//! - [`memfs::MemFs`]: in-memory files for tests and scratch work
//!   (`mem://`)
//! - [`tarfs::TarFs`]: read-only access to tar archive entries (`tar://`)
//!
//! ## Pairwise operations
//!
//! [`copy_file`], [`move_file`] and [`set_contents`] work on *two*
//! resolved locations, so they function across backends: moving
//! `mem://a` to `/tmp/a` is a copy into the target backend followed by a
//! remove from the source backend.

use std::collections::HashMap;
use std::io::{Read, Seek, Write};
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::{DocrefError, Result};

pub mod memfs;
pub mod osfs;
pub mod tarfs;

/// How a file handle will be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    /// Create or truncate, then write.
    Write,
    ReadWrite,
    Append,
}

/// An open file handle, whichever backend produced it.
///
/// Dropping the handle closes it; backends that buffer (like `MemFs`)
/// publish writes at that point.
pub trait VfsFile: Read + Write + Seek + Send {}

impl<T: Read + Write + Seek + Send> VfsFile for T {}

/// Abstract interface for file I/O against one storage kind.
///
/// Backends are shared behind `Arc` and resolved per operation, so they
/// must not carry per-call state.
pub trait Backend: Send + Sync + std::fmt::Debug {
    fn open(&self, path: &str, mode: OpenMode) -> Result<Box<dyn VfsFile>>;
    fn remove(&self, path: &str) -> Result<()>;
}

/// Maps URI schemes to backends.
///
/// A URI `scheme://rest` resolves to the backend registered for
/// `scheme`, which then sees only `rest`. URIs without a `://` separator
/// go to the default scheme (initially `file`).
pub struct SchemeRegistry {
    backends: HashMap<String, Arc<dyn Backend>>,
    default_scheme: String,
}

impl SchemeRegistry {
    /// An empty registry. Useful for tests that want full control over
    /// which backends exist.
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
            default_scheme: "file".to_string(),
        }
    }

    /// A registry with the stock backends: `file`, `mem` and `tar`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("file", Arc::new(osfs::OsFs::new()));
        registry.register("mem", Arc::new(memfs::MemFs::new()));
        registry.register("tar", Arc::new(tarfs::TarFs::new()));
        registry
    }

    pub fn register(&mut self, scheme: &str, backend: Arc<dyn Backend>) {
        self.backends.insert(scheme.to_string(), backend);
    }

    pub fn set_default_scheme(&mut self, scheme: &str) {
        self.default_scheme = scheme.to_string();
    }

    pub fn default_scheme(&self) -> &str {
        &self.default_scheme
    }

    /// Split a URI into its backend and the backend-local path.
    pub fn resolve(&self, uri: &str) -> Result<(Arc<dyn Backend>, String)> {
        let (scheme, path) = match uri.split_once("://") {
            Some((scheme, path)) => (scheme, path),
            None => (self.default_scheme.as_str(), uri),
        };
        let backend = self
            .backends
            .get(scheme)
            .cloned()
            .ok_or_else(|| DocrefError::UnknownScheme(scheme.to_string()))?;
        Ok((backend, path.to_string()))
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

static DEFAULT_REGISTRY: Lazy<SchemeRegistry> = Lazy::new(SchemeRegistry::with_defaults);

/// The process-wide registry used when a document is not given its own.
pub fn default_registry() -> &'static SchemeRegistry {
    &DEFAULT_REGISTRY
}

/// Copy a file between two resolved locations, possibly on different
/// backends.
pub fn copy_file(
    source: &dyn Backend,
    source_path: &str,
    target: &dyn Backend,
    target_path: &str,
) -> Result<()> {
    let mut reader = source.open(source_path, OpenMode::Read)?;
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    drop(reader);
    set_contents(target, target_path, &data)
}

/// Move a file between two resolved locations.
///
/// Copy first, then remove the source. If the remove fails the source
/// file survives alongside the copy and the error propagates.
pub fn move_file(
    source: &dyn Backend,
    source_path: &str,
    target: &dyn Backend,
    target_path: &str,
) -> Result<()> {
    copy_file(source, source_path, target, target_path)?;
    source.remove(source_path)
}

/// Replace a file's content wholesale.
pub fn set_contents(backend: &dyn Backend, path: &str, data: &[u8]) -> Result<()> {
    let mut handle = backend.open(path, OpenMode::Write)?;
    handle.write_all(data)?;
    handle.flush()?;
    Ok(())
}
