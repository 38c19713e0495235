//! The document accessor: a record, a pointer into it, and the file
//! operations that keep the two consistent.

use std::io::Read;

use serde_json::Value;

use crate::error::{DocrefError, Result};
use crate::patch::PatchOp;
use crate::pointer;
use crate::vfs::{self, OpenMode, SchemeRegistry, VfsFile};

/// A live view over one URI slot inside a JSON record.
///
/// A `Document` holds no state of its own: it is the pair of a record
/// borrow and a JSON Pointer, plus the scheme registry used to reach the
/// file the URI names. Reference updates follow the physical operation,
/// so a failed move or delete leaves the record pointing at the original,
/// still-valid location.
///
/// ```
/// use docref::document::Document;
/// use docref::vfs;
/// use serde_json::json;
///
/// # fn main() -> docref::error::Result<()> {
/// let registry = vfs::default_registry();
/// let (backend, path) = registry.resolve("mem://intro/a.txt")?;
/// vfs::set_contents(backend.as_ref(), &path, b"hello")?;
///
/// let mut record = json!({"document": {"uri": "mem://intro/a.txt"}});
/// let mut doc = Document::new(&mut record, "/document/uri");
/// doc.move_to("mem://intro/b.txt")?;
/// assert_eq!(record["document"]["uri"], json!("mem://intro/b.txt"));
/// # Ok(())
/// # }
/// ```
pub struct Document<'a> {
    record: &'a mut Value,
    pointer: &'a str,
    resolver: &'a SchemeRegistry,
}

impl<'a> Document<'a> {
    /// Bind `record` and `pointer`, resolving URIs through the
    /// process-default registry.
    pub fn new(record: &'a mut Value, pointer: &'a str) -> Self {
        Self {
            record,
            pointer,
            resolver: vfs::default_registry(),
        }
    }

    /// Use a specific registry instead of the process default.
    pub fn with_resolver(mut self, resolver: &'a SchemeRegistry) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn pointer(&self) -> &str {
        self.pointer
    }

    /// The URI currently stored at the pointer.
    ///
    /// `None` when the field is JSON null or absent (its parent must
    /// still exist). Anything other than a string or null is an error.
    pub fn uri(&self) -> Result<Option<&str>> {
        match pointer::resolve_opt(self.record, self.pointer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(uri)) => Ok(Some(uri.as_str())),
            Some(_) => Err(DocrefError::InvalidUriValue(self.pointer.to_string())),
        }
    }

    /// Write a new URI (or null) at the pointer, creating intermediate
    /// containers as needed. Touches only the record, never a file.
    pub fn set_uri(&mut self, uri: Option<&str>) -> Result<()> {
        let value = match uri {
            Some(uri) => Value::String(uri.to_string()),
            None => Value::Null,
        };
        pointer::set(self.record, self.pointer, value)?;
        Ok(())
    }

    /// Open the referenced file. The caller owns the returned handle and
    /// closes it by dropping it.
    pub fn open(&self, mode: OpenMode) -> Result<Box<dyn VfsFile>> {
        let uri = self.require_uri()?;
        let (backend, path) = self.resolver.resolve(&uri)?;
        backend.open(&path, mode)
    }

    /// Move the file to `destination`, then point the record there.
    ///
    /// The physical move happens first. If it fails, the record is left
    /// untouched and still names the original location.
    pub fn move_to(&mut self, destination: &str) -> Result<()> {
        let uri = self.require_uri()?;
        let (source, source_path) = self.resolver.resolve(&uri)?;
        let (target, target_path) = self.resolver.resolve(destination)?;
        vfs::move_file(source.as_ref(), &source_path, target.as_ref(), &target_path)?;
        self.set_uri(Some(destination))
    }

    /// Copy the file to `destination`, leaving the record untouched.
    ///
    /// Returns the JSON Patch `replace` operation a caller would apply to
    /// a *derived* record to point it at the copy.
    pub fn copy_to(&self, destination: &str) -> Result<PatchOp> {
        let uri = self.require_uri()?;
        let (source, source_path) = self.resolver.resolve(&uri)?;
        let (target, target_path) = self.resolver.resolve(destination)?;
        vfs::copy_file(source.as_ref(), &source_path, target.as_ref(), &target_path)?;
        Ok(PatchOp::replace(
            self.pointer,
            Value::String(destination.to_string()),
        ))
    }

    /// Replace the file's content with everything `source` yields.
    ///
    /// The URI, and therefore the record, stays exactly as it was. The
    /// caller keeps ownership of `source` and closes it itself.
    pub fn set_contents(&self, source: &mut dyn Read) -> Result<()> {
        let uri = self.require_uri()?;
        let (backend, path) = self.resolver.resolve(&uri)?;
        let mut data = Vec::new();
        source.read_to_end(&mut data)?;
        vfs::set_contents(backend.as_ref(), &path, &data)
    }

    /// Replace the file's content from another URI. The source handle is
    /// opened and closed here.
    pub fn set_contents_from(&self, source: &str) -> Result<()> {
        let (backend, path) = self.resolver.resolve(source)?;
        let mut reader = backend.open(&path, OpenMode::Read)?;
        self.set_contents(&mut reader)
    }

    /// Clear the reference; with `force`, delete the file first.
    ///
    /// Without `force` this only writes null at the pointer and is
    /// idempotent. With `force` the physical delete must succeed before
    /// the reference is cleared, and a missing URI is an error.
    pub fn remove(&mut self, force: bool) -> Result<()> {
        if force {
            let uri = self.require_uri()?;
            let (backend, path) = self.resolver.resolve(&uri)?;
            backend.remove(&path)?;
        }
        self.set_uri(None)
    }

    fn require_uri(&self) -> Result<String> {
        self.uri()?
            .map(str::to_owned)
            .ok_or_else(|| DocrefError::UnresolvedUri(self.pointer.to_string()))
    }
}
