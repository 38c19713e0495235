use std::collections::HashMap;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{Backend, OpenMode, VfsFile};
use crate::error::{DocrefError, Result};

type FileMap = Arc<Mutex<HashMap<String, Vec<u8>>>>;

/// In-memory backend for tests and scratch files.
///
/// Paths are plain string keys, no normalization. Handles work on a
/// private buffer and publish it to the shared map when dropped, so a
/// write becomes visible once the handle is closed. Clones share the
/// same file map.
#[derive(Debug, Default, Clone)]
pub struct MemFs {
    files: FileMap,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.lock().contains_key(path)
    }

    // Poisoning only means another handle panicked mid-insert; the map
    // itself is still a valid HashMap.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        match self.files.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn not_found(path: &str) -> DocrefError {
    DocrefError::Io(io::Error::new(
        io::ErrorKind::NotFound,
        format!("mem path not found: {}", path),
    ))
}

impl Backend for MemFs {
    fn open(&self, path: &str, mode: OpenMode) -> Result<Box<dyn VfsFile>> {
        let existing = self.lock().get(path).cloned();
        let (buffer, writable) = match mode {
            OpenMode::Read => match existing {
                Some(bytes) => (bytes, false),
                None => return Err(not_found(path)),
            },
            OpenMode::Write => (Vec::new(), true),
            OpenMode::ReadWrite | OpenMode::Append => (existing.unwrap_or_default(), true),
        };
        let mut handle = MemFile {
            cursor: Cursor::new(buffer),
            target: if writable {
                Some((Arc::clone(&self.files), path.to_string()))
            } else {
                None
            },
        };
        if mode == OpenMode::Append {
            handle.cursor.seek(SeekFrom::End(0)).map_err(DocrefError::Io)?;
        }
        Ok(Box::new(handle))
    }

    fn remove(&self, path: &str) -> Result<()> {
        if self.lock().remove(path).is_none() {
            return Err(not_found(path));
        }
        Ok(())
    }
}

struct MemFile {
    cursor: Cursor<Vec<u8>>,
    // Some for writable handles; the buffer lands here on drop.
    target: Option<(FileMap, String)>,
}

impl Read for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Write for MemFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.target.is_none() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "handle opened read-only",
            ));
        }
        self.cursor.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.cursor.flush()
    }
}

impl Seek for MemFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl Drop for MemFile {
    fn drop(&mut self) {
        if let Some((files, path)) = self.target.take() {
            let mut files = match files.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            files.insert(path, self.cursor.get_ref().clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_publishes_on_drop() {
        let fs = MemFs::new();
        let mut handle = fs.open("a.txt", OpenMode::Write).unwrap();
        handle.write_all(b"hello").unwrap();
        assert!(!fs.contains("a.txt"));
        drop(handle);
        assert!(fs.contains("a.txt"));

        let mut out = String::new();
        fs.open("a.txt", OpenMode::Read)
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn read_of_missing_path_fails() {
        let fs = MemFs::new();
        assert!(fs.open("missing", OpenMode::Read).is_err());
    }

    #[test]
    fn read_only_handle_rejects_writes() {
        let fs = MemFs::new();
        super::super::set_contents(&fs, "a.txt", b"x").unwrap();
        let mut handle = fs.open("a.txt", OpenMode::Read).unwrap();
        assert!(handle.write_all(b"y").is_err());
    }

    #[test]
    fn append_extends_existing_content() {
        let fs = MemFs::new();
        super::super::set_contents(&fs, "a.txt", b"one").unwrap();
        fs.open("a.txt", OpenMode::Append)
            .unwrap()
            .write_all(b" two")
            .unwrap();

        let mut out = String::new();
        fs.open("a.txt", OpenMode::Read)
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "one two");
    }

    #[test]
    fn write_truncates_existing_content() {
        let fs = MemFs::new();
        super::super::set_contents(&fs, "a.txt", b"long old content").unwrap();
        super::super::set_contents(&fs, "a.txt", b"new").unwrap();

        let mut out = String::new();
        fs.open("a.txt", OpenMode::Read)
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "new");
    }

    #[test]
    fn remove_missing_path_fails() {
        let fs = MemFs::new();
        assert!(fs.remove("missing").is_err());
    }

    #[test]
    fn clones_share_the_file_map() {
        let fs = MemFs::new();
        let other = fs.clone();
        super::super::set_contents(&fs, "a.txt", b"x").unwrap();
        assert!(other.contains("a.txt"));
    }
}
