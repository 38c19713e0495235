use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

use flate2::read::GzDecoder;
use tar::Archive;

use super::{Backend, OpenMode, VfsFile};
use crate::error::{DocrefError, Result};

const ENTRY_SEPARATOR: &str = "!/";

/// Read-only backend over tar archives (`.tar`, `.tar.gz`, `.tgz`).
///
/// Paths name the archive and the entry inside it, joined by `!/`:
/// `tar:///backups/bundle.tar.gz!/notes/a.txt`. The whole entry is
/// decompressed into memory on open. Writes and removes are rejected.
#[derive(Debug, Default)]
pub struct TarFs;

impl TarFs {
    pub fn new() -> Self {
        Self
    }

    fn split(path: &str) -> Result<(&str, &str)> {
        path.split_once(ENTRY_SEPARATOR).ok_or_else(|| {
            DocrefError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("tar path '{}' is missing the '!/' entry separator", path),
            ))
        })
    }
}

impl Backend for TarFs {
    fn open(&self, path: &str, mode: OpenMode) -> Result<Box<dyn VfsFile>> {
        if mode != OpenMode::Read {
            return Err(DocrefError::ReadOnly(format!("write to '{}'", path)));
        }
        let (archive_path, entry_path) = Self::split(path)?;
        let data = read_entry(archive_path, entry_path)?;
        Ok(Box::new(TarFile {
            cursor: Cursor::new(data),
        }))
    }

    fn remove(&self, path: &str) -> Result<()> {
        Err(DocrefError::ReadOnly(format!("remove '{}'", path)))
    }
}

fn read_entry(archive_path: &str, entry_path: &str) -> Result<Vec<u8>> {
    let file = File::open(archive_path).map_err(DocrefError::Io)?;
    if archive_path.ends_with(".gz") || archive_path.ends_with(".tgz") {
        extract(Archive::new(GzDecoder::new(file)), archive_path, entry_path)
    } else {
        extract(Archive::new(file), archive_path, entry_path)
    }
}

fn extract<R: Read>(
    mut archive: Archive<R>,
    archive_path: &str,
    entry_path: &str,
) -> Result<Vec<u8>> {
    for entry in archive.entries().map_err(DocrefError::Io)? {
        let mut entry = entry.map_err(DocrefError::Io)?;
        let matches = entry.path().map_err(DocrefError::Io)?.to_string_lossy() == entry_path;
        if matches {
            let mut data = Vec::new();
            entry.read_to_end(&mut data).map_err(DocrefError::Io)?;
            return Ok(data);
        }
    }
    Err(DocrefError::Io(io::Error::new(
        io::ErrorKind::NotFound,
        format!("entry '{}' not found in '{}'", entry_path, archive_path),
    )))
}

struct TarFile {
    cursor: Cursor<Vec<u8>>,
}

impl Read for TarFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Write for TarFile {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "tar entries are read-only",
        ))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for TarFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::path::{Path, PathBuf};

    fn build_archive(dir: &Path) -> PathBuf {
        let archive_path = dir.join("bundle.tar.gz");
        let file = File::create(&archive_path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let data = b"tarred contents";
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, "notes/a.txt", &data[..]).unwrap();
        builder.into_inner().unwrap().finish().unwrap();

        archive_path
    }

    #[test]
    fn reads_an_entry_from_a_gzipped_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = build_archive(dir.path());
        let path = format!("{}!/notes/a.txt", archive.display());

        let mut out = String::new();
        TarFs::new()
            .open(&path, OpenMode::Read)
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "tarred contents");
    }

    #[test]
    fn missing_entry_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let archive = build_archive(dir.path());
        let path = format!("{}!/notes/missing.txt", archive.display());

        assert!(TarFs::new().open(&path, OpenMode::Read).is_err());
    }

    #[test]
    fn rejects_path_without_entry_separator() {
        assert!(TarFs::new().open("bundle.tar.gz", OpenMode::Read).is_err());
    }

    #[test]
    fn rejects_writes_and_removes() {
        let fs = TarFs::new();
        assert!(matches!(
            fs.open("b.tar!/a", OpenMode::Write),
            Err(DocrefError::ReadOnly(_))
        ));
        assert!(matches!(
            fs.remove("b.tar!/a"),
            Err(DocrefError::ReadOnly(_))
        ));
    }
}
