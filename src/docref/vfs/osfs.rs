use std::fs::{self, OpenOptions};

use super::{Backend, OpenMode, VfsFile};
use crate::error::{DocrefError, Result};

/// Local filesystem backend. Paths go straight to `std::fs`.
#[derive(Debug, Default)]
pub struct OsFs;

impl OsFs {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for OsFs {
    fn open(&self, path: &str, mode: OpenMode) -> Result<Box<dyn VfsFile>> {
        let mut options = OpenOptions::new();
        match mode {
            OpenMode::Read => options.read(true),
            OpenMode::Write => options.write(true).create(true).truncate(true),
            OpenMode::ReadWrite => options.read(true).write(true).create(true),
            OpenMode::Append => options.append(true).create(true),
        };
        let file = options.open(path).map_err(DocrefError::Io)?;
        Ok(Box::new(file))
    }

    fn remove(&self, path: &str) -> Result<()> {
        fs::remove_file(path).map_err(DocrefError::Io)
    }
}
