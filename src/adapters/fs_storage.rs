//! Filesystem log storage.
//!
//! Implements [`LogStorage`] with `std::fs` rooted at a directory. On the
//! device that directory is the FAT volume mounted at
//! [`SD_MOUNT_POINT`](crate::pins::SD_MOUNT_POINT) by ESP-IDF's VFS; on the
//! host it is any directory, which lets the same adapter back simulations
//! and tests.
//!
//! Appends go into a [`BufWriter`]; only [`flush`](LogStorage::flush)
//! writes through and syncs the file. The buffer is sized for many hours
//! of records so it never spills on its own between flushes.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::app::ports::LogStorage;
use crate::error::StorageError;

/// Write buffer size (bytes).
const WRITE_BUFFER: usize = 4096;

/// Records are terminated with CRLF so the files open cleanly anywhere.
const LINE_END: &[u8] = b"\r\n";

pub struct FsLogStorage {
    root: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FsLogStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            writer: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LogStorage for FsLogStorage {
    fn is_ready(&self) -> bool {
        self.root.is_dir()
    }

    fn exists(&self, name: &str) -> bool {
        self.root.join(name).exists()
    }

    fn open_append(&mut self, name: &str) -> Result<(), StorageError> {
        let path = self.root.join(name);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                warn!("FsLogStorage: open {} failed: {}", path.display(), e);
                StorageError::Unavailable
            })?;
        debug!("FsLogStorage: opened {}", path.display());
        self.writer = Some(BufWriter::with_capacity(WRITE_BUFFER, file));
        Ok(())
    }

    fn append_line(&mut self, line: &str) -> Result<(), StorageError> {
        let writer = self.writer.as_mut().ok_or(StorageError::NotOpen)?;
        writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.write_all(LINE_END))
            .map_err(|_| StorageError::Io)
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        let writer = self.writer.as_mut().ok_or(StorageError::NotOpen)?;
        writer.flush().map_err(|_| StorageError::Io)?;
        writer.get_ref().sync_data().map_err(|_| StorageError::Io)
    }
}
