//! Data log: the append-only CSV file on the SD card.
//!
//! At startup [`DataLog::open_or_create_unique`] probes `LOGGER00.CSV`,
//! `LOGGER01.CSV`, … in ascending order and opens the first name that
//! does not exist yet. That file stays the append target until power-down;
//! it is never closed explicitly.
//!
//! If the medium is missing or all 100 names are taken, the log comes up
//! *unready*: the failure is reported once and every later append or flush
//! is a silent no-op. There is no retry.

use core::fmt::Write;

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, LogStorage};
use crate::error::{Error, InitFailure, StorageError};
use crate::sample::{CSV_HEADER, Sample};

/// File stem before the two sequence digits (6 + 2 = 8 characters).
pub const LOG_STEM: &str = "LOGGER";
/// File extension (3 characters).
pub const LOG_EXT: &str = "CSV";
/// Number of sequence slots, `00` through `99`.
pub const LOG_SLOTS: u8 = 100;

/// An 8.3 log file name.
pub type LogName = heapless::String<12>;

/// Build the file name for sequence number `seq` (`0..LOG_SLOTS`).
pub fn log_file_name(seq: u8) -> LogName {
    let mut name = LogName::new();
    // 6 + 2 + 1 + 3 = 12 characters always fit.
    let _ = write!(name, "{LOG_STEM}{seq:02}.{LOG_EXT}");
    name
}

/// State of the single append target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogHandle {
    /// A file is open for appending.
    Ready { name: LogName },
    /// Startup failed; every operation is a no-op.
    Unready(InitFailure),
}

/// The log sink: owns the storage device for the process lifetime.
pub struct DataLog<W: LogStorage> {
    storage: W,
    handle: LogHandle,
    header_written: bool,
}

impl<W: LogStorage> DataLog<W> {
    /// Select and open the first unused log name.
    ///
    /// Never fails: on error the returned log is unready and the failure
    /// has already been reported through `sink`.
    pub fn open_or_create_unique(mut storage: W, sink: &mut impl EventSink) -> Self {
        let handle = match Self::select_and_open(&mut storage) {
            Ok(name) => {
                info!("DataLog: logging to {}", name);
                LogHandle::Ready { name }
            }
            Err(failure) => {
                warn!("DataLog: {}, continuing without persistence", failure);
                sink.emit(&AppEvent::InitFailed(failure));
                LogHandle::Unready(failure)
            }
        };
        Self {
            storage,
            handle,
            header_written: false,
        }
    }

    fn select_and_open(storage: &mut W) -> Result<LogName, InitFailure> {
        if !storage.is_ready() {
            return Err(InitFailure::StorageUnavailable);
        }
        let name = (0..LOG_SLOTS)
            .map(log_file_name)
            .find(|name| !storage.exists(name))
            .ok_or(InitFailure::LogNamesExhausted)?;
        storage
            .open_append(&name)
            .map_err(|_| InitFailure::StorageUnavailable)?;
        Ok(name)
    }

    /// Write the column header. Only the first call has any effect.
    pub fn write_header(&mut self) -> Result<(), StorageError> {
        if self.header_written || !self.is_ready() {
            return Ok(());
        }
        self.header_written = true;
        self.storage.append_line(CSV_HEADER)
    }

    /// Buffer one record line. No-op on an unready log.
    pub fn append_line(&mut self, line: &str) -> Result<(), StorageError> {
        if !self.is_ready() {
            debug!("DataLog: append dropped (unready)");
            return Ok(());
        }
        self.storage.append_line(line)
    }

    /// Render and buffer one sample.
    pub fn append_sample(&mut self, sample: &Sample) -> Result<(), Error> {
        let line = sample.to_line().map_err(|_| StorageError::LineTooLong)?;
        self.append_line(&line)?;
        Ok(())
    }

    /// Force buffered records to the medium. No-op on an unready log.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        if !self.is_ready() {
            return Ok(());
        }
        self.storage.flush()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.handle, LogHandle::Ready { .. })
    }

    pub fn handle(&self) -> &LogHandle {
        &self.handle
    }

    /// Name of the open file, if any.
    pub fn name(&self) -> Option<&LogName> {
        match &self.handle {
            LogHandle::Ready { name } => Some(name),
            LogHandle::Unready(_) => None,
        }
    }

    /// Borrow the storage device (inspection in tests and diagnostics).
    pub fn storage(&self) -> &W {
        &self.storage
    }
}
