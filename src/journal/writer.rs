//! Appending events to the activity log.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use crate::error::{JournalError, Result};
use crate::event::Event;

/// Appends events to the CSV log, one 6-field record per event.
///
/// Designed for a single writing process; readers scan the same file with
/// no coordination. Each append opens, writes, and flushes so that readers
/// only ever race against one record.
pub struct JournalWriter {
    path: PathBuf,
}

impl JournalWriter {
    /// Create a writer, ensuring the log's parent directory exists.
    /// Safe to call repeatedly.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(JournalError::CreateDir)?;
            }
        }

        Ok(Self { path })
    }

    /// Append one record in the current schema:
    /// timestamp, vendor, mac, client_ip, info, category.
    pub fn append(&mut self, event: &Event) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(JournalError::Open)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer
            .write_record([
                event.timestamp.as_str(),
                event.vendor.as_str(),
                event.mac.as_str(),
                event.client_ip.as_str(),
                event.info.as_str(),
                event.category.as_str(),
            ])
            .map_err(JournalError::Append)?;
        writer.flush().map_err(JournalError::Flush)?;

        Ok(())
    }
}
