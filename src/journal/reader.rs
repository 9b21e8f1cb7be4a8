//! Reading the activity log back into canonical events.
//!
//! The log has accumulated two schema generations, distinguished purely by
//! field count. Both normalize to the same [`Event`]; anything shorter is
//! skipped. A missing file is an empty log, not an error.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::StringRecord;

use crate::error::{JournalError, Result};
use crate::event::{Event, EventKind};

/// Shape of a persisted record, decided by field count alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordShape {
    /// 6+ fields: timestamp, vendor, mac, client_ip, info, category.
    Current,
    /// Exactly 5 fields: timestamp, device_label, client_ip, info, category.
    Legacy,
    /// Fewer than 5 fields; skipped.
    Malformed,
}

/// Decide which schema generation a record belongs to.
pub fn record_shape(field_count: usize) -> RecordShape {
    match field_count {
        0..=4 => RecordShape::Malformed,
        5 => RecordShape::Legacy,
        _ => RecordShape::Current,
    }
}

/// Read the whole log top to bottom, oldest first.
///
/// A first line whose leading field starts with "timestamp" (any case) is
/// a header and skipped. Unparsable or malformed lines are skipped, which
/// also covers a final line truncated by a crash or a concurrent append.
pub fn read_events(path: &Path) -> Result<Vec<Event>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(JournalError::Open(err).into()),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut events = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let Ok(record) = record else {
            continue;
        };

        if index == 0 && is_header(&record) {
            continue;
        }

        match record_shape(record.len()) {
            RecordShape::Malformed => {}
            RecordShape::Current => events.push(current_event(&record)),
            RecordShape::Legacy => events.push(legacy_event(&record)),
        }
    }

    Ok(events)
}

fn is_header(record: &StringRecord) -> bool {
    record
        .get(0)
        .is_some_and(|field| field.to_lowercase().starts_with("timestamp"))
}

fn field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or_default().to_string()
}

fn current_event(record: &StringRecord) -> Event {
    let info = field(record, 4);
    let category = field(record, 5);

    Event {
        timestamp: field(record, 0),
        kind: EventKind::derive(&info, &category),
        vendor: field(record, 1),
        mac: field(record, 2),
        client_ip: field(record, 3),
        info,
        category,
    }
}

fn legacy_event(record: &StringRecord) -> Event {
    let (vendor, mac) = split_device_label(record.get(1).unwrap_or_default());
    let info = field(record, 3);
    let category = field(record, 4);

    Event {
        timestamp: field(record, 0),
        kind: EventKind::derive(&info, &category),
        vendor,
        mac,
        client_ip: field(record, 2),
        info,
        category,
    }
}

/// Split a legacy "Vendor (MAC)" label.
///
/// A label without the parenthesized form becomes the vendor as-is with an
/// empty MAC.
fn split_device_label(label: &str) -> (String, String) {
    if label.ends_with(')') {
        if let Some((vendor, mac)) = label.split_once('(') {
            return (
                vendor.trim().to_string(),
                mac.trim_end_matches(')').trim().to_string(),
            );
        }
    }

    (label.to_string(), String::new())
}
