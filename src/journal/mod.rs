//! The append-only CSV activity log shared by both processes.
//!
//! Exactly one writer (the sniffer) appends; readers (the portal) scan the
//! whole file per request. No locking is used.

pub mod reader;
pub mod writer;

pub use reader::{RecordShape, read_events, record_shape};
pub use writer::JournalWriter;
