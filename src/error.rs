//! Error types for the Lurebox honeypot monitor.

use std::io;

use thiserror::Error;

/// Main error type for Lurebox operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("validation failed: {0}")]
    Validation(String),
}

/// Packet-capture errors.
///
/// Only setup can fail; once the channel is open, a capture problem
/// simply ends the packet stream.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no suitable network interface found")]
    NoInterface,

    #[error("failed to open datalink channel: {0}")]
    ChannelOpen(String),

    #[error("unsupported channel type")]
    UnsupportedChannel,
}

/// Errors touching the on-disk activity log.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("failed to create log directory: {0}")]
    CreateDir(#[source] io::Error),

    #[error("failed to open log file: {0}")]
    Open(#[source] io::Error),

    #[error("failed to append record: {0}")]
    Append(#[source] csv::Error),

    #[error("failed to flush log file: {0}")]
    Flush(#[source] io::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
