//! Lurebox - a Wi-Fi honeypot activity monitor.
//!
//! Lurebox passively observes devices that join a deliberately offered
//! rogue wireless network. It extracts identity and activity signals from
//! DNS queries and DHCP exchanges, appends them to a CSV event log, and
//! serves a live auto-refreshing dashboard of recent activity.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`]: Configuration loading and validation
//! - [`capture`]: Packet sources, frame decoding, and event extraction
//! - [`classify`]: Domain categorization
//! - [`vendor`]: MAC-prefix vendor labels
//! - [`journal`]: The append-only CSV event log, both schema generations
//! - [`filter`]: Suppression of boring DNS traffic
//! - [`dashboard`]: The HTML dashboard
//! - [`error`]: Error types
//!
//! Two binaries share this library: `sniffer` (capture side) and `portal`
//! (presentation side), coordinating only through the log file.
//!
//! # Testing
//!
//! The capture side is driven through a trait-based packet source, so a
//! scripted packet sequence can stand in for a live interface:
//!
//! ```rust
//! use lurebox::classify::Classifier;
//! use lurebox::capture::{DecodedPacket, Dispatcher};
//!
//! let dispatcher = Dispatcher::new(Classifier::default());
//! assert!(dispatcher.dispatch(&DecodedPacket::default()).is_none());
//! ```

pub mod capture;
pub mod classify;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod filter;
pub mod journal;
pub mod vendor;

pub use config::Config;
pub use error::{Error, Result};
pub use event::{Event, EventKind};
