//! Canonical activity events shared by the capture and presentation sides.

use std::fmt;

use chrono::Local;

/// Kind of activity extracted from a captured packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Dns,
    Dhcp,
}

impl EventKind {
    /// Re-derive the kind from persisted fields.
    ///
    /// Legacy rows may carry a stale category, so the info prefix wins.
    pub fn derive(info: &str, category: &str) -> Self {
        if info.starts_with("DHCP") || category.eq_ignore_ascii_case("DHCP") {
            Self::Dhcp
        } else {
            Self::Dns
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dns => f.write_str("DNS"),
            Self::Dhcp => f.write_str("DHCP"),
        }
    }
}

/// A single observed device activity, immutable once created.
///
/// Created exactly once by an extractor (or the log normalizer), appended to
/// the journal, and read back per dashboard render. Never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// Human-readable local time.
    pub timestamp: String,
    pub kind: EventKind,
    /// Vendor label derived from the MAC prefix.
    pub vendor: String,
    /// Source MAC address; empty when no Ethernet layer was seen.
    pub mac: String,
    /// Client address, or the sentinels "unknown" / "0.0.0.0".
    pub client_ip: String,
    /// Queried domain for DNS, human summary for DHCP.
    pub info: String,
    pub category: String,
}

/// Current local time in the journal's timestamp format.
pub fn local_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_derive_dhcp_from_info_prefix() {
        assert_eq!(
            EventKind::derive("DHCP Request: hostname=phone", "Unknown"),
            EventKind::Dhcp
        );
    }

    #[test]
    fn should_derive_dhcp_from_category_case_insensitively() {
        assert_eq!(EventKind::derive("", "dhcp"), EventKind::Dhcp);
        assert_eq!(EventKind::derive("example.com", "DHCP"), EventKind::Dhcp);
    }

    #[test]
    fn should_derive_dns_otherwise() {
        assert_eq!(EventKind::derive("example.com", "Unknown"), EventKind::Dns);
        assert_eq!(EventKind::derive("", ""), EventKind::Dns);
    }

    #[test]
    fn should_format_kinds_for_display() {
        assert_eq!(EventKind::Dns.to_string(), "DNS");
        assert_eq!(EventKind::Dhcp.to_string(), "DHCP");
    }

    #[test]
    fn should_format_timestamp_without_subseconds() {
        let ts = local_timestamp();
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
    }
}
