//! Suppression of boring DNS traffic.
//!
//! Applied to the normalized event stream before rendering. DHCP events
//! always pass; DNS events are dropped when their queried domain matches
//! the denylist.

use crate::event::{Event, EventKind};

/// Built-in denylist of background-noise substrings.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "apple.com",
    "icloud.com",
    "gstatic.com",
    "googleapis.com",
    "time-ios",
    "verizon.telephony",
    "rcs.telephony",
    ".arpa",
    "msftncsi.com",
    "windows.com",
    "ubuntu.com",
    "ntp.org",
];

/// A compiled denylist for noise suppression.
///
/// Patterns are lowercased at construction so the per-event check only
/// lowercases the info field once.
#[derive(Clone, Debug)]
pub struct NoiseFilter {
    denylist: Vec<String>,
}

impl NoiseFilter {
    /// Create a filter from denylist substrings.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            denylist: patterns
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Decide whether an event survives filtering.
    ///
    /// The kind is re-derived from info and category rather than trusted
    /// from the row, so stale legacy rows still bypass domain filtering
    /// when they are DHCP-shaped.
    pub fn retain(&self, event: &Event) -> bool {
        if EventKind::derive(&event.info, &event.category) == EventKind::Dhcp {
            return true;
        }

        if event.info.is_empty() {
            return false;
        }

        let info = event.info.to_lowercase();
        !self
            .denylist
            .iter()
            .any(|pattern| info.contains(pattern.as_str()))
    }

    /// Filter a normalized event stream, preserving order.
    pub fn apply(&self, events: Vec<Event>) -> Vec<Event> {
        events.into_iter().filter(|e| self.retain(e)).collect()
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dns_event(info: &str) -> Event {
        Event {
            timestamp: "2025-01-01 00:00:00".to_string(),
            kind: EventKind::Dns,
            vendor: "Device AA:BB:CC".to_string(),
            mac: "aa:bb:cc:dd:ee:ff".to_string(),
            client_ip: "10.0.0.5".to_string(),
            info: info.to_string(),
            category: "Unknown".to_string(),
        }
    }

    #[test]
    fn should_drop_denylisted_domains() {
        let filter = NoiseFilter::default();

        assert!(!filter.retain(&dns_event("gstatic.com")));
        assert!(!filter.retain(&dns_event("pool.ntp.org")));
        assert!(!filter.retain(&dns_event("5.4.3.2.in-addr.arpa")));
    }

    #[test]
    fn should_retain_interesting_domains() {
        let filter = NoiseFilter::default();

        assert!(filter.retain(&dns_event("example.com")));
        assert!(filter.retain(&dns_event("reddit.com")));
    }

    #[test]
    fn should_match_denylist_case_insensitively() {
        let filter = NoiseFilter::default();

        assert!(!filter.retain(&dns_event("Connectivity.GSTATIC.com")));
    }

    #[test]
    fn should_drop_events_with_empty_info() {
        let filter = NoiseFilter::default();

        assert!(!filter.retain(&dns_event("")));
    }

    #[test]
    fn should_always_retain_dhcp_events() {
        let filter = NoiseFilter::default();

        let mut event = dns_event("DHCP Request: hostname=phone");
        event.kind = EventKind::Dhcp;
        event.category = "DHCP".to_string();
        assert!(filter.retain(&event));

        // A DHCP-shaped row never reaches the domain check, even when the
        // summary happens to contain a denylisted substring.
        let mut event = dns_event("DHCP Request: vendor=apple.com");
        event.category = "DHCP".to_string();
        assert!(filter.retain(&event));
    }

    #[test]
    fn should_detect_dhcp_by_info_prefix_alone() {
        let filter = NoiseFilter::default();

        // Legacy row with a stale category still bypasses domain filtering.
        let mut event = dns_event("DHCP Request: no extra details");
        event.category = "Unknown".to_string();
        assert!(filter.retain(&event));
    }

    #[test]
    fn should_preserve_order_when_applying() {
        let filter = NoiseFilter::default();

        let events = vec![
            dns_event("example.com"),
            dns_event("gstatic.com"),
            dns_event("another.example.net"),
        ];

        let kept = filter.apply(events);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].info, "example.com");
        assert_eq!(kept[1].info, "another.example.net");
    }

    #[test]
    fn should_honor_custom_denylists() {
        let filter = NoiseFilter::new(["example.com"]);

        assert!(!filter.retain(&dns_event("www.example.com")));
        assert!(filter.retain(&dns_event("gstatic.com")));
    }
}
