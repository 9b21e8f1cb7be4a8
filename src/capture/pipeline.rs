//! Packet routing, event extraction, and the capture loop.
//!
//! The dispatcher routes each decoded packet to exactly one extractor or
//! drops it; a routed packet produces exactly one journal append. Handling
//! is synchronous per packet, so a slow append stalls capture rather than
//! dropping events.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use super::decode::{DecodedPacket, DnsInfo};
use super::source::PacketSource;
use crate::classify::Classifier;
use crate::event::{Event, EventKind, local_timestamp};
use crate::journal::JournalWriter;
use crate::vendor::vendor_from_mac;

/// Sentinel client address for DNS events without an IP layer.
const UNKNOWN_IP: &str = "unknown";
/// Sentinel client address for DHCP clients without a lease yet.
const ZERO_IP: &str = "0.0.0.0";

/// Routes decoded packets to the DNS or DHCP extractor.
pub struct Dispatcher {
    classifier: Classifier,
}

impl Dispatcher {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Route a packet to exactly one extractor, or drop it silently.
    ///
    /// DHCP wins when both BOOTP and DHCP option layers are present, even
    /// if a DNS layer somehow also exists.
    pub fn dispatch(&self, packet: &DecodedPacket) -> Option<Event> {
        if packet.bootp.is_some() && packet.dhcp_options.is_some() {
            return self.extract_dhcp(packet);
        }

        if let Some(dns) = &packet.dns {
            if dns.question.is_some() {
                return self.extract_dns(packet, dns);
            }
        }

        None
    }

    /// Turn a DNS query packet into an event.
    ///
    /// Responses are dropped on purpose: logging both sides of a lookup
    /// would double-count every request.
    fn extract_dns(&self, packet: &DecodedPacket, dns: &DnsInfo) -> Option<Event> {
        if !dns.is_query {
            return None;
        }

        let question = dns.question.as_deref()?;
        let domain = question.strip_suffix('.').unwrap_or(question);

        let client_ip = packet
            .ip
            .as_ref()
            .map_or_else(|| UNKNOWN_IP.to_string(), |ip| ip.source.to_string());
        let mac = packet
            .ethernet
            .as_ref()
            .map(|eth| eth.source_mac.to_string())
            .unwrap_or_default();

        Some(Event {
            timestamp: local_timestamp(),
            kind: EventKind::Dns,
            vendor: vendor_from_mac(&mac),
            mac,
            client_ip,
            category: self.classifier.classify(domain),
            info: domain.to_string(),
        })
    }

    /// Turn a DHCP exchange into an event summarizing the identity options.
    fn extract_dhcp(&self, packet: &DecodedPacket) -> Option<Event> {
        let bootp = packet.bootp.as_ref()?;
        let options = packet.dhcp_options.as_ref()?;
        let ethernet = packet.ethernet.as_ref()?;

        let mac = ethernet.source_mac.to_string();
        let client_ip = if bootp.client_ip.is_unspecified() {
            ZERO_IP.to_string()
        } else {
            bootp.client_ip.to_string()
        };

        // Last occurrence wins, and hostname is always listed first.
        let mut hostname = None;
        let mut vendor_class = None;
        for option in options {
            match option {
                super::bootp::DhcpOption::Hostname(value) => hostname = Some(value.as_str()),
                super::bootp::DhcpOption::VendorClassId(value) => {
                    vendor_class = Some(value.as_str());
                }
            }
        }

        let mut parts = Vec::new();
        if let Some(value) = hostname {
            parts.push(format!("hostname={value}"));
        }
        if let Some(value) = vendor_class {
            parts.push(format!("vendor={value}"));
        }

        let details = if parts.is_empty() {
            "no extra details".to_string()
        } else {
            parts.join(", ")
        };

        Some(Event {
            timestamp: local_timestamp(),
            kind: EventKind::Dhcp,
            vendor: vendor_from_mac(&mac),
            mac,
            client_ip,
            info: format!("DHCP Request: {details}"),
            category: "DHCP".to_string(),
        })
    }
}

/// Run the blocking capture loop.
///
/// Pulls packets until the source ends or `running` is cleared. A failed
/// append loses that one event; capture keeps going. No retry queue.
pub fn run_capture<S: PacketSource>(
    mut source: S,
    dispatcher: &Dispatcher,
    writer: &mut JournalWriter,
    running: &AtomicBool,
) {
    while running.load(Ordering::SeqCst) {
        let Some(packet) = source.next_packet() else {
            break;
        };

        let Some(event) = dispatcher.dispatch(&packet) else {
            continue;
        };

        debug!(kind = %event.kind, info = %event.info, "captured event");

        if let Err(err) = writer.append(&event) {
            warn!("Failed to append event: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    use pnet::util::MacAddr;

    use crate::capture::bootp::{BootpFrame, DhcpOption};
    use crate::capture::decode::{DnsInfo, EthernetInfo, IpInfo};

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Classifier::default())
    }

    fn ethernet() -> Option<EthernetInfo> {
        Some(EthernetInfo {
            source_mac: MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff),
        })
    }

    fn dns_packet(domain: &str, is_query: bool) -> DecodedPacket {
        DecodedPacket {
            ethernet: ethernet(),
            ip: Some(IpInfo {
                source: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)),
            }),
            dns: Some(DnsInfo {
                is_query,
                question: Some(domain.to_string()),
            }),
            ..DecodedPacket::default()
        }
    }

    fn dhcp_packet(ciaddr: Ipv4Addr, options: Vec<DhcpOption>) -> DecodedPacket {
        DecodedPacket {
            ethernet: ethernet(),
            bootp: Some(BootpFrame { client_ip: ciaddr }),
            dhcp_options: Some(options),
            ..DecodedPacket::default()
        }
    }

    #[test]
    fn should_extract_dns_query_events() {
        let event = dispatcher()
            .dispatch(&dns_packet("www.reddit.com.", true))
            .unwrap();

        assert_eq!(event.kind, EventKind::Dns);
        assert_eq!(event.info, "www.reddit.com");
        assert_eq!(event.category, "Social / Community");
        assert_eq!(event.client_ip, "10.0.0.5");
        assert_eq!(event.mac, "aa:bb:cc:dd:ee:ff");
        assert_eq!(event.vendor, "Device AA:BB:CC");
    }

    #[test]
    fn should_strip_exactly_one_trailing_dot() {
        let event = dispatcher()
            .dispatch(&dns_packet("example.com..", true))
            .unwrap();
        assert_eq!(event.info, "example.com.");
    }

    #[test]
    fn should_drop_dns_responses() {
        assert!(dispatcher()
            .dispatch(&dns_packet("example.com.", false))
            .is_none());
    }

    #[test]
    fn should_use_sentinels_for_missing_layers() {
        let mut packet = dns_packet("example.com.", true);
        packet.ip = None;
        packet.ethernet = None;

        let event = dispatcher().dispatch(&packet).unwrap();
        assert_eq!(event.client_ip, "unknown");
        assert_eq!(event.mac, "");
        assert_eq!(event.vendor, "Unknown device");
    }

    #[test]
    fn should_extract_dhcp_events_with_options() {
        let event = dispatcher()
            .dispatch(&dhcp_packet(
                Ipv4Addr::new(10, 0, 0, 7),
                vec![
                    DhcpOption::Hostname("phone".to_string()),
                    DhcpOption::VendorClassId("android-dhcp-14".to_string()),
                ],
            ))
            .unwrap();

        assert_eq!(event.kind, EventKind::Dhcp);
        assert_eq!(
            event.info,
            "DHCP Request: hostname=phone, vendor=android-dhcp-14"
        );
        assert_eq!(event.category, "DHCP");
        assert_eq!(event.client_ip, "10.0.0.7");
    }

    #[test]
    fn should_list_hostname_first_regardless_of_option_order() {
        let event = dispatcher()
            .dispatch(&dhcp_packet(
                Ipv4Addr::UNSPECIFIED,
                vec![
                    DhcpOption::VendorClassId("MSFT 5.0".to_string()),
                    DhcpOption::Hostname("laptop".to_string()),
                ],
            ))
            .unwrap();

        assert_eq!(event.info, "DHCP Request: hostname=laptop, vendor=MSFT 5.0");
    }

    #[test]
    fn should_summarize_optionless_dhcp() {
        let event = dispatcher()
            .dispatch(&dhcp_packet(Ipv4Addr::UNSPECIFIED, Vec::new()))
            .unwrap();

        assert_eq!(event.info, "DHCP Request: no extra details");
        assert_eq!(event.client_ip, "0.0.0.0");
    }

    #[test]
    fn should_prefer_dhcp_when_both_layers_present() {
        let mut packet = dhcp_packet(Ipv4Addr::UNSPECIFIED, Vec::new());
        packet.dns = Some(DnsInfo {
            is_query: true,
            question: Some("example.com.".to_string()),
        });

        let event = dispatcher().dispatch(&packet).unwrap();
        assert_eq!(event.kind, EventKind::Dhcp);
    }

    #[test]
    fn should_drop_dhcp_without_ethernet() {
        let mut packet = dhcp_packet(Ipv4Addr::UNSPECIFIED, Vec::new());
        packet.ethernet = None;

        assert!(dispatcher().dispatch(&packet).is_none());
    }

    #[test]
    fn should_ignore_packets_without_interesting_layers() {
        assert!(dispatcher().dispatch(&DecodedPacket::default()).is_none());

        // DNS layer with no question record.
        let packet = DecodedPacket {
            dns: Some(DnsInfo {
                is_query: true,
                question: None,
            }),
            ..DecodedPacket::default()
        };
        assert!(dispatcher().dispatch(&packet).is_none());
    }
}
