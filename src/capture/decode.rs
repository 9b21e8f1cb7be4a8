//! Raw frame decoding into layered packet structures.
//!
//! Turns an Ethernet frame into a [`DecodedPacket`] with one optional entry
//! per protocol layer the honeypot understands. Anything outside the
//! capture contract (UDP port 53, 67 or 68) decodes to None and never
//! reaches the dispatcher.

use std::net::IpAddr;

use hickory_proto::op::{Message, MessageType};
use hickory_proto::serialize::binary::BinDecodable;
use pnet::packet::Packet;
use pnet::packet::ethernet::{EtherTypes, EthernetPacket};
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::ipv6::Ipv6Packet;
use pnet::packet::udp::UdpPacket;
use pnet::util::MacAddr;

use super::bootp::{self, BootpFrame, DhcpOption};

/// DNS over UDP.
pub const DNS_PORT: u16 = 53;
/// DHCP server-side port.
pub const DHCP_SERVER_PORT: u16 = 67;
/// DHCP client-side port.
pub const DHCP_CLIENT_PORT: u16 = 68;

/// Link-layer fields retained from a captured frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EthernetInfo {
    pub source_mac: MacAddr,
}

/// Network-layer fields retained from a captured frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IpInfo {
    pub source: IpAddr,
}

/// Transport-layer fields retained from a captured frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UdpInfo {
    pub source_port: u16,
    pub dest_port: u16,
}

/// The parts of a DNS message the pipeline inspects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DnsInfo {
    /// True for queries, false for responses.
    pub is_query: bool,
    /// First question name as queried, trailing root dot included.
    pub question: Option<String>,
}

/// A captured packet decoded into optional protocol layers.
///
/// This is the dispatcher's input contract: routing only ever looks at
/// which layers are present, never at raw bytes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecodedPacket {
    pub ethernet: Option<EthernetInfo>,
    pub ip: Option<IpInfo>,
    pub udp: Option<UdpInfo>,
    pub bootp: Option<BootpFrame>,
    pub dhcp_options: Option<Vec<DhcpOption>>,
    pub dns: Option<DnsInfo>,
}

/// Decode a raw Ethernet frame.
///
/// Returns None if:
/// - The frame is not IPv4 or IPv6
/// - The payload is not UDP
/// - Neither port belongs to the DNS/DHCP capture contract
pub fn decode(frame: &[u8]) -> Option<DecodedPacket> {
    let ethernet = EthernetPacket::new(frame)?;

    let (source_ip, udp_payload) = match ethernet.get_ethertype() {
        EtherTypes::Ipv4 => {
            let ipv4 = Ipv4Packet::new(ethernet.payload())?;
            (IpAddr::V4(ipv4.get_source()), ipv4.payload().to_vec())
        }
        EtherTypes::Ipv6 => {
            let ipv6 = Ipv6Packet::new(ethernet.payload())?;
            (IpAddr::V6(ipv6.get_source()), ipv6.payload().to_vec())
        }
        _ => return None,
    };

    let udp = UdpPacket::new(&udp_payload)?;
    let ports = (udp.get_source(), udp.get_destination());

    let mut packet = DecodedPacket {
        ethernet: Some(EthernetInfo {
            source_mac: ethernet.get_source(),
        }),
        ip: Some(IpInfo { source: source_ip }),
        udp: Some(UdpInfo {
            source_port: ports.0,
            dest_port: ports.1,
        }),
        ..DecodedPacket::default()
    };

    match ports {
        (DNS_PORT, _) | (_, DNS_PORT) => {
            packet.dns = decode_dns(udp.payload());
        }
        (DHCP_SERVER_PORT | DHCP_CLIENT_PORT, _) | (_, DHCP_SERVER_PORT | DHCP_CLIENT_PORT) => {
            if let Some((frame, options)) = bootp::parse(udp.payload()) {
                packet.bootp = Some(frame);
                packet.dhcp_options = options;
            }
        }
        _ => return None,
    }

    Some(packet)
}

/// Parse a UDP payload as a DNS message. An unparsable payload means no
/// DNS layer, not an error.
fn decode_dns(payload: &[u8]) -> Option<DnsInfo> {
    let message = Message::from_bytes(payload).ok()?;
    Some(DnsInfo {
        is_query: message.message_type() == MessageType::Query,
        question: message.queries().first().map(|q| q.name().to_utf8()),
    })
}
