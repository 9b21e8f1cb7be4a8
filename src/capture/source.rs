//! Packet source abstraction.
//!
//! Provides a trait-based abstraction over packet capture so that a
//! finite, scripted packet sequence can substitute for a live interface
//! in tests.

use pnet::datalink::{self, Channel, DataLinkReceiver, NetworkInterface};

use super::decode::{DecodedPacket, decode};
use crate::error::{CaptureError, Result};

/// Trait for packet source implementations.
pub trait PacketSource: Send {
    /// Yield the next decoded packet.
    /// Returns None when the stream has ended.
    fn next_packet(&mut self) -> Option<DecodedPacket>;
}

/// Find a suitable network interface.
///
/// Returns the first interface that is:
/// - Up (active)
/// - Not a loopback interface
/// - Has at least one IP address
pub fn find_interface(name: Option<&str>) -> Result<NetworkInterface> {
    let interfaces = datalink::interfaces();

    if let Some(name) = name {
        interfaces
            .into_iter()
            .find(|iface| iface.name == name)
            .ok_or_else(|| CaptureError::NoInterface.into())
    } else {
        interfaces
            .into_iter()
            .find(|iface| iface.is_up() && !iface.is_loopback() && !iface.ips.is_empty())
            .ok_or_else(|| CaptureError::NoInterface.into())
    }
}

/// Live packet source using pnet.
///
/// Frames that fail to decode or fall outside the DNS/DHCP capture
/// contract are skipped before they reach the caller.
pub struct PnetSource {
    rx: Box<dyn DataLinkReceiver>,
}

impl PnetSource {
    /// Open a capture channel on the given interface.
    pub fn new(interface: &NetworkInterface) -> Result<Self> {
        let rx = match datalink::channel(interface, datalink::Config::default()) {
            Ok(Channel::Ethernet(_, rx)) => rx,
            Ok(_) => return Err(CaptureError::UnsupportedChannel.into()),
            Err(e) => return Err(CaptureError::ChannelOpen(e.to_string()).into()),
        };

        Ok(Self { rx })
    }
}

impl PacketSource for PnetSource {
    fn next_packet(&mut self) -> Option<DecodedPacket> {
        loop {
            let frame = self.rx.next().ok()?;
            if let Some(packet) = decode(frame) {
                return Some(packet);
            }
        }
    }
}
