//! Packet capture, decoding, and event extraction.

pub mod bootp;
pub mod decode;
pub mod pipeline;
pub mod source;

pub use bootp::{BootpFrame, DhcpOption};
pub use decode::{DecodedPacket, DnsInfo, EthernetInfo, IpInfo, UdpInfo, decode};
pub use pipeline::{Dispatcher, run_capture};
pub use source::{PacketSource, PnetSource, find_interface};
