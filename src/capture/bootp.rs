//! BOOTP wire format and typed DHCP option decoding.
//!
//! Only the fields the honeypot cares about are retained: the client IP
//! address from the fixed header, and the hostname / vendor class options.
//! Unknown option tags are skipped deterministically.

use std::net::Ipv4Addr;

/// Size of the fixed BOOTP header preceding the options area.
const BOOTP_HEADER_LEN: usize = 236;
/// Offset of the ciaddr (client IP address) field.
const CIADDR_OFFSET: usize = 12;
/// Magic cookie marking the start of DHCP options.
const DHCP_MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];

const OPT_PAD: u8 = 0;
const OPT_HOSTNAME: u8 = 12;
const OPT_VENDOR_CLASS: u8 = 60;
const OPT_END: u8 = 255;

/// Fields retained from the fixed BOOTP header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootpFrame {
    /// The ciaddr field; zero when the client has no address yet.
    pub client_ip: Ipv4Addr,
}

/// A decoded DHCP option relevant to device identification.
///
/// Option values are free-form bytes on the wire; they are decoded as text
/// with invalid sequences replaced rather than propagated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DhcpOption {
    Hostname(String),
    VendorClassId(String),
}

/// Parse a UDP payload as BOOTP.
///
/// Returns the fixed-header fields plus, when the DHCP magic cookie is
/// present, the decoded options. A BOOTP frame without the cookie carries
/// no DHCP layer.
pub fn parse(payload: &[u8]) -> Option<(BootpFrame, Option<Vec<DhcpOption>>)> {
    if payload.len() < BOOTP_HEADER_LEN {
        return None;
    }

    let client_ip = Ipv4Addr::new(
        payload[CIADDR_OFFSET],
        payload[CIADDR_OFFSET + 1],
        payload[CIADDR_OFFSET + 2],
        payload[CIADDR_OFFSET + 3],
    );

    let options_start = BOOTP_HEADER_LEN + DHCP_MAGIC_COOKIE.len();
    let options = if payload.len() >= options_start
        && payload[BOOTP_HEADER_LEN..options_start] == DHCP_MAGIC_COOKIE
    {
        Some(decode_options(&payload[options_start..]))
    } else {
        None
    };

    Some((BootpFrame { client_ip }, options))
}

/// Walk the tag/length/value option sequence, keeping known tags.
///
/// Stops at the end marker or at a truncated entry.
fn decode_options(data: &[u8]) -> Vec<DhcpOption> {
    let mut options = Vec::new();
    let mut offset = 0;

    while offset < data.len() {
        let tag = data[offset];
        if tag == OPT_PAD {
            offset += 1;
            continue;
        }
        if tag == OPT_END {
            break;
        }

        let Some(&len) = data.get(offset + 1) else {
            break;
        };
        let value_start = offset + 2;
        let value_end = value_start + len as usize;
        let Some(value) = data.get(value_start..value_end) else {
            break;
        };

        match tag {
            OPT_HOSTNAME => options.push(DhcpOption::Hostname(decode_text(value))),
            OPT_VENDOR_CLASS => options.push(DhcpOption::VendorClassId(decode_text(value))),
            _ => {}
        }

        offset = value_end;
    }

    options
}

fn decode_text(value: &[u8]) -> String {
    String::from_utf8_lossy(value).into_owned()
}
