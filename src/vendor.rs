//! Vendor labels derived from MAC addresses.
//!
//! Placeholder policy: the label is just the uppercased OUI (first three
//! octets) behind a "Device" prefix, with no OUI database lookup.

/// Length of the "AA:BB:CC" OUI prefix in a colon-separated MAC string.
const OUI_PREFIX_LEN: usize = 8;

/// Map a MAC address string to a display label.
///
/// An empty MAC (no Ethernet layer was seen) maps to "Unknown device".
pub fn vendor_from_mac(mac: &str) -> String {
    if mac.is_empty() {
        return "Unknown device".to_string();
    }

    let prefix: String = mac.to_uppercase().chars().take(OUI_PREFIX_LEN).collect();
    format!("Device {prefix}")
}
