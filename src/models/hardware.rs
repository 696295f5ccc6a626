use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use anyhow::{bail, Context};
use pnet::packet::arp::ArpHardwareTypes;
use pnet::util::MacAddr;

use crate::format::to_hex_string;

/// Maximum number of octets in a link-layer address.
pub const MAX_HARDWARE_ADDRESS_LEN: usize = 8;

/// Hardware type code of Ethernet addresses (`ARPHRD_ETHER`).
pub const HARDWARE_TYPE_ETHERNET: u16 = ArpHardwareTypes::Ethernet.0;

/// A link-layer address of 1 to 8 octets.
///
/// The hardware type is the code reported by the OS for the link technology:
/// an `ARPHRD_*` value on Linux, an `IFT_*` value on BSD systems.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct HardwareAddress {
    hardware_type: u16,
    length: u8,
    bytes: [u8; MAX_HARDWARE_ADDRESS_LEN],
}

impl HardwareAddress {
    /// Returns `None` if `bytes` is empty or longer than [`MAX_HARDWARE_ADDRESS_LEN`].
    pub fn new(hardware_type: u16, bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > MAX_HARDWARE_ADDRESS_LEN {
            return None;
        }
        let mut buffer = [0u8; MAX_HARDWARE_ADDRESS_LEN];
        buffer[..bytes.len()].copy_from_slice(bytes);
        Some(Self {
            hardware_type,
            length: bytes.len() as u8,
            bytes: buffer,
        })
    }

    pub fn ethernet(octets: [u8; 6]) -> Self {
        let mut bytes = [0u8; MAX_HARDWARE_ADDRESS_LEN];
        bytes[..6].copy_from_slice(&octets);
        Self {
            hardware_type: HARDWARE_TYPE_ETHERNET,
            length: 6,
            bytes,
        }
    }

    pub fn hardware_type(&self) -> u16 {
        self.hardware_type
    }

    /// Number of meaningful octets, always in `1..=8`.
    pub fn length(&self) -> usize {
        self.length as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.length()]
    }

    /// Convert to a 48-bit MAC address, if this address is 6 octets long.
    pub fn to_mac_addr(&self) -> Option<MacAddr> {
        match *self.as_bytes() {
            [a, b, c, d, e, f] => Some(MacAddr::new(a, b, c, d, e, f)),
            _ => None,
        }
    }
}

impl From<MacAddr> for HardwareAddress {
    fn from(value: MacAddr) -> Self {
        let MacAddr(a, b, c, d, e, f) = value;
        Self::ethernet([a, b, c, d, e, f])
    }
}

/// Parse the colon-separated hex form (`aa:bb:cc:dd:ee:ff`).
/// The parsed address is tagged as Ethernet.
impl FromStr for HardwareAddress {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = Vec::with_capacity(MAX_HARDWARE_ADDRESS_LEN);
        for part in s.split(':') {
            if part.len() != 2 {
                bail!("invalid octet `{}` in hardware address `{}`", part, s);
            }
            let octet = hex::decode(part).with_context(|| format!("invalid octet `{}`", part))?;
            bytes.extend(octet);
        }
        HardwareAddress::new(HARDWARE_TYPE_ETHERNET, &bytes)
            .with_context(|| format!("invalid hardware address length: {}", bytes.len()))
    }
}

impl Display for HardwareAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&to_hex_string(self))
    }
}

impl Debug for HardwareAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "HardwareAddress({}, type={})", self, self.hardware_type)
    }
}

#[cfg(test)]
mod tests {
    use pnet::util::MacAddr;

    use crate::models::{HardwareAddress, HARDWARE_TYPE_ETHERNET};

    #[test]
    fn test_new_rejects_invalid_lengths() {
        assert!(HardwareAddress::new(1, &[]).is_none());
        assert!(HardwareAddress::new(1, &[0; 9]).is_none());
        assert!(HardwareAddress::new(1, &[0xab]).is_some());
        assert!(HardwareAddress::new(1, &[0; 8]).is_some());
    }

    #[test]
    fn test_short_address_does_not_leak_buffer() {
        let mac = HardwareAddress::new(7, &[0x2a]).unwrap();
        assert_eq!(mac.length(), 1);
        assert_eq!(mac.as_bytes(), &[0x2a]);
        assert_eq!(mac.hardware_type(), 7);
        assert!(mac.to_mac_addr().is_none());
    }

    #[test]
    fn test_mac_addr_conversion() {
        let mac_addr = MacAddr::new(0x00, 0x11, 0x22, 0x33, 0x44, 0x55);
        let mac = HardwareAddress::from(mac_addr);
        assert_eq!(mac.hardware_type(), HARDWARE_TYPE_ETHERNET);
        assert_eq!(mac.length(), 6);
        assert_eq!(mac.to_mac_addr(), Some(mac_addr));
    }

    #[test]
    fn test_from_str() {
        let mac: HardwareAddress = "aa:bb:cc:dd:ee:ff".parse().unwrap();
        assert_eq!(mac, HardwareAddress::ethernet([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]));
        let mac: HardwareAddress = "01:02:03:04:05:06:07:08".parse().unwrap();
        assert_eq!(mac.length(), 8);
        assert!("".parse::<HardwareAddress>().is_err());
        assert!("aa:bb:".parse::<HardwareAddress>().is_err());
        assert!("aa:zz".parse::<HardwareAddress>().is_err());
        assert!("aabb".parse::<HardwareAddress>().is_err());
        assert!("01:02:03:04:05:06:07:08:09".parse::<HardwareAddress>().is_err());
    }
}
