use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

use ip_network::Ipv4Network;

/// One IPv4 address configured on a network interface.
///
/// An interface with several IPv4 aliases yields one entry per alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkInterface {
    /// Name reported by the OS, including the alias label if any (e.g. `eth0:1`).
    pub name: String,
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    /// Whether the interface is flagged as point-to-point (`IFF_POINTOPOINT`).
    pub point_to_point: bool,
    /// Address of the remote end, only meaningful for point-to-point links.
    pub peer: Option<Ipv4Addr>,
}

impl NetworkInterface {
    pub fn new(name: impl Into<String>, address: Ipv4Addr, netmask: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            address,
            netmask,
            point_to_point: false,
            peer: None,
        }
    }

    pub fn new_point_to_point(
        name: impl Into<String>,
        address: Ipv4Addr,
        netmask: Ipv4Addr,
        peer: Ipv4Addr,
    ) -> Self {
        Self {
            name: name.into(),
            address,
            netmask,
            point_to_point: true,
            peer: Some(peer),
        }
    }

    /// Device carrying this address, without the alias label.
    pub fn device(&self) -> &str {
        device_name(&self.name)
    }

    /// `target` is the remote end of this point-to-point link.
    pub fn is_peer(&self, target: Ipv4Addr) -> bool {
        self.point_to_point && self.peer == Some(target)
    }

    /// `target` lies in the subnet of this interface address.
    pub fn in_subnet(&self, target: Ipv4Addr) -> bool {
        let mask = u32::from(self.netmask);
        u32::from(self.address) & mask == u32::from(target) & mask
    }

    /// Whether the neighbor cache of this interface may know `target`.
    pub fn matches(&self, target: Ipv4Addr) -> bool {
        self.is_peer(target) || self.in_subnet(target)
    }

    /// Prefix length of the netmask, `None` for non-contiguous masks.
    pub fn prefix_len(&self) -> Option<u8> {
        let mask = u32::from(self.netmask);
        let ones = mask.leading_ones();
        if mask.checked_shl(ones).unwrap_or(0) == 0 {
            Some(ones as u8)
        } else {
            None
        }
    }

    pub fn network(&self) -> Option<Ipv4Network> {
        Ipv4Network::new_truncate(self.address, self.prefix_len()?).ok()
    }
}

/// Strip the label of a Linux address alias: `eth0:1` is carried by `eth0`.
pub fn device_name(name: &str) -> &str {
    match name.split_once(':') {
        Some((device, _)) => device,
        None => name,
    }
}

impl Display for NetworkInterface {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.address)?;
        match self.network() {
            Some(network) => write!(f, " network={}", network)?,
            None => write!(f, " netmask={}", self.netmask)?,
        }
        if let Some(peer) = self.peer.filter(|_| self.point_to_point) {
            write!(f, " peer={}", peer)?;
        }
        Ok(())
    }
}
