//! Enumerate the IPv4 configuration of the local network interfaces.
use std::net::Ipv4Addr;

use log::trace;
use nix::ifaddrs::{getifaddrs, InterfaceAddress};
use nix::net::if_::InterfaceFlags;
use nix::sys::socket::{SockaddrLike, SockaddrStorage};

use crate::error::OsError;
use crate::link;
use crate::models::{HardwareAddress, NetworkInterface};

/// The network configuration captured at a point in time.
pub trait InterfaceSnapshot {
    /// IPv4 interface addresses, in the order reported by the OS.
    fn interfaces(&self) -> Vec<NetworkInterface>;

    /// Link-layer address of the named interface, if it has a usable one.
    fn hardware_address_of(&self, name: &str) -> Option<HardwareAddress>;
}

/// Something that can capture an [`InterfaceSnapshot`].
pub trait InterfaceSource {
    type Snapshot: InterfaceSnapshot;

    /// Capture the current configuration. No partial snapshot is returned on failure.
    fn enumerate(&self) -> Result<Self::Snapshot, OsError>;
}

impl<T: InterfaceSource + ?Sized> InterfaceSource for &T {
    type Snapshot = T::Snapshot;

    fn enumerate(&self) -> Result<Self::Snapshot, OsError> {
        (**self).enumerate()
    }
}

/// Interfaces of the running system, from `getifaddrs(3)`.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    type Snapshot = SystemSnapshot;

    fn enumerate(&self) -> Result<Self::Snapshot, OsError> {
        let records: Vec<InterfaceAddress> = getifaddrs()?.collect();
        trace!("captured {} interface records", records.len());
        Ok(SystemSnapshot { records })
    }
}

/// The records returned by one `getifaddrs(3)` call.
#[derive(Clone, Debug)]
pub struct SystemSnapshot {
    records: Vec<InterfaceAddress>,
}

impl InterfaceSnapshot for SystemSnapshot {
    fn interfaces(&self) -> Vec<NetworkInterface> {
        self.records.iter().filter_map(ipv4_interface).collect()
    }

    fn hardware_address_of(&self, name: &str) -> Option<HardwareAddress> {
        link::hardware_address_of(&self.records, name)
    }
}

fn ipv4_interface(record: &InterfaceAddress) -> Option<NetworkInterface> {
    let address = ipv4_of(record.address.as_ref()?)?;
    // A missing netmask restricts the subnet to the address itself.
    let netmask = record
        .netmask
        .as_ref()
        .map(netmask_of)
        .unwrap_or(Ipv4Addr::BROADCAST);
    let point_to_point = record.flags.contains(InterfaceFlags::IFF_POINTOPOINT);
    let peer = if point_to_point {
        record.destination.as_ref().and_then(ipv4_of)
    } else {
        None
    };
    Some(NetworkInterface {
        name: record.interface_name.clone(),
        address,
        netmask,
        point_to_point,
        peer,
    })
}

fn ipv4_of(storage: &SockaddrStorage) -> Option<Ipv4Addr> {
    storage.as_sockaddr_in().map(|sin| Ipv4Addr::from(sin.ip()))
}

/// BSD kernels may report netmasks with a truncated `sa_len` and an unset
/// family; the missing trailing octets are zero.
fn netmask_of(storage: &SockaddrStorage) -> Ipv4Addr {
    if let Some(netmask) = ipv4_of(storage) {
        return netmask;
    }
    // `sin_addr` of a `sockaddr_in`, the storage is zero-filled past the copied length.
    let bytes = storage.as_ptr() as *const u8;
    let mut octets = [0u8; 4];
    for (i, octet) in octets.iter_mut().enumerate() {
        *octet = unsafe { *bytes.add(4 + i) };
    }
    Ipv4Addr::from(octets)
}
