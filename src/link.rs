//! Read the link-layer address of an interface.
//!
//! Each platform family reports link-layer addresses in its own socket address
//! structure. The variant matching the target OS is selected at compile time as
//! [`PlatformRecord`].
#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
))]
pub(crate) mod datalink;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) mod packet;

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
))]
pub use datalink::DatalinkRecord as PlatformRecord;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub use packet::PacketRecord as PlatformRecord;

use nix::ifaddrs::InterfaceAddress;
use nix::sys::socket::SockaddrStorage;

use crate::models::{device_name, HardwareAddress};

/// A link-layer socket address structure.
pub trait LinkRecord {
    /// Project a record into a [`HardwareAddress`].
    ///
    /// Returns `None` if the record is not a link-layer address, or if the
    /// address is empty or longer than 8 octets.
    fn project(record: &SockaddrStorage) -> Option<HardwareAddress>;
}

/// Find the link-layer record of the device carrying `name` and project it.
pub(crate) fn hardware_address_of(
    records: &[InterfaceAddress],
    name: &str,
) -> Option<HardwareAddress> {
    let device = device_name(name);
    records
        .iter()
        .filter(|record| record.interface_name == device)
        .filter_map(|record| record.address.as_ref())
        .find(|address| address.as_link_addr().is_some())
        .and_then(PlatformRecord::project)
}
