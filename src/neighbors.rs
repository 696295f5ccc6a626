//! Query the kernel neighbor cache.
//!
//! Lookups are read-only: they never send a request on the wire and never
//! create, refresh or delete cache entries.
#[cfg(any(target_os = "linux", target_os = "android"))]
mod arp;
#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
))]
mod route;

#[cfg(any(target_os = "linux", target_os = "android"))]
pub use arp::ArpCache as SystemNeighborCache;
#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
))]
pub use route::RouteCache as SystemNeighborCache;

use std::net::Ipv4Addr;

use crate::error::OsError;
use crate::models::HardwareAddress;

pub trait NeighborCache {
    /// Look up the resolved hardware address of `target` on the device `interface`.
    ///
    /// `address_len` is the length of the hardware addresses of this device,
    /// for caches that do not report it.
    ///
    /// Returns `Ok(None)` if the cache has no entry for this interface, or if
    /// the entry is not complete yet.
    fn query(
        &self,
        target: Ipv4Addr,
        interface: &str,
        address_len: usize,
    ) -> Result<Option<HardwareAddress>, OsError>;
}

impl<T: NeighborCache + ?Sized> NeighborCache for &T {
    fn query(
        &self,
        target: Ipv4Addr,
        interface: &str,
        address_len: usize,
    ) -> Result<Option<HardwareAddress>, OsError> {
        (**self).query(target, interface, address_len)
    }
}
