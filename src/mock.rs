//! In-memory interfaces and neighbor cache, for testing.
//!
//! ```
//! use std::net::Ipv4Addr;
//! use arpreq::mock::{StaticInterfaces, StaticNeighborCache};
//! use arpreq::models::{HardwareAddress, NetworkInterface, Resolution};
//! use arpreq::resolver::Resolver;
//!
//! let eth0 = NetworkInterface::new("eth0", Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(255, 255, 255, 0));
//! let own = HardwareAddress::ethernet([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
//! let neighbor = HardwareAddress::ethernet([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
//!
//! let interfaces = StaticInterfaces::default().with_interface(eth0, Some(own));
//! let cache = StaticNeighborCache::default().with_entry("eth0", Ipv4Addr::new(192, 0, 2, 5), neighbor);
//! let resolver = Resolver::new(interfaces, cache);
//!
//! assert_eq!(resolver.resolve(Ipv4Addr::new(192, 0, 2, 5)), Resolution::Found(neighbor));
//! ```
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;

use crate::error::OsError;
use crate::interfaces::{InterfaceSnapshot, InterfaceSource};
use crate::models::{device_name, HardwareAddress, NetworkInterface};
use crate::neighbors::NeighborCache;

#[derive(Clone, Debug, Default)]
pub struct StaticSnapshot {
    interfaces: Vec<NetworkInterface>,
    hardware_addresses: HashMap<String, HardwareAddress>,
}

impl InterfaceSnapshot for StaticSnapshot {
    fn interfaces(&self) -> Vec<NetworkInterface> {
        self.interfaces.clone()
    }

    fn hardware_address_of(&self, name: &str) -> Option<HardwareAddress> {
        self.hardware_addresses.get(device_name(name)).copied()
    }
}

/// A fixed interface configuration, enumerated in insertion order.
#[derive(Clone, Debug)]
pub struct StaticInterfaces {
    snapshot: Result<StaticSnapshot, OsError>,
}

impl Default for StaticInterfaces {
    fn default() -> Self {
        Self {
            snapshot: Ok(StaticSnapshot::default()),
        }
    }
}

impl StaticInterfaces {
    /// An enumeration that always fails with `error`.
    pub fn failing(error: OsError) -> Self {
        Self {
            snapshot: Err(error),
        }
    }

    /// Add an interface address; `mac` is the hardware address of its device.
    pub fn with_interface(
        mut self,
        interface: NetworkInterface,
        mac: Option<HardwareAddress>,
    ) -> Self {
        if let Ok(snapshot) = &mut self.snapshot {
            if let Some(mac) = mac {
                snapshot
                    .hardware_addresses
                    .insert(interface.device().to_string(), mac);
            }
            snapshot.interfaces.push(interface);
        }
        self
    }
}

impl InterfaceSource for StaticInterfaces {
    type Snapshot = StaticSnapshot;

    fn enumerate(&self) -> Result<Self::Snapshot, OsError> {
        self.snapshot.clone()
    }
}

#[derive(Copy, Clone, Debug)]
enum Entry {
    Complete(HardwareAddress),
    Incomplete,
    Error(OsError),
}

/// A fixed neighbor cache that records the lookups it receives.
#[derive(Debug, Default)]
pub struct StaticNeighborCache {
    entries: HashMap<(String, Ipv4Addr), Entry>,
    queries: Mutex<Vec<(String, Ipv4Addr)>>,
}

impl StaticNeighborCache {
    pub fn with_entry(mut self, interface: &str, target: Ipv4Addr, mac: HardwareAddress) -> Self {
        self.entries
            .insert((interface.to_string(), target), Entry::Complete(mac));
        self
    }

    /// An entry whose resolution is still pending.
    pub fn with_incomplete_entry(mut self, interface: &str, target: Ipv4Addr) -> Self {
        self.entries
            .insert((interface.to_string(), target), Entry::Incomplete);
        self
    }

    /// Fail lookups of `target` on `interface` with `error`.
    pub fn with_error(mut self, interface: &str, target: Ipv4Addr, error: OsError) -> Self {
        self.entries
            .insert((interface.to_string(), target), Entry::Error(error));
        self
    }

    /// Lookups received so far, as `(interface, target)` pairs.
    pub fn queries(&self) -> Vec<(String, Ipv4Addr)> {
        match self.queries.lock() {
            Ok(queries) => queries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl NeighborCache for StaticNeighborCache {
    fn query(
        &self,
        target: Ipv4Addr,
        interface: &str,
        _address_len: usize,
    ) -> Result<Option<HardwareAddress>, OsError> {
        let key = (interface.to_string(), target);
        match self.queries.lock() {
            Ok(mut queries) => queries.push(key.clone()),
            Err(poisoned) => poisoned.into_inner().push(key.clone()),
        }
        match self.entries.get(&key) {
            Some(Entry::Complete(mac)) => Ok(Some(*mac)),
            Some(Entry::Incomplete) | None => Ok(None),
            Some(Entry::Error(error)) => Err(*error),
        }
    }
}
