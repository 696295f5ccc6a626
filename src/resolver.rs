//! Resolve IPv4 addresses to hardware addresses from local kernel state.
use std::net::Ipv4Addr;

use log::{debug, trace};

use crate::error::OsError;
use crate::interfaces::{InterfaceSnapshot, InterfaceSource, SystemInterfaces};
use crate::models::Resolution;
use crate::neighbors::{NeighborCache, SystemNeighborCache};

/// Answer "what is the hardware address of this IPv4 address" without any probe.
///
/// Every call captures a fresh interface snapshot, so a `Resolver` holds no
/// state besides its collaborators and can be shared between threads when
/// they allow it.
///
/// ```no_run
/// use std::net::Ipv4Addr;
/// use arpreq::resolver::Resolver;
///
/// let resolver = Resolver::system().unwrap();
/// let resolution = resolver.resolve(Ipv4Addr::new(192, 0, 2, 5));
/// println!("{:?}", resolution);
/// ```
#[derive(Debug)]
pub struct Resolver<S, C> {
    interfaces: S,
    neighbors: C,
}

impl Resolver<SystemInterfaces, SystemNeighborCache> {
    /// A resolver over the running system, holding its own OS handle until dropped.
    pub fn system() -> Result<Self, OsError> {
        Ok(Self::new(SystemInterfaces, SystemNeighborCache::open()?))
    }
}

impl<S: InterfaceSource, C: NeighborCache> Resolver<S, C> {
    pub fn new(interfaces: S, neighbors: C) -> Self {
        Self {
            interfaces,
            neighbors,
        }
    }

    pub fn resolve(&self, target: Ipv4Addr) -> Resolution {
        let resolution = self.resolve_inner(target);
        debug!("{} => {:?}", target, resolution);
        resolution
    }

    fn resolve_inner(&self, target: Ipv4Addr) -> Resolution {
        let snapshot = match self.interfaces.enumerate() {
            Ok(snapshot) => snapshot,
            Err(error) => return Resolution::Failed(error),
        };

        for interface in snapshot.interfaces() {
            if !interface.matches(target) {
                trace!("{}: {} does not match", interface, target);
                continue;
            }

            // Aliases (`eth0:1`) resolve through their device.
            let device = interface.device();
            let Some(mac) = snapshot.hardware_address_of(device) else {
                debug!("{}: no usable hardware address, skipping", interface);
                continue;
            };

            // The neighbor cache never holds the host's own addresses.
            if interface.address == target {
                return Resolution::Found(mac);
            }

            // TODO: Point-to-point peers go through the neighbor cache like
            //       subnet neighbors, check whether they should be answered otherwise.
            match self.neighbors.query(target, device, mac.length()) {
                Ok(Some(mac)) => return Resolution::Found(mac),
                Ok(None) => debug!("{}: no complete entry for {}", interface, target),
                Err(error) => return Resolution::Failed(error),
            }
        }

        Resolution::NotFound
    }
}
