//! Neighbor cache lookups through the `SIOCGARP` ioctl (Linux, Android).
//!
//! See arp(7).
use std::mem;
use std::net::Ipv4Addr;
use std::os::fd::AsRawFd;
use std::ptr;

use log::trace;

use crate::error::OsError;
use crate::models::HardwareAddress;
use crate::neighbors::NeighborCache;
use crate::socket::ControlSocket;

const SIOCGARP: libc::c_ulong = 0x8954;
/// Completed entry (`ha` valid).
const ATF_COM: libc::c_int = 0x02;
const IFNAMSIZ: usize = 16;

/// `struct arpreq` from `<net/if_arp.h>`.
#[repr(C)]
struct ArpRequest {
    arp_pa: libc::sockaddr,
    arp_ha: libc::sockaddr,
    arp_flags: libc::c_int,
    arp_netmask: libc::sockaddr,
    arp_dev: [libc::c_char; IFNAMSIZ],
}

impl ArpRequest {
    fn new(target: Ipv4Addr, interface: &str) -> Result<Self, OsError> {
        let name = interface.as_bytes();
        if name.is_empty() || name.len() >= IFNAMSIZ || name.contains(&0) {
            return Err(OsError::new(libc::ENODEV));
        }

        let mut request: Self = unsafe { mem::zeroed() };

        let mut sin: libc::sockaddr_in = unsafe { mem::zeroed() };
        sin.sin_family = libc::AF_INET as libc::sa_family_t;
        sin.sin_addr.s_addr = u32::from(target).to_be();
        unsafe {
            ptr::write_unaligned(
                &mut request.arp_pa as *mut libc::sockaddr as *mut libc::sockaddr_in,
                sin,
            )
        };

        for (dst, &src) in request.arp_dev.iter_mut().zip(name) {
            *dst = src as libc::c_char;
        }
        Ok(request)
    }

    fn is_complete(&self) -> bool {
        self.arp_flags & ATF_COM != 0
    }

    /// The kernel copies `dev->addr_len` octets into `arp_ha` but does not report the length.
    fn hardware_address(&self, length: usize) -> Option<HardwareAddress> {
        if !self.is_complete() {
            return None;
        }
        let length = length.min(self.arp_ha.sa_data.len());
        let bytes: Vec<u8> = self.arp_ha.sa_data[..length]
            .iter()
            .map(|&c| c as u8)
            .collect();
        HardwareAddress::new(self.arp_ha.sa_family, &bytes)
    }
}

/// The kernel ARP cache.
#[derive(Debug)]
pub struct ArpCache {
    socket: ControlSocket,
}

impl ArpCache {
    pub fn new(socket: ControlSocket) -> Self {
        Self { socket }
    }

    pub fn open() -> Result<Self, OsError> {
        Ok(Self::new(ControlSocket::open()?))
    }
}

impl NeighborCache for ArpCache {
    fn query(
        &self,
        target: Ipv4Addr,
        interface: &str,
        address_len: usize,
    ) -> Result<Option<HardwareAddress>, OsError> {
        let mut request = ArpRequest::new(target, interface)?;
        let result = unsafe {
            libc::ioctl(
                self.socket.as_raw_fd(),
                SIOCGARP as _,
                &mut request as *mut ArpRequest,
            )
        };
        if result == -1 {
            let error = OsError::last();
            return if error.code() == libc::ENXIO {
                trace!("{} {}: no entry", interface, target);
                Ok(None)
            } else {
                Err(error)
            };
        }
        trace!("{} {}: flags={:#x}", interface, target, request.arp_flags);
        Ok(request.hardware_address(address_len))
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use crate::models::HARDWARE_TYPE_ETHERNET;
    use crate::neighbors::arp::{ArpRequest, ATF_COM};

    const ARPHRD_TUNNEL: u16 = 768;

    fn complete_request(hardware_type: u16, address: &[u8]) -> ArpRequest {
        let mut request = ArpRequest::new(Ipv4Addr::new(192, 0, 2, 5), "eth0").unwrap();
        request.arp_flags = ATF_COM;
        request.arp_ha.sa_family = hardware_type;
        for (dst, &src) in request.arp_ha.sa_data.iter_mut().zip(address) {
            *dst = src as libc::c_char;
        }
        request
    }

    #[test]
    fn test_request_encoding() {
        let request = ArpRequest::new(Ipv4Addr::new(192, 0, 2, 5), "eth0").unwrap();
        assert_eq!(request.arp_pa.sa_family, libc::AF_INET as libc::sa_family_t);
        // sin_port occupies the first two bytes of sa_data.
        let address: Vec<u8> = request.arp_pa.sa_data[2..6]
            .iter()
            .map(|&c| c as u8)
            .collect();
        assert_eq!(address, vec![192, 0, 2, 5]);
        let name: Vec<u8> = request.arp_dev.iter().map(|&c| c as u8).collect();
        assert_eq!(&name[..5], b"eth0\0");
        assert_eq!(request.arp_flags, 0);
    }

    #[test]
    fn test_request_rejects_invalid_names() {
        let target = Ipv4Addr::new(192, 0, 2, 5);
        for name in ["", "a-very-long-interface-name", "eth\x000"] {
            let error = ArpRequest::new(target, name).err().unwrap();
            assert_eq!(error.code(), libc::ENODEV);
        }
        assert!(ArpRequest::new(target, "abcdefghijklmno").is_ok());
    }

    #[test]
    fn test_incomplete_entry() {
        let mut request = complete_request(HARDWARE_TYPE_ETHERNET, &[0x0a, 0, 0, 0, 0, 0]);
        request.arp_flags = 0;
        assert!(request.hardware_address(6).is_none());

        request.arp_flags = ATF_COM;
        let mac = request.hardware_address(6).unwrap();
        assert_eq!(mac.as_bytes(), &[0x0a, 0, 0, 0, 0, 0]);
        assert_eq!(mac.hardware_type(), HARDWARE_TYPE_ETHERNET);
    }

    #[test]
    fn test_device_address_length() {
        let request = complete_request(ARPHRD_TUNNEL, &[198, 51, 100, 7, 0xee, 0xee]);
        let mac = request.hardware_address(4).unwrap();
        assert_eq!(mac.as_bytes(), &[198, 51, 100, 7]);
        assert_eq!(mac.hardware_type(), ARPHRD_TUNNEL);

        // ARPHRD_EUI64
        let request = complete_request(27, &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(request.hardware_address(8).unwrap().length(), 8);

        let request = complete_request(HARDWARE_TYPE_ETHERNET, &[1; 6]);
        assert!(request.hardware_address(0).is_none());
    }
}
