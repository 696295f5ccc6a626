//! `AF_PACKET` records (Linux, Android).
use nix::sys::socket::{SockaddrLike, SockaddrStorage};

use crate::link::LinkRecord;
use crate::models::HardwareAddress;

/// A `sockaddr_ll`, as returned by `getifaddrs(3)` for every link.
pub struct PacketRecord;

impl LinkRecord for PacketRecord {
    fn project(record: &SockaddrStorage) -> Option<HardwareAddress> {
        record.as_link_addr()?;
        let sll = unsafe { &*(record.as_ptr() as *const libc::sockaddr_ll) };
        let length = sll.sll_halen as usize;
        if length > sll.sll_addr.len() {
            return None;
        }
        HardwareAddress::new(sll.sll_hatype, &sll.sll_addr[..length])
    }
}
