//! `AF_LINK` records (macOS, iOS and the BSDs).
use std::mem;
use std::ptr;
use std::slice;

use nix::sys::socket::{SockaddrLike, SockaddrStorage};

use crate::link::LinkRecord;
use crate::models::{HardwareAddress, MAX_HARDWARE_ADDRESS_LEN};

/// A `sockaddr_dl`: the address follows the interface name in `sdl_data`.
pub struct DatalinkRecord;

impl LinkRecord for DatalinkRecord {
    fn project(record: &SockaddrStorage) -> Option<HardwareAddress> {
        record.as_link_addr()?;
        // `sdl_data` may extend past `sizeof(struct sockaddr_dl)`, read it from the storage.
        let base = record.as_ptr() as *const u8;
        let sdl = unsafe { &*(base as *const libc::sockaddr_dl) };
        let name_len = sdl.sdl_nlen as usize;
        let address_len = sdl.sdl_alen as usize;
        if address_len == 0 || address_len > MAX_HARDWARE_ADDRESS_LEN {
            return None;
        }
        // LLADDR(sdl)
        let offset = ptr::addr_of!(sdl.sdl_data) as usize - base as usize;
        let limit = (sdl.sdl_len as usize).min(mem::size_of::<SockaddrStorage>());
        if offset + name_len + address_len > limit {
            return None;
        }
        let bytes = unsafe { slice::from_raw_parts(base.add(offset + name_len), address_len) };
        HardwareAddress::new(sdl.sdl_type as u16, bytes)
    }
}
