//! Neighbor cache lookups through the routing table (macOS, iOS and the BSDs).
//!
//! These systems have no `SIOCGARP`; ARP entries are exported by `sysctl(3)` as
//! routing messages, as done by arp(8). Each message carries the protocol
//! address followed by a `sockaddr_dl` holding the interface index and the
//! hardware address (empty while the entry is incomplete).
use std::mem;
use std::net::Ipv4Addr;
use std::ptr;

use log::trace;
use nix::net::if_::if_nametoindex;
use nix::sys::socket::{SockaddrLike, SockaddrStorage};

use crate::error::OsError;
use crate::link::{LinkRecord, PlatformRecord};
use crate::models::HardwareAddress;
use crate::neighbors::NeighborCache;

const NET_RT_FLAGS: libc::c_int = 2;
const RTF_LLINFO: libc::c_int = 0x400;

#[cfg(any(target_os = "macos", target_os = "ios"))]
const SOCKADDR_ALIGN: usize = mem::size_of::<u32>();
#[cfg(target_os = "netbsd")]
const SOCKADDR_ALIGN: usize = mem::size_of::<u64>();
#[cfg(not(any(target_os = "macos", target_os = "ios", target_os = "netbsd")))]
const SOCKADDR_ALIGN: usize = mem::size_of::<libc::c_long>();

/// The kernel ARP table.
#[derive(Copy, Clone, Debug, Default)]
pub struct RouteCache;

impl RouteCache {
    pub fn open() -> Result<Self, OsError> {
        Ok(Self)
    }
}

/// An ARP entry of the routing table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Entry {
    Complete(HardwareAddress),
    /// Resolution is pending, or the address cannot be represented.
    Incomplete,
}

impl NeighborCache for RouteCache {
    // `sdl_alen` reports the address length.
    fn query(
        &self,
        target: Ipv4Addr,
        interface: &str,
        _address_len: usize,
    ) -> Result<Option<HardwareAddress>, OsError> {
        let index = if_nametoindex(interface)?;
        let table = dump_arp_table()?;
        match find_entry(&table, target, index) {
            Some(Entry::Complete(mac)) => Ok(Some(mac)),
            Some(Entry::Incomplete) => {
                trace!("{} {}: incomplete entry", interface, target);
                Ok(None)
            }
            None => {
                trace!("{} {}: no entry", interface, target);
                Ok(None)
            }
        }
    }
}

fn dump_arp_table() -> Result<Vec<u8>, OsError> {
    let mut mib = [
        libc::CTL_NET,
        libc::PF_ROUTE,
        0,
        libc::AF_INET,
        NET_RT_FLAGS,
        RTF_LLINFO,
    ];
    loop {
        let mut needed: libc::size_t = 0;
        let result = unsafe {
            libc::sysctl(
                mib.as_mut_ptr(),
                mib.len() as libc::c_uint,
                ptr::null_mut(),
                &mut needed,
                ptr::null_mut(),
                0,
            )
        };
        if result == -1 {
            return Err(OsError::last());
        }
        if needed == 0 {
            return Ok(Vec::new());
        }
        // Leave room for entries added between the two calls.
        let mut buffer = vec![0u8; needed + needed / 8];
        let mut length = buffer.len();
        let result = unsafe {
            libc::sysctl(
                mib.as_mut_ptr(),
                mib.len() as libc::c_uint,
                buffer.as_mut_ptr() as *mut libc::c_void,
                &mut length,
                ptr::null_mut(),
                0,
            )
        };
        if result == -1 {
            let error = OsError::last();
            if error.code() == libc::ENOMEM {
                continue;
            }
            return Err(error);
        }
        buffer.truncate(length);
        return Ok(buffer);
    }
}

fn roundup(length: usize) -> usize {
    if length == 0 {
        SOCKADDR_ALIGN
    } else {
        1 + ((length - 1) | (SOCKADDR_ALIGN - 1))
    }
}

/// Walk the routing messages for the entry of `target` on interface `index`.
fn find_entry(table: &[u8], target: Ipv4Addr, index: libc::c_uint) -> Option<Entry> {
    let header_len = mem::size_of::<libc::rt_msghdr>();
    let mut offset = 0;
    while offset + header_len <= table.len() {
        let header: libc::rt_msghdr =
            unsafe { ptr::read_unaligned(table[offset..].as_ptr() as *const libc::rt_msghdr) };
        let message_len = header.rtm_msglen as usize;
        if message_len < header_len || offset + message_len > table.len() {
            break;
        }
        let message = &table[offset..offset + message_len];
        if let Some(entry) = parse_entry(&message[header_len..], target, index) {
            return Some(entry);
        }
        offset += message_len;
    }
    None
}

fn parse_entry(addresses: &[u8], target: Ipv4Addr, index: libc::c_uint) -> Option<Entry> {
    // RTA_DST: a `sockaddr_in` (or `sockaddr_inarp`, which shares its prefix).
    if addresses.len() < 8 || addresses[1] as libc::c_int != libc::AF_INET {
        return None;
    }
    let destination = Ipv4Addr::new(addresses[4], addresses[5], addresses[6], addresses[7]);
    if destination != target {
        return None;
    }

    // RTA_GATEWAY: a `sockaddr_dl`, at least up to `sdl_slen`.
    let gateway = addresses.get(roundup(addresses[0] as usize)..)?;
    let gateway_len = *gateway.first()? as usize;
    if gateway.len() < gateway_len || gateway_len < 8 {
        return None;
    }
    // Copied to aligned storage, `sdl_len` may exceed `sizeof(struct sockaddr_dl)`.
    let storage = unsafe {
        SockaddrStorage::from_raw(
            gateway.as_ptr() as *const libc::sockaddr,
            Some(gateway_len as libc::socklen_t),
        )
    }?;
    storage.as_link_addr()?;
    let sdl = unsafe { &*(storage.as_ptr() as *const libc::sockaddr_dl) };
    if sdl.sdl_index as libc::c_uint != index {
        return None;
    }
    Some(match PlatformRecord::project(&storage) {
        Some(mac) => Entry::Complete(mac),
        None => Entry::Incomplete,
    })
}
