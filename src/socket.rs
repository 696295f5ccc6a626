//! The OS handle used to query the neighbor cache.
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd};

use log::debug;
use nix::sys::socket::{socket, AddressFamily, SockFlag, SockType};

use crate::error::OsError;

/// An `AF_INET` datagram socket, used only as a target for `ioctl(2)` requests.
///
/// The socket is never bound nor connected, so it holds no per-query state and
/// can be shared by concurrent lookups. It is closed on drop.
#[derive(Debug)]
pub struct ControlSocket {
    fd: OwnedFd,
}

impl ControlSocket {
    pub fn open() -> Result<Self, OsError> {
        #[cfg(any(target_os = "linux", target_os = "android"))]
        let flags = SockFlag::SOCK_CLOEXEC;
        #[cfg(not(any(target_os = "linux", target_os = "android")))]
        let flags = SockFlag::empty();

        let fd = socket(AddressFamily::Inet, SockType::Datagram, flags, None)?;
        debug!("opened control socket fd={}", fd);
        Ok(Self {
            fd: unsafe { OwnedFd::from_raw_fd(fd) },
        })
    }
}

impl AsRawFd for ControlSocket {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}
