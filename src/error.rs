//! Error types.
use std::fmt::{Debug, Display, Formatter};
use std::io;

use nix::errno::Errno;
use thiserror::Error;

/// A raw error code reported by an OS primitive (`errno`).
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct OsError(i32);

impl OsError {
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Capture the calling thread's current `errno`.
    pub fn last() -> Self {
        Self(io::Error::last_os_error().raw_os_error().unwrap_or(0))
    }

    pub fn code(&self) -> i32 {
        self.0
    }
}

impl Debug for OsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "OsError({})", self.0)
    }
}

impl Display for OsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&io::Error::from_raw_os_error(self.0), f)
    }
}

impl std::error::Error for OsError {}

impl From<Errno> for OsError {
    fn from(value: Errno) -> Self {
        Self(value as i32)
    }
}

impl From<OsError> for io::Error {
    fn from(value: OsError) -> Self {
        io::Error::from_raw_os_error(value.0)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be coerced into an IPv4 address.
    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Os(#[from] OsError),
}
