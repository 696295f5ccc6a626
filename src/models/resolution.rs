use crate::error::OsError;
use crate::models::HardwareAddress;

/// The outcome of resolving one IPv4 address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Found(HardwareAddress),
    NotFound,
    /// An OS primitive failed; the resolution was aborted.
    Failed(OsError),
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn hardware_address(&self) -> Option<&HardwareAddress> {
        match self {
            Resolution::Found(mac) => Some(mac),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<Option<HardwareAddress>, OsError> {
        match self {
            Resolution::Found(mac) => Ok(Some(mac)),
            Resolution::NotFound => Ok(None),
            Resolution::Failed(error) => Err(error),
        }
    }
}
