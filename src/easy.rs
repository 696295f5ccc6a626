//! One-call lookups.
//!
//! Each call opens and closes its own OS handle. Build a
//! [`Resolver`](crate::resolver::Resolver) once when issuing many lookups.
//!
//! ```no_run
//! use arpreq::easy::{arpreq, arpreqb};
//!
//! assert_eq!(arpreq("127.0.0.1").unwrap().as_deref(), Some("00:00:00:00:00:00"));
//! assert_eq!(arpreqb(0x7F000001u32).unwrap(), Some(vec![0; 6]));
//! ```
use crate::error::Error;
use crate::format::{to_bytes, to_hex_string};
use crate::models::HardwareAddress;
use crate::resolver::Resolver;
use crate::utilities::ToIpv4;

/// Probe the kernel neighbor cache for the hardware address of an IPv4 address.
///
/// No ARP request is sent, only the kernel state is read.
pub fn resolve<T: ToIpv4>(value: T) -> Result<Option<HardwareAddress>, Error> {
    let target = value.to_ipv4()?;
    let resolver = Resolver::system()?;
    resolver.resolve(target).into_result().map_err(Error::from)
}

/// Like [`resolve`], rendered as `aa:bb:cc:dd:ee:ff`.
pub fn arpreq<T: ToIpv4>(value: T) -> Result<Option<String>, Error> {
    Ok(resolve(value)?.as_ref().map(to_hex_string))
}

/// Like [`resolve`], rendered as raw bytes.
pub fn arpreqb<T: ToIpv4>(value: T) -> Result<Option<Vec<u8>>, Error> {
    Ok(resolve(value)?.as_ref().map(to_bytes))
}
