//! Translate IPv4 addresses to hardware addresses using the kernel neighbor cache.
//!
//! Only local kernel state is consulted: the interface configuration and the
//! neighbor (ARP) cache. No request is ever sent on the network and the cache
//! is never modified.
//!
//! ```no_run
//! use std::net::Ipv4Addr;
//! use arpreq::Resolution;
//! use arpreq::resolver::Resolver;
//!
//! let resolver = Resolver::system().unwrap();
//! match resolver.resolve(Ipv4Addr::new(192, 0, 2, 1)) {
//!     Resolution::Found(mac) => println!("{}", mac),
//!     Resolution::NotFound => println!("not found"),
//!     Resolution::Failed(error) => eprintln!("{}", error),
//! }
//! ```
#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
)))]
compile_error!("arpreq supports Linux, Android, macOS, iOS and the BSDs");

pub mod easy;
pub mod error;
pub mod format;
pub mod interfaces;
pub mod link;
pub mod mock;
pub mod models;
pub mod neighbors;
pub mod resolver;
pub mod socket;
pub mod utilities;

pub use error::*;
pub use models::*;
pub use resolver::*;
