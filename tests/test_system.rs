//! Lookups against the running system.
#![cfg(any(target_os = "linux", target_os = "android"))]

use std::fs;
use std::net::Ipv4Addr;

use arpreq::easy::{arpreq, arpreqb};
use arpreq::neighbors::{NeighborCache, SystemNeighborCache};
use arpreq::resolver::Resolver;
use arpreq::{Error, Resolution};

#[test]
fn test_localhost_string() {
    assert_eq!(
        arpreq("127.0.0.1").unwrap().as_deref(),
        Some("00:00:00:00:00:00")
    );
    assert_eq!(
        arpreq(0x7F000001u32).unwrap().as_deref(),
        Some("00:00:00:00:00:00")
    );
}

#[test]
fn test_localhost_bytes() {
    assert_eq!(arpreqb(Ipv4Addr::LOCALHOST).unwrap(), Some(vec![0u8; 6]));
    assert_eq!(arpreqb([127u8, 0, 0, 1]).unwrap(), Some(vec![0u8; 6]));
    assert_eq!(arpreqb(&b"127.0.0.1"[..]).unwrap(), Some(vec![0u8; 6]));
}

#[test]
fn test_illegal_argument() {
    assert!(matches!(arpreq("Foobar"), Err(Error::InvalidAddress(_))));
    assert!(matches!(arpreq(-1i64), Err(Error::InvalidAddress(_))));
    assert!(matches!(arpreq(1u64 << 32), Err(Error::InvalidAddress(_))));
}

#[test]
fn test_documentation_range_not_found() {
    // TEST-NET-3 is never configured on a test machine.
    let resolver = Resolver::system().unwrap();
    assert_eq!(
        resolver.resolve(Ipv4Addr::new(203, 0, 113, 9)),
        Resolution::NotFound
    );
}

#[test]
fn test_loopback_has_no_neighbors() {
    let cache = SystemNeighborCache::open().unwrap();
    assert_eq!(cache.query(Ipv4Addr::new(127, 0, 0, 2), "lo", 6), Ok(None));
}

#[test]
fn test_unknown_interface() {
    let cache = SystemNeighborCache::open().unwrap();
    let error = cache
        .query(Ipv4Addr::new(192, 0, 2, 5), "nosuchdev0", 6)
        .unwrap_err();
    assert_eq!(error.code(), libc::ENODEV);
}

/// Complete entries of `/proc/net/arp`.
fn arp_cache() -> Vec<(Ipv4Addr, String)> {
    let table = fs::read_to_string("/proc/net/arp").unwrap();
    table
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 6 {
                return None;
            }
            let flags = u32::from_str_radix(fields[2].trim_start_matches("0x"), 16).ok()?;
            // ATF_COM
            if flags & 0x2 == 0 {
                return None;
            }
            Some((fields[0].parse().ok()?, fields[3].to_string()))
        })
        .collect()
}

// Depends on the state of the neighbor cache of the machine.
// Use `cargo test -- --ignored` to run it.
#[test]
#[ignore]
fn test_cached_entries() {
    let resolver = Resolver::system().unwrap();
    for (address, mac) in arp_cache() {
        let resolution = resolver.resolve(address);
        assert_eq!(
            resolution.hardware_address().map(|mac| mac.to_string()),
            Some(mac)
        );
    }
}
