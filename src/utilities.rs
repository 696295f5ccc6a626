//! Utilities.
use std::net::{IpAddr, Ipv4Addr};

use log::LevelFilter;

use crate::error::Error;

/// Values that can be coerced into an IPv4 address.
///
/// Integers are interpreted in host order (`0x7f000001` is `127.0.0.1`).
pub trait ToIpv4 {
    fn to_ipv4(&self) -> Result<Ipv4Addr, Error>;
}

impl ToIpv4 for Ipv4Addr {
    fn to_ipv4(&self) -> Result<Ipv4Addr, Error> {
        Ok(*self)
    }
}

impl ToIpv4 for [u8; 4] {
    fn to_ipv4(&self) -> Result<Ipv4Addr, Error> {
        Ok(Ipv4Addr::from(*self))
    }
}

impl ToIpv4 for u32 {
    fn to_ipv4(&self) -> Result<Ipv4Addr, Error> {
        Ok(Ipv4Addr::from(*self))
    }
}

impl ToIpv4 for u64 {
    fn to_ipv4(&self) -> Result<Ipv4Addr, Error> {
        u32::try_from(*self)
            .map(Ipv4Addr::from)
            .map_err(|_| out_of_range(self))
    }
}

impl ToIpv4 for i64 {
    fn to_ipv4(&self) -> Result<Ipv4Addr, Error> {
        u32::try_from(*self)
            .map(Ipv4Addr::from)
            .map_err(|_| out_of_range(self))
    }
}

impl ToIpv4 for IpAddr {
    fn to_ipv4(&self) -> Result<Ipv4Addr, Error> {
        match self {
            IpAddr::V4(addr) => Ok(*addr),
            IpAddr::V6(addr) => Err(Error::InvalidAddress(addr.to_string())),
        }
    }
}

impl ToIpv4 for str {
    fn to_ipv4(&self) -> Result<Ipv4Addr, Error> {
        self.trim()
            .parse()
            .map_err(|_| Error::InvalidAddress(self.to_string()))
    }
}

impl ToIpv4 for String {
    fn to_ipv4(&self) -> Result<Ipv4Addr, Error> {
        self.as_str().to_ipv4()
    }
}

/// ASCII text, as in `b"127.0.0.1"`.
impl ToIpv4 for [u8] {
    fn to_ipv4(&self) -> Result<Ipv4Addr, Error> {
        std::str::from_utf8(self)
            .map_err(|_| Error::InvalidAddress(String::from_utf8_lossy(self).into_owned()))?
            .to_ipv4()
    }
}

impl ToIpv4 for Vec<u8> {
    fn to_ipv4(&self) -> Result<Ipv4Addr, Error> {
        self.as_slice().to_ipv4()
    }
}

impl<T: ToIpv4 + ?Sized> ToIpv4 for &T {
    fn to_ipv4(&self) -> Result<Ipv4Addr, Error> {
        (**self).to_ipv4()
    }
}

fn out_of_range(value: &impl ToString) -> Error {
    Error::InvalidAddress(format!(
        "{} (integers must be between 0 and {})",
        value.to_string(),
        u32::MAX
    ))
}

/// Parse a command-line address: dotted-quad, decimal integer or `0x`-prefixed hex integer.
pub fn parse_ipv4(s: &str) -> Result<Ipv4Addr, Error> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16)
            .map_err(|_| Error::InvalidAddress(s.to_string()))?
            .to_ipv4();
    }
    if !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit()) {
        return s
            .parse::<u64>()
            .map_err(|_| Error::InvalidAddress(s.to_string()))?
            .to_ipv4();
    }
    s.to_ipv4()
}

/// Log to stderr at the given level.
pub fn configure_logger(level: LevelFilter) {
    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    use crate::error::Error;
    use crate::utilities::{parse_ipv4, ToIpv4};

    const LOCALHOST: Ipv4Addr = Ipv4Addr::new(127, 0, 0, 1);

    #[test]
    fn test_localhost_representations() {
        assert_eq!(LOCALHOST.to_ipv4().unwrap(), LOCALHOST);
        assert_eq!([127u8, 0, 0, 1].to_ipv4().unwrap(), LOCALHOST);
        assert_eq!(0x7F000001u32.to_ipv4().unwrap(), LOCALHOST);
        assert_eq!(0x7F000001u64.to_ipv4().unwrap(), LOCALHOST);
        assert_eq!(0x7F000001i64.to_ipv4().unwrap(), LOCALHOST);
        assert_eq!("127.0.0.1".to_ipv4().unwrap(), LOCALHOST);
        assert_eq!(" 127.0.0.1\n".to_string().to_ipv4().unwrap(), LOCALHOST);
        assert_eq!(IpAddr::V4(LOCALHOST).to_ipv4().unwrap(), LOCALHOST);
        assert_eq!(b"127.0.0.1"[..].to_ipv4().unwrap(), LOCALHOST);
        assert_eq!(b"127.0.0.1".to_vec().to_ipv4().unwrap(), LOCALHOST);
    }

    #[test]
    fn test_illegal_values() {
        assert!(matches!("Foobar".to_ipv4(), Err(Error::InvalidAddress(_))));
        assert!(matches!("\u{201c}\u{fffd}\u{201d}".to_ipv4(), Err(Error::InvalidAddress(_))));
        assert!(matches!("256.0.0.1".to_ipv4(), Err(Error::InvalidAddress(_))));
        assert!(matches!(b"\xff\xfe"[..].to_ipv4(), Err(Error::InvalidAddress(_))));
        assert!(matches!(b"Foobar".to_vec().to_ipv4(), Err(Error::InvalidAddress(_))));
        assert!(matches!((-1i64).to_ipv4(), Err(Error::InvalidAddress(_))));
        assert!(matches!((1u64 << 32).to_ipv4(), Err(Error::InvalidAddress(_))));
        assert!(matches!(
            IpAddr::V6(Ipv6Addr::LOCALHOST).to_ipv4(),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_parse_ipv4() {
        assert_eq!(parse_ipv4("127.0.0.1").unwrap(), LOCALHOST);
        assert_eq!(parse_ipv4("2130706433").unwrap(), LOCALHOST);
        assert_eq!(parse_ipv4("0x7F000001").unwrap(), LOCALHOST);
        assert_eq!(parse_ipv4("0").unwrap(), Ipv4Addr::UNSPECIFIED);
        assert!(parse_ipv4("4294967296").is_err());
        assert!(parse_ipv4("0x").is_err());
        assert!(parse_ipv4("0x1ffffffff").is_err());
        assert!(parse_ipv4("").is_err());
        assert!(parse_ipv4("-1").is_err());
        assert!(parse_ipv4("99999999999999999999999").is_err());
    }
}
