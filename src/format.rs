//! Render hardware addresses.
use crate::models::HardwareAddress;

/// Lowercase hex octets separated by colons (`aa:bb:cc:dd:ee:ff`).
pub fn to_hex_string(mac: &HardwareAddress) -> String {
    let encoded = hex::encode(mac.as_bytes());
    let mut output = String::with_capacity(mac.length() * 3 - 1);
    for (i, octet) in encoded.as_bytes().chunks(2).enumerate() {
        if i > 0 {
            output.push(':');
        }
        // `hex::encode` only emits ASCII digits.
        output.extend(octet.iter().map(|&c| c as char));
    }
    output
}

/// The meaningful octets of the address, unmodified.
pub fn to_bytes(mac: &HardwareAddress) -> Vec<u8> {
    mac.as_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use crate::format::{to_bytes, to_hex_string};
    use crate::models::HardwareAddress;

    #[test]
    fn test_ethernet() {
        let mac = HardwareAddress::ethernet([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(to_hex_string(&mac), "00:11:22:33:44:55");
        assert_eq!(to_bytes(&mac), vec![0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        let mac = HardwareAddress::ethernet([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(to_hex_string(&mac), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_variable_lengths() {
        let short = HardwareAddress::new(7, &[0x0f]).unwrap();
        assert_eq!(to_hex_string(&short), "0f");
        assert_eq!(to_bytes(&short), vec![0x0f]);

        let long = HardwareAddress::new(27, &[1, 2, 3, 4, 5, 6, 7, 0xfe]).unwrap();
        assert_eq!(to_hex_string(&long), "01:02:03:04:05:06:07:fe");
        assert_eq!(to_bytes(&long).len(), 8);
    }

    #[test]
    fn test_hex_string_round_trip() {
        let octets = [0xde, 0xad, 0xbe, 0xef, 0x00, 0x01, 0x7f, 0x80];
        for length in 1..=octets.len() {
            let mac = HardwareAddress::new(1, &octets[..length]).unwrap();
            let string = to_hex_string(&mac);
            assert_eq!(string.len(), length * 3 - 1);
            assert!(!string.ends_with(':'));
            let decoded: Vec<u8> = string
                .split(':')
                .flat_map(|octet| hex::decode(octet).unwrap())
                .collect();
            assert_eq!(decoded, &octets[..length]);
        }
    }
}
