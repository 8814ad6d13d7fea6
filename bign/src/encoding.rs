//! Hexadecimal rendering of keys, digests and signatures.

use crate::{Error, Result};
use alloc::{string::String, vec::Vec};

/// Encode `bytes` as an uppercase hexadecimal string.
pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_upper(bytes)
}

/// Decode a hexadecimal string of either case.
pub fn from_hex(s: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(s)?)
}

/// Decode a hexadecimal string into a fixed-size array.
///
/// Fails with [`Error::SizeMismatch`] when the decoded length is not `N`.
pub fn from_hex_array<const N: usize>(s: &str) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    match hex::decode_to_slice(s, &mut out) {
        Ok(()) => Ok(out),
        Err(hex::FromHexError::InvalidStringLength) => Err(Error::SizeMismatch),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::{from_hex, from_hex_array, to_hex};
    use crate::Error;

    #[test]
    fn upper_case_output() {
        assert_eq!(to_hex([0x0au8, 0xbc, 0xff]), "0ABCFF");
        assert_eq!(to_hex(b""), "");
    }

    #[test]
    fn mixed_case_input() {
        assert_eq!(from_hex("0aBcFf").unwrap(), [0x0a, 0xbc, 0xff]);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(from_hex("0G"), Err(Error::InvalidHex));
        assert_eq!(from_hex("ABC"), Err(Error::InvalidHex));
        assert_eq!(from_hex_array::<2>("AABBCC"), Err(Error::SizeMismatch));
        assert_eq!(from_hex_array::<2>("AABB").unwrap(), [0xaa, 0xbb]);
    }
}
