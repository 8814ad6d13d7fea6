//! Object identifiers and their DER encoding.
//!
//! An [`ObjectIdentifier`] is parsed from its dotted-decimal form and
//! encoded as a DER `OBJECT IDENTIFIER` TLV: tag `0x06`, a definite length
//! and the packed arcs. The first two arcs are folded into one
//! subidentifier `40 * arc0 + arc1`; every subidentifier is written in
//! base 128, most significant group first, with the high bit set on all but
//! the last byte.
//!
//! ```
//! use bign::ObjectIdentifier;
//!
//! let oid: ObjectIdentifier = "1.2.112.0.2.0.34.101.31.81".parse()?;
//! let der = oid.to_der()?;
//! assert_eq!(der, [0x06, 0x09, 0x2A, 0x70, 0x00, 0x02, 0x00, 0x22, 0x65, 0x1F, 0x51]);
//! assert_eq!(ObjectIdentifier::from_der(&der)?, oid);
//! # Ok::<(), bign::Error>(())
//! ```

use crate::{Error, Result};
use alloc::vec::Vec;
use core::{fmt, str::FromStr};
use der::{DecodeValue, EncodeValue, FixedTag, Header, Length, Reader, Tag, Writer};

/// `belt-hash` (STB 34.101.31).
pub const BELT_HASH: &str = "1.2.112.0.2.0.34.101.31.81";

/// `bign-curve256v1` parameter set (STB 34.101.45, table B.1).
pub const BIGN_CURVE256V1: &str = "1.2.112.0.2.0.34.101.45.3.1";

/// `bign-curve384v1` parameter set (STB 34.101.45, table B.2).
pub const BIGN_CURVE384V1: &str = "1.2.112.0.2.0.34.101.45.3.2";

/// `bign-curve512v1` parameter set (STB 34.101.45, table B.3).
pub const BIGN_CURVE512V1: &str = "1.2.112.0.2.0.34.101.45.3.3";

/// `bign-with-hbelt`: bign signatures over `belt-hash` digests.
pub const BIGN_WITH_HBELT: &str = "1.2.112.0.2.0.34.101.45.12";

/// Object identifier: a sequence of at least two non-negative arcs.
#[derive(Clone, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct ObjectIdentifier {
    arcs: Vec<u64>,
}

impl ObjectIdentifier {
    /// Build an identifier from its arcs.
    ///
    /// The first arc must be 0, 1 or 2; under 0 and 1 the second arc must be
    /// below 40.
    pub fn new(arcs: &[u64]) -> Result<Self> {
        match arcs {
            [first, second, ..] if *first <= 1 && *second < 40 => {}
            [2, second, ..] if *second <= u64::MAX - 80 => {}
            _ => return Err(Error::MalformedOid),
        }
        Ok(Self {
            arcs: arcs.to_vec(),
        })
    }

    /// Arcs of this identifier.
    pub fn arcs(&self) -> &[u64] {
        &self.arcs
    }

    /// Encode as a complete DER TLV.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(der::Encode::to_der(self)?)
    }

    /// Decode a complete DER TLV.
    ///
    /// Fails with [`Error::InvalidDerEncoding`] on a tag other than
    /// `OBJECT IDENTIFIER`, a truncated or non-minimal length, non-canonical
    /// arcs, or trailing data.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        Ok(<Self as der::Decode<'_>>::from_der(bytes)?)
    }

    fn subidentifiers(&self) -> impl Iterator<Item = u64> + '_ {
        let first = self.arcs[0] * 40 + self.arcs[1];
        core::iter::once(first).chain(self.arcs[2..].iter().copied())
    }
}

/// Number of base-128 digits needed for `value`.
fn base128_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

impl EncodeValue for ObjectIdentifier {
    fn value_len(&self) -> der::Result<Length> {
        let len: usize = self.subidentifiers().map(base128_len).sum();
        Length::try_from(len)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for value in self.subidentifiers() {
            let digits = base128_len(value);
            for i in (0..digits).rev() {
                let byte = ((value >> (7 * i)) & 0x7F) as u8;
                writer.write_byte(if i > 0 { byte | 0x80 } else { byte })?;
            }
        }
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for ObjectIdentifier {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let bytes = reader.read_slice(header.length)?;

        // The last byte must close a subidentifier.
        match bytes.last() {
            Some(last) if last & 0x80 == 0 => {}
            _ => return Err(Tag::ObjectIdentifier.value_error()),
        }

        let mut arcs = Vec::new();
        let mut value = 0u64;
        let mut started = false;
        for &byte in bytes {
            if !started && byte == 0x80 {
                return Err(Tag::ObjectIdentifier.non_canonical_error());
            }
            if value > u64::MAX >> 7 {
                return Err(Tag::ObjectIdentifier.value_error());
            }
            value = (value << 7) | u64::from(byte & 0x7F);
            started = byte & 0x80 != 0;

            if !started {
                if arcs.is_empty() {
                    let (first, second) = match value {
                        0..40 => (0, value),
                        40..80 => (1, value - 40),
                        _ => (2, value - 80),
                    };
                    arcs.push(first);
                    arcs.push(second);
                } else {
                    arcs.push(value);
                }
                value = 0;
            }
        }

        Ok(Self { arcs })
    }
}

impl FixedTag for ObjectIdentifier {
    const TAG: Tag = Tag::ObjectIdentifier;
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut arcs = Vec::new();
        for part in s.split('.') {
            let canonical = match part.as_bytes() {
                [b'0'] => true,
                [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
                _ => false,
            };
            if !canonical {
                return Err(Error::MalformedOid);
            }
            arcs.push(part.parse::<u64>().map_err(|_| Error::MalformedOid)?);
        }
        Self::new(&arcs)
    }
}

impl TryFrom<&str> for ObjectIdentifier {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.arcs.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectIdentifier({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::{BELT_HASH, BIGN_CURVE256V1, ObjectIdentifier};
    use crate::Error;
    use alloc::{string::ToString, vec::Vec};
    use hex_literal::hex;

    #[test]
    fn belt_hash_der() {
        let oid: ObjectIdentifier = BELT_HASH.parse().unwrap();
        let der = oid.to_der().unwrap();
        assert_eq!(der, hex!("06092A7000020022651F51"));
        assert_eq!(der.len(), 11);
        assert_eq!(der[1] as usize, der.len() - 2);
    }

    #[test]
    fn bign_curve_der() {
        let oid: ObjectIdentifier = BIGN_CURVE256V1.parse().unwrap();
        assert_eq!(oid.to_der().unwrap(), hex!("060A2A7000020022652D0301"));
        assert_eq!(oid.to_string(), BIGN_CURVE256V1);
    }

    #[test]
    fn multi_byte_arcs() {
        // 2.999.1: first subidentifier 1079 spans two bytes.
        let oid: ObjectIdentifier = "2.999.1".parse().unwrap();
        assert_eq!(oid.to_der().unwrap(), hex!("0603883701"));
        assert_eq!(ObjectIdentifier::from_der(&hex!("0603883701")).unwrap(), oid);

        let max: ObjectIdentifier = "1.2.18446744073709551615".parse().unwrap();
        let der = max.to_der().unwrap();
        assert_eq!(der[1], 11);
        assert_eq!(ObjectIdentifier::from_der(&der).unwrap(), max);
    }

    #[test]
    fn long_form_length() {
        let arcs: Vec<u64> = [1, 2].into_iter().chain(core::iter::repeat_n(300, 70)).collect();
        let oid = ObjectIdentifier::new(&arcs).unwrap();
        let der = oid.to_der().unwrap();
        // 1 + 70 * 2 content bytes
        assert_eq!(&der[..3], &[0x06, 0x81, 141]);
        assert_eq!(ObjectIdentifier::from_der(&der).unwrap(), oid);
    }

    #[test]
    fn malformed_strings() {
        for s in [
            "", "1", "1.", ".1.2", "1..2", "3.1", "0.40", "1.2.x", "1.02", "1.+2", "1.2.-3",
            "1.2.18446744073709551616",
        ] {
            assert_eq!(
                s.parse::<ObjectIdentifier>(),
                Err(Error::MalformedOid),
                "{s:?}"
            );
        }
        assert!("2.40".parse::<ObjectIdentifier>().is_ok());
    }

    #[test]
    fn malformed_der() {
        for der in [
            &hex!("0403883701")[..],     // wrong tag
            &hex!("060388")[..],         // truncated content
            &hex!("06")[..],             // missing length
            &hex!("06022A88")[..],       // ends inside a subidentifier
            &hex!("060480883701")[..],   // leading 0x80 pad
            &hex!("06042A800337")[..],   // pad after the first arc
            &hex!("0600")[..],           // empty content
            &hex!("0681032A0304")[..],   // non-minimal length
            &hex!("06022A0300")[..],     // trailing data
            &hex!("060B8180808080808080808000")[..], // too large for u64
        ] {
            assert_eq!(
                ObjectIdentifier::from_der(der),
                Err(Error::InvalidDerEncoding),
                "{der:02X?}"
            );
        }
    }
}
