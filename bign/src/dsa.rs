//! bign digital signature algorithm as defined in [STB 34.101.45-2013 § 7].
//!
//! ## Usage
//!
#![cfg_attr(feature = "std", doc = "```")]
#![cfg_attr(not(feature = "std"), doc = "```ignore")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use bign::{
//!     KeyPair, ObjectIdentifier, belt_hash, load_standard, oid,
//!     dsa::{sign, verify},
//! };
//! use rand_core::OsRng; // requires 'getrandom' feature
//!
//! let params = load_standard(oid::BIGN_CURVE256V1)?;
//! let keys = KeyPair::generate(&params, &mut OsRng)?;
//! let hash_oid: ObjectIdentifier = oid::BELT_HASH.parse()?;
//! let digest = belt_hash(b"test message");
//!
//! // Deterministic signing: no entropy supplied
//! let signature = sign(&params, &hash_oid, &digest, keys.private_key(), &[])?;
//! assert!(verify(&params, &hash_oid, &digest, keys.public_key(), signature.as_bytes()));
//! # Ok(())
//! # }
//! ```
//!
//! [STB 34.101.45-2013 § 7]: https://apmi.bsu.by/assets/files/std/bign-spec294.pdf

mod signing;
mod verifying;

pub use signature;

pub use self::{
    signing::{SigningKey, sign, sign_with_rng},
    verifying::{VerifyingKey, verify},
};

use crate::{Error, Result};
use alloc::vec::Vec;
use core::fmt::{self, Debug};
use hex_literal::hex;
use signature::SignatureEncoding;

/// DER encoding of the `belt-hash` object identifier, used by the
/// [`signature`] trait implementations.
const BELT_OID: [u8; 11] = hex!("06092A7000020022651F51");

/// bign signature `S0 ‖ S1`, `3l/8` bytes long.
///
/// `S0` is the `l/8`-byte truncated challenge hash and `S1` the `l/4`-byte
/// little-endian response.
#[derive(Clone, Eq, PartialEq)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Signature {
    /// Parse a signature of any supported security level: 48, 72 or 96
    /// bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            48 | 72 | 96 => Ok(Self {
                bytes: bytes.to_vec(),
            }),
            _ => Err(Error::SizeMismatch),
        }
    }

    /// Serialized signature.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Challenge `S0`.
    pub fn s0(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() / 3]
    }

    /// Response `S1`.
    pub fn s1(&self) -> &[u8] {
        &self.bytes[self.bytes.len() / 3..]
    }

    /// Security level `l` of this signature.
    pub fn l(&self) -> usize {
        self.bytes.len() * 8 / 3
    }

    /// Convert this signature into a byte vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bign::dsa::Signature(")?;

        for byte in &self.bytes {
            write!(f, "{:02X}", byte)?;
        }

        write!(f, ")")
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Signature> for Vec<u8> {
    fn from(signature: Signature) -> Vec<u8> {
        signature.bytes
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = signature::Error;

    fn try_from(bytes: &[u8]) -> signature::Result<Signature> {
        Ok(Signature::from_slice(bytes)?)
    }
}

impl SignatureEncoding for Signature {
    type Repr = Vec<u8>;

    fn encoded_len(&self) -> usize {
        self.bytes.len()
    }
}
