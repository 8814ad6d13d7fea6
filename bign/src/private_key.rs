//! Private keys and key pair generation.

use crate::{
    Error, Parameters, PublicKey, Result,
    arithmetic::{
        Uint,
        field::{uint_from_le, uint_to_le_vec},
    },
    public_key::derive_public_key,
};
use alloc::vec::Vec;
use core::fmt;
use crypto_bigint::{NonZero, RandomMod, Zero};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq, ConstantTimeLess};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Private key: a secret scalar `d` with `0 < d < q`, stored as `l/4`
/// little-endian bytes.
///
/// The bytes are wiped when the key is dropped.
#[derive(Clone)]
pub struct PrivateKey {
    bytes: Vec<u8>,
}

impl PrivateKey {
    /// Parse a private key for `params`.
    ///
    /// Fails with [`Error::SizeMismatch`] unless `bytes` is `l/4` bytes long
    /// and with [`Error::InvalidPrivateKey`] if the scalar is zero or not
    /// below `q`.
    pub fn from_slice(params: &Parameters, bytes: &[u8]) -> Result<Self> {
        let key = Self {
            bytes: bytes.to_vec(),
        };
        key.scalar(params)?;
        Ok(key)
    }

    /// Generate a private key uniformly from `[1, q-1]`.
    pub fn random(params: &Parameters, rng: &mut impl CryptoRngCore) -> Result<Self> {
        let d = Zeroizing::new(random_scalar(params, rng)?);
        Ok(Self {
            bytes: uint_to_le_vec(&d, params.field_size()),
        })
    }

    /// Raw little-endian bytes of the secret scalar.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Secret scalar checked against `params`.
    pub(crate) fn scalar(&self, params: &Parameters) -> Result<Zeroizing<Uint>> {
        if self.bytes.len() != params.field_size() {
            return Err(Error::SizeMismatch);
        }
        let d = Zeroizing::new(uint_from_le(&self.bytes)?);
        let valid = !d.is_zero() & d.ct_lt(params.order().value());
        if bool::from(valid) {
            Ok(d)
        } else {
            #[cfg(feature = "log")]
            log::debug!("rejected private key outside [1, q-1]");
            Err(Error::InvalidPrivateKey)
        }
    }
}

/// Draw a scalar uniformly from `[1, q-1]`.
pub(crate) fn random_scalar(params: &Parameters, rng: &mut impl CryptoRngCore) -> Result<Uint> {
    let q = Option::<NonZero<Uint>>::from(NonZero::new(*params.order().value()))
        .ok_or(Error::InvalidParameters)?;
    loop {
        let k = Uint::random_mod(rng, &q);
        if !bool::from(k.is_zero()) {
            return Ok(k);
        }
    }
}

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.as_slice().ct_eq(other.bytes.as_slice())
    }
}

/// Constant-time comparison
impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateKey {}

/// Private key together with its public key.
#[derive(Clone, Debug)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generate a fresh key pair for `params` from a cryptographically
    /// secure RNG.
    pub fn generate(params: &Parameters, rng: &mut impl CryptoRngCore) -> Result<Self> {
        let private_key = PrivateKey::random(params, rng)?;
        Self::from_private_key(params, private_key)
    }

    /// Complete a private key with its public key.
    pub fn from_private_key(params: &Parameters, private_key: PrivateKey) -> Result<Self> {
        let public_key = derive_public_key(params, &private_key)?;
        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Borrow the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Borrow the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}
