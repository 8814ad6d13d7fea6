//! Public keys.

use crate::{
    Error, Parameters, PrivateKey, Result,
    arithmetic::{ProjectivePoint, Residue},
};
use alloc::vec::Vec;
use core::fmt;

/// Public key `Q = dG`, encoded as `x ‖ y` with both coordinates `l/4`
/// little-endian bytes.
#[derive(Clone, Eq, PartialEq)]
pub struct PublicKey {
    bytes: Vec<u8>,
}

impl PublicKey {
    /// Parse and validate a public key for `params`.
    ///
    /// Fails with [`Error::SizeMismatch`] unless `bytes` is `l/2` bytes long
    /// and with [`Error::InvalidPublicKey`] if a coordinate is not below `p`
    /// or the point is not on the curve.
    pub fn from_bytes(params: &Parameters, bytes: &[u8]) -> Result<Self> {
        params.curve().decode_point(bytes).inspect_err(|_e| {
            #[cfg(feature = "log")]
            log::debug!("rejected public key: {_e}");
        })?;
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Encoded point `x ‖ y`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Point on the curve of `params`.
    pub(crate) fn to_projective(&self, params: &Parameters) -> Result<ProjectivePoint> {
        let (x, y) = params.curve().decode_point(&self.bytes)?;
        Ok(params.curve().from_affine(x, y))
    }

    fn from_affine(params: &Parameters, x: &Residue, y: &Residue) -> Self {
        let mut bytes = alloc::vec![0u8; params.public_key_size()];
        params.curve().encode_point(x, y, &mut bytes);
        Self { bytes }
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", crate::to_hex(&self.bytes))
    }
}

/// Compute the public key `Q = dG` of `private_key`.
///
/// Fails with [`Error::SizeMismatch`] if the key is not `l/4` bytes and with
/// [`Error::InvalidPrivateKey`] if `d` is zero or not below `q`.
pub fn derive_public_key(params: &Parameters, private_key: &PrivateKey) -> Result<PublicKey> {
    let d = private_key.scalar(params)?;
    let q = params.mul_generator(&d);
    let (x, y) = params
        .curve()
        .to_affine(&q)
        .ok_or(Error::InvalidParameters)?;
    Ok(PublicKey::from_affine(params, &x, &y))
}
