//! Support for signing bign signatures.
//!
//! ## Algorithm
//!
//! ```text
//! 1. Set 𝐻 ← ℎ(𝑋).
//! 2. Generate 𝑘 ← rand(1,..,𝑞-1), or derive it deterministically.
//! 3. Set 𝑅 ← 𝑘𝐺.
//! 4. Set 𝑆0 ← ⟨︀belt-hash(OID(ℎ) ‖ ⟨𝑅⟩2𝑙 ‖ 𝐻)⟩︀_𝑙.
//! 5. Set 𝑆1 ← ⟨︀(𝑘 − 𝐻 − (𝑆0 + 2^𝑙)𝑑) mod 𝑞⟩︀_2𝑙.
//! 6. Set 𝑆 ← 𝑆0 ‖ 𝑆1.
//! 7. Return S.
//! ```
//!
//! ## Deterministic 𝑘
//!
//! Without caller entropy 𝑘 is derived from the key and the hash
//! (STB 34.101.45-2013 § 6.3.3), with optional additional data 𝑡:
//!
//! ```text
//! 1. Set θ ← belt-hash(OID(ℎ) ‖ ⟨𝑑⟩2𝑙 ‖ 𝑡).
//! 2. Set 𝑟 ← 𝐻.
//! 3. Repeat 𝑟 ← belt-wbl(𝑟, θ) until 𝑟 ∈ {1, …, 𝑞-1}.
//!    The wbl round counter runs on across repetitions.
//! 4. Return 𝑘 ← 𝑟.
//! ```

#![allow(non_snake_case)]

use super::{BELT_OID, Signature, VerifyingKey};
use crate::{
    Error, ObjectIdentifier, Parameters, PrivateKey, Result,
    arithmetic::{
        Uint,
        field::{uint_from_le, uint_to_le_vec},
    },
    private_key::random_scalar,
};
use alloc::{sync::Arc, vec::Vec};
use belt::{BeltHash, BeltWbl, belt_hash};
use core::fmt::{self, Debug};
use rand_core::CryptoRngCore;
use signature::{KeypairRef, Signer, hazmat::PrehashSigner};
use subtle::{Choice, ConstantTimeEq, ConstantTimeLess};
use zeroize::Zeroizing;

/// Sign the hash `digest` with `private_key`.
///
/// `oid` identifies the hash function that produced `digest`. `digest` must
/// be `l/4` bytes long. With empty `entropy` the per-signature scalar is
/// derived deterministically from the key and the hash; otherwise `entropy`
/// is mixed into that derivation as additional data.
///
/// Fails with [`Error::SizeMismatch`] on a wrongly sized digest or key and
/// with [`Error::InvalidPrivateKey`] if the key is out of range.
pub fn sign(
    params: &Parameters,
    oid: &ObjectIdentifier,
    digest: &[u8],
    private_key: &PrivateKey,
    entropy: &[u8],
) -> Result<Signature> {
    let oid_der = oid.to_der()?;
    let d = private_key.scalar(params)?;
    check_digest(params, digest)?;
    let k = deterministic_k(params, &oid_der, digest, &d, entropy)?;
    sign_with_k(params, &oid_der, digest, &d, &k)
}

/// Sign the hash `digest` with `private_key`, drawing the per-signature
/// scalar uniformly from `rng`.
pub fn sign_with_rng(
    params: &Parameters,
    oid: &ObjectIdentifier,
    digest: &[u8],
    private_key: &PrivateKey,
    rng: &mut impl CryptoRngCore,
) -> Result<Signature> {
    let oid_der = oid.to_der()?;
    let d = private_key.scalar(params)?;
    check_digest(params, digest)?;
    let k = Zeroizing::new(random_scalar(params, rng)?);
    sign_with_k(params, &oid_der, digest, &d, &k)
}

fn check_digest(params: &Parameters, digest: &[u8]) -> Result<()> {
    if digest.len() == params.field_size() {
        Ok(())
    } else {
        Err(Error::SizeMismatch)
    }
}

/// Derive 𝑘 from the private key and the hash.
fn deterministic_k(
    params: &Parameters,
    oid_der: &[u8],
    digest: &[u8],
    d: &Uint,
    entropy: &[u8],
) -> Result<Zeroizing<Uint>> {
    // 1. Set θ ← belt-hash(OID(ℎ) ‖ ⟨𝑑⟩2𝑙 ‖ 𝑡).
    let d_bytes = Zeroizing::new(uint_to_le_vec(d, params.field_size()));
    let mut hasher = BeltHash::new();
    hasher.update(oid_der);
    hasher.update(&d_bytes);
    hasher.update(entropy);
    let theta = Zeroizing::new(hasher.finalize());

    // 2. Set 𝑟 ← 𝐻.
    let mut r = Zeroizing::new(digest.to_vec());
    let mut wbl = BeltWbl::new(&theta);
    let q = params.order().value();

    // 3. Repeat 𝑟 ← belt-wbl(𝑟, θ) until 𝑟 ∈ {1, …, 𝑞-1}.
    loop {
        wbl.encrypt(&mut r)?;
        let k = Zeroizing::new(uint_from_le(&r)?);
        let valid: Choice = !k.ct_eq(&Uint::ZERO) & k.ct_lt(q);
        if bool::from(valid) {
            // 4. Return 𝑘 ← 𝑟.
            return Ok(k);
        }
    }
}

/// Steps 3 to 7 for a given 𝑘.
fn sign_with_k(
    params: &Parameters,
    oid_der: &[u8],
    digest: &[u8],
    d: &Uint,
    k: &Uint,
) -> Result<Signature> {
    let order = params.order();
    let curve = params.curve();
    let l = params.l();

    // 3. Set 𝑅 ← 𝑘𝐺.
    let R = params.mul_generator(k);
    let (x, _) = curve.to_affine(&R).ok_or(Error::InvalidParameters)?;
    let mut x_bytes = alloc::vec![0u8; params.field_size()];
    curve.field().encode(&x, &mut x_bytes);

    // 4. Set 𝑆0 ← ⟨︀belt-hash(OID(ℎ) ‖ ⟨𝑅⟩2𝑙 ‖ 𝐻)⟩︀_𝑙.
    let mut hasher = BeltHash::new();
    hasher.update(oid_der);
    hasher.update(&x_bytes);
    hasher.update(digest);
    let s0 = hasher.finalize();
    let s0 = &s0[..l / 8];

    // 5. Set 𝑆1 ← ⟨︀(𝑘 − 𝐻 − (𝑆0 + 2^𝑙)𝑑) mod 𝑞⟩︀_2𝑙.
    let h = order.reduce_bytes(digest)?;
    let k = order.reduce(k);
    let d = order.reduce(d);
    let s0_plus = order.reduce(&challenge(s0)?);
    let s1 = k - h - s0_plus * d;

    // 6. Set 𝑆 ← 𝑆0 ‖ 𝑆1.
    let mut bytes = Vec::with_capacity(params.signature_size());
    bytes.extend_from_slice(s0);
    bytes.resize(params.signature_size(), 0);
    order.encode(&s1, &mut bytes[l / 8..]);

    // 7. Return S.
    Ok(Signature { bytes })
}

/// `𝑆0 + 2^𝑙` for an `l/8`-byte challenge.
pub(super) fn challenge(s0: &[u8]) -> Result<Uint> {
    let mut buf = [0u8; 33];
    if s0.len() >= buf.len() {
        return Err(Error::SizeMismatch);
    }
    buf[..s0.len()].copy_from_slice(s0);
    buf[s0.len()] = 1;
    uint_from_le(&buf[..=s0.len()])
}

/// bign private key bundled with its parameters, used for signing messages
/// and producing signatures.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for signing:
///
/// - [`Signer`]: sign a message using this key
/// - [`PrehashSigner`]: sign the low-level raw output bytes of a message digest
///
/// Messages are hashed with `belt-hash`, whose 32-byte output matches the
/// digest size of `l = 128` parameter sets only. Signatures are
/// deterministic.
#[derive(Clone)]
pub struct SigningKey {
    /// Private key.
    private_key: PrivateKey,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Create a signing key from a private key.
    pub fn new(params: Arc<Parameters>, private_key: PrivateKey) -> Result<Self> {
        let public_key = crate::derive_public_key(&params, &private_key)?;
        let verifying_key = VerifyingKey::new(params, public_key);
        Ok(Self {
            private_key,
            verifying_key,
        })
    }

    /// Parse a signing key from little-endian bytes.
    pub fn from_slice(params: Arc<Parameters>, bytes: &[u8]) -> Result<Self> {
        let private_key = PrivateKey::from_slice(&params, bytes)?;
        Self::new(params, private_key)
    }

    /// Generate a random signing key.
    pub fn random(params: Arc<Parameters>, rng: &mut impl CryptoRngCore) -> Result<Self> {
        let private_key = PrivateKey::random(&params, rng)?;
        Self::new(params, private_key)
    }

    /// Borrow the private key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Parameters this key belongs to.
    pub fn params(&self) -> &Arc<Parameters> {
        self.verifying_key.params()
    }
}

//
// `*Signer` trait impls
//

impl PrehashSigner<Signature> for SigningKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        let params = self.params();
        let d = self.private_key.scalar(params)?;
        check_digest(params, prehash)?;
        let k = deterministic_k(params, &BELT_OID, prehash, &d, &[])?;
        Ok(sign_with_k(params, &BELT_OID, prehash, &d, &k)?)
    }
}

impl Signer<Signature> for SigningKey {
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        // 1. Set 𝐻 ← ℎ(𝑋).
        self.sign_prehash(&belt_hash(msg))
    }
}

//
// Other trait impls
//

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.private_key.ct_eq(&other.private_key)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

/// Constant-time comparison
impl Eq for SigningKey {}
impl PartialEq for SigningKey {
    fn eq(&self, other: &SigningKey) -> bool {
        self.ct_eq(other).into()
    }
}

impl KeypairRef for SigningKey {
    type VerifyingKey = VerifyingKey;
}
