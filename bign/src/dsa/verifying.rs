//! Support for verifying bign signatures.
//!
//! ## Algorithm
//!
//! ```text
//! 1. If |𝑆| != 3𝑙, return NO.
//! 2. Assume 𝑆 as 𝑆 = 𝑆0 ‖ 𝑆1, where 𝑆0 ∈ {0, 1}^𝑙, 𝑆1 ∈ {0, 1}^2𝑙.
//! 3. If 𝑆1 ⩾ 𝑞, return NO.
//! 4. Set 𝐻 ← ℎ(𝑋).
//! 5. Set 𝑅 ← (︀(𝑆1 + 𝐻) mod 𝑞)︀𝐺 + (𝑆0 + 2^𝑙)𝑄.
//! 6. If 𝑅 = 𝑂, return NO.
//! 7. Set 𝑡 ← ⟨︀belt-hash(OID(ℎ) ‖ ⟨𝑅⟩2𝑙 ‖ 𝐻)⟩︀_𝑙.
//! 8. If 𝑆0 != 𝑡, return NO.
//! 9. Return YES.
//! ```

#![allow(non_snake_case)]

use super::{BELT_OID, Signature, signing::challenge};
use crate::{ObjectIdentifier, Parameters, PublicKey, Result};
use alloc::sync::Arc;
use belt::{BeltHash, belt_hash};
use signature::{Error, Verifier, hazmat::PrehashVerifier};
use subtle::ConstantTimeEq;

/// Check `signature` on the hash `digest` under `public_key`.
///
/// Returns `false` for any malformed input: a digest or signature of the
/// wrong size, a public key that does not belong to `params`, or an
/// identifier that cannot be encoded.
pub fn verify(
    params: &Parameters,
    oid: &ObjectIdentifier,
    digest: &[u8],
    public_key: &PublicKey,
    signature: &[u8],
) -> bool {
    match oid.to_der() {
        Ok(oid_der) => verify_der(params, &oid_der, digest, public_key, signature),
        Err(_) => false,
    }
}

fn verify_der(
    params: &Parameters,
    oid_der: &[u8],
    digest: &[u8],
    public_key: &PublicKey,
    signature: &[u8],
) -> bool {
    let accepted = check(params, oid_der, digest, public_key, signature).unwrap_or(false);
    #[cfg(feature = "log")]
    if !accepted {
        log::debug!("signature rejected");
    }
    accepted
}

fn check(
    params: &Parameters,
    oid_der: &[u8],
    digest: &[u8],
    public_key: &PublicKey,
    signature: &[u8],
) -> Result<bool> {
    let order = params.order();
    let curve = params.curve();
    let l = params.l();

    // 1. If |𝑆| != 3𝑙, return NO.
    if signature.len() != params.signature_size() || digest.len() != params.field_size() {
        return Ok(false);
    }

    // 2. Assume 𝑆 as 𝑆 = 𝑆0 ‖ 𝑆1, where 𝑆0 ∈ {0, 1}^𝑙, 𝑆1 ∈ {0, 1}^2𝑙.
    let (s0, s1) = signature.split_at(l / 8);

    // 3. If 𝑆1 ⩾ 𝑞, return NO.
    let Some(s1) = order.decode(s1) else {
        return Ok(false);
    };

    let Q = public_key.to_projective(params)?;
    let h = order.reduce_bytes(digest)?;

    // 5. Set 𝑅 ← (︀(𝑆1 + 𝐻) mod 𝑞)︀𝐺 + (𝑆0 + 2^𝑙)𝑄.
    let left = (s1 + h).retrieve();
    let right = challenge(s0)?;
    let R = curve.lincomb((params.generator(), &left), (&Q, &right), order.bits());

    // 6. If 𝑅 = 𝑂, return NO.
    let Some((x, _)) = curve.to_affine(&R) else {
        return Ok(false);
    };
    let mut x_bytes = alloc::vec![0u8; params.field_size()];
    curve.field().encode(&x, &mut x_bytes);

    // 7. Set 𝑡 ← ⟨︀belt-hash(OID(ℎ) ‖ ⟨𝑅⟩2𝑙 ‖ 𝐻)⟩︀_𝑙.
    let mut hasher = BeltHash::new();
    hasher.update(oid_der);
    hasher.update(&x_bytes);
    hasher.update(digest);
    let t = hasher.finalize();

    // 8. If 𝑆0 != 𝑡, return NO.
    // 9. Return YES.
    Ok(t[..l / 8].ct_eq(s0).into())
}

/// bign public key bundled with its parameters, used for verifying that
/// signatures are valid for a given message.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for verifying:
///
/// - [`Verifier`]: verify a message against a provided key and signature
/// - [`PrehashVerifier`]: verify the low-level raw output bytes of a message digest
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    params: Arc<Parameters>,

    /// Signer's public key.
    public_key: PublicKey,
}

impl VerifyingKey {
    /// Initialize [`VerifyingKey`] from parameters and a public key.
    pub fn new(params: Arc<Parameters>, public_key: PublicKey) -> Self {
        Self { params, public_key }
    }

    /// Parse a [`VerifyingKey`] from an encoded point `x ‖ y`.
    pub fn from_bytes(params: Arc<Parameters>, bytes: &[u8]) -> Result<Self> {
        let public_key = PublicKey::from_bytes(&params, bytes)?;
        Ok(Self::new(params, public_key))
    }

    /// Borrow the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Parameters this key belongs to.
    pub fn params(&self) -> &Arc<Parameters> {
        &self.params
    }

    /// Serialize the public key.
    pub fn to_bytes(&self) -> alloc::vec::Vec<u8> {
        self.public_key.as_bytes().to_vec()
    }
}

//
// `*Verifier` trait impls
//

impl PrehashVerifier<Signature> for VerifyingKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        if verify_der(
            &self.params,
            &BELT_OID,
            prehash,
            &self.public_key,
            signature.as_bytes(),
        ) {
            Ok(())
        } else {
            Err(Error::new())
        }
    }
}

impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        // 4. Set 𝐻 ← ℎ(𝑋).
        self.verify_prehash(&belt_hash(msg), signature)
    }
}

//
// Other trait impls
//

impl From<VerifyingKey> for PublicKey {
    fn from(verifying_key: VerifyingKey) -> PublicKey {
        verifying_key.public_key
    }
}

impl From<&VerifyingKey> for PublicKey {
    fn from(verifying_key: &VerifyingKey) -> PublicKey {
        verifying_key.public_key.clone()
    }
}
