//! Domain parameters of the bign signature scheme.

use crate::{
    Error, ObjectIdentifier, Result,
    arithmetic::{Curve, Modulus, ProjectivePoint, Uint, field::uint_from_le},
};
use alloc::vec::Vec;
use core::fmt;
use subtle::ConstantTimeEq;

/// Size of the parameter generation seed in bytes.
pub const SEED_SIZE: usize = 8;

/// Immutable set of curve parameters for security level `l`.
///
/// Describes the curve `y² = x³ + ax + b` over the prime field of order `p`,
/// its base point `G = (0, yG)` and the prime order `q` of `G`. All values
/// are `l/4` bytes long and little-endian.
///
/// Parameters are validated once on construction and never change, so a
/// single instance can back any number of concurrent signature operations.
/// The only later addition is the identifier recorded by
/// [`ParamStore::register`](crate::ParamStore::register).
#[derive(Clone)]
pub struct Parameters {
    l: usize,
    p: Vec<u8>,
    a: Vec<u8>,
    b: Vec<u8>,
    q: Vec<u8>,
    y_g: Vec<u8>,
    seed: [u8; SEED_SIZE],
    oid: Option<ObjectIdentifier>,
    curve: Curve,
    order: Modulus,
    generator: ProjectivePoint,
}

impl Parameters {
    /// Validate and assemble a parameter set.
    ///
    /// Checks that `l` is 128, 192 or 256, that every value is exactly `l/4`
    /// bytes ([`Error::SizeMismatch`] otherwise) and that the values describe
    /// a usable curve ([`Error::InvalidParameters`] otherwise):
    ///
    /// - `2^(2l-1) < p < 2^(2l)` and `p ≡ 3 (mod 4)`;
    /// - `a, b < p`, `b ≠ 0` and `4a³ + 27b² ≠ 0 (mod p)`;
    /// - `q` is odd and differs from `p`;
    /// - `yG < p` and `yG² = b (mod p)`, so `G = (0, yG)` is on the curve;
    /// - `qG = O`.
    ///
    /// Primality of `p` and `q` is not tested.
    pub fn new(
        l: usize,
        p: &[u8],
        a: &[u8],
        b: &[u8],
        q: &[u8],
        y_g: &[u8],
        seed: &[u8],
    ) -> Result<Self> {
        if !matches!(l, 128 | 192 | 256) {
            return Err(Error::InvalidParameters);
        }
        let len = l / 4;
        if [p, a, b, q, y_g].iter().any(|v| v.len() != len) || seed.len() != SEED_SIZE {
            return Err(Error::SizeMismatch);
        }

        let p_int = uint_from_le(p)?;
        if p_int.bits_vartime() != 2 * l || !p_int.bit_vartime(0) || !p_int.bit_vartime(1) {
            return Err(Error::InvalidParameters);
        }
        let field = Modulus::new(&p_int, len)?;
        let a_fe = field.decode(a).ok_or(Error::InvalidParameters)?;
        let b_fe = field.decode(b).ok_or(Error::InvalidParameters)?;
        let y_fe = field.decode(y_g).ok_or(Error::InvalidParameters)?;

        let zero = field.zero();
        if bool::from(b_fe.ct_eq(&zero)) {
            return Err(Error::InvalidParameters);
        }
        let four = field.reduce(&Uint::from_u64(4));
        let twenty_seven = field.reduce(&Uint::from_u64(27));
        let discriminant = four * a_fe.square() * a_fe + twenty_seven * b_fe.square();
        if bool::from(discriminant.ct_eq(&zero)) {
            return Err(Error::InvalidParameters);
        }

        let q_int = uint_from_le(q)?;
        if q_int == p_int {
            return Err(Error::InvalidParameters);
        }
        let order = Modulus::new(&q_int, len)?;

        let curve = Curve::new(field, a_fe, b_fe);
        if !curve.is_on_curve(&zero, &y_fe) {
            return Err(Error::InvalidParameters);
        }
        let generator = curve.from_affine(zero, y_fe);
        if !curve.is_identity(&curve.mul(&generator, order.value(), order.bits())) {
            return Err(Error::InvalidParameters);
        }

        let mut seed_bytes = [0u8; SEED_SIZE];
        seed_bytes.copy_from_slice(seed);

        Ok(Self {
            l,
            p: p.to_vec(),
            a: a.to_vec(),
            b: b.to_vec(),
            q: q.to_vec(),
            y_g: y_g.to_vec(),
            seed: seed_bytes,
            oid: None,
            curve,
            order,
            generator,
        })
    }

    /// Security level `l` in bits.
    pub fn l(&self) -> usize {
        self.l
    }

    /// Field modulus `p`.
    pub fn p(&self) -> &[u8] {
        &self.p
    }

    /// Curve coefficient `a`.
    pub fn a(&self) -> &[u8] {
        &self.a
    }

    /// Curve coefficient `b`.
    pub fn b(&self) -> &[u8] {
        &self.b
    }

    /// Order `q` of the base point.
    pub fn q(&self) -> &[u8] {
        &self.q
    }

    /// `y`-coordinate of the base point `G = (0, yG)`.
    pub fn y_g(&self) -> &[u8] {
        &self.y_g
    }

    /// Seed the parameters were generated from.
    pub fn seed(&self) -> &[u8; SEED_SIZE] {
        &self.seed
    }

    /// Cofactor `h = #E / q`.
    ///
    /// bign curves have prime order, so `G` generates the whole group and
    /// the cofactor is always 1.
    pub fn cofactor(&self) -> u32 {
        1
    }

    /// Identifier the set was registered under in a [`ParamStore`].
    ///
    /// `None` for sets built with [`Parameters::new`] and not yet registered.
    ///
    /// [`ParamStore`]: crate::ParamStore
    pub fn oid(&self) -> Option<&ObjectIdentifier> {
        self.oid.as_ref()
    }

    pub(crate) fn set_oid(&mut self, oid: ObjectIdentifier) {
        self.oid = Some(oid);
    }

    /// Size of field elements, private keys and digests in bytes: `l/4`.
    pub fn field_size(&self) -> usize {
        self.l / 4
    }

    /// Size of an encoded public key in bytes: `l/2`.
    pub fn public_key_size(&self) -> usize {
        self.l / 2
    }

    /// Size of a signature in bytes: `3l/8`.
    pub fn signature_size(&self) -> usize {
        3 * self.l / 8
    }

    pub(crate) fn curve(&self) -> &Curve {
        &self.curve
    }

    pub(crate) fn order(&self) -> &Modulus {
        &self.order
    }

    pub(crate) fn generator(&self) -> &ProjectivePoint {
        &self.generator
    }

    /// `[k]G`.
    pub(crate) fn mul_generator(&self, k: &Uint) -> ProjectivePoint {
        self.curve.mul(&self.generator, k, self.order.bits())
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameters")
            .field("oid", &self.oid)
            .field("l", &self.l)
            .field("p", &crate::to_hex(&self.p))
            .field("q", &crate::to_hex(&self.q))
            .finish_non_exhaustive()
    }
}

/// Compares the curve values only. The registered identifier is ignored, so a
/// set stored under two identifiers compares equal to itself.
impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.l == other.l
            && self.p == other.p
            && self.a == other.a
            && self.b == other.b
            && self.q == other.q
            && self.y_g == other.y_g
            && self.seed == other.seed
    }
}

impl Eq for Parameters {}
