//! Points on `y² = x³ + ax + b` in projective coordinates.

use super::field::{Modulus, Residue, Uint};
use crate::{Error, Result};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Point in projective coordinates `(X : Y : Z)`, representing the affine
/// point `(X/Z, Y/Z)`. The identity is `(0 : 1 : 0)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjectivePoint {
    x: Residue,
    y: Residue,
    z: Residue,
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: Residue::conditional_select(&a.x, &b.x, choice),
            y: Residue::conditional_select(&a.y, &b.y, choice),
            z: Residue::conditional_select(&a.z, &b.z, choice),
        }
    }
}

/// Curve equation over a prime field.
#[derive(Clone, Debug)]
pub(crate) struct Curve {
    field: Modulus,
    a: Residue,
    b: Residue,
    /// `3b`, used by the addition formulas.
    b3: Residue,
}

impl Curve {
    pub(crate) fn new(field: Modulus, a: Residue, b: Residue) -> Self {
        let b3 = b + b + b;
        Self { field, a, b, b3 }
    }

    pub(crate) fn field(&self) -> &Modulus {
        &self.field
    }

    pub(crate) fn identity(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.field.zero(),
            y: self.field.one(),
            z: self.field.zero(),
        }
    }

    pub(crate) fn from_affine(&self, x: Residue, y: Residue) -> ProjectivePoint {
        ProjectivePoint {
            x,
            y,
            z: self.field.one(),
        }
    }

    /// Check `y² = x³ + ax + b`.
    pub(crate) fn is_on_curve(&self, x: &Residue, y: &Residue) -> bool {
        let lhs = y.square();
        let rhs = (x.square() + self.a) * x + self.b;
        lhs.ct_eq(&rhs).into()
    }

    pub(crate) fn is_identity(&self, point: &ProjectivePoint) -> bool {
        point.z.ct_eq(&self.field.zero()).into()
    }

    /// Affine coordinates of `point`, or `None` for the identity.
    pub(crate) fn to_affine(&self, point: &ProjectivePoint) -> Option<(Residue, Residue)> {
        let (z_inv, invertible) = point.z.invert();
        if bool::from(invertible) {
            Some((point.x * z_inv, point.y * z_inv))
        } else {
            None
        }
    }

    /// Decode `x ‖ y`, each coordinate little-endian, and check the point
    /// lies on the curve.
    pub(crate) fn decode_point(&self, bytes: &[u8]) -> Result<(Residue, Residue)> {
        let len = self.field.byte_len();
        if bytes.len() != 2 * len {
            return Err(Error::SizeMismatch);
        }
        let (x, y) = bytes.split_at(len);
        let x = self.field.decode(x).ok_or(Error::InvalidPublicKey)?;
        let y = self.field.decode(y).ok_or(Error::InvalidPublicKey)?;
        if !self.is_on_curve(&x, &y) {
            return Err(Error::InvalidPublicKey);
        }
        Ok((x, y))
    }

    /// Write `x ‖ y` into `out`, which must be twice the field size.
    pub(crate) fn encode_point(&self, x: &Residue, y: &Residue, out: &mut [u8]) {
        let (xs, ys) = out.split_at_mut(self.field.byte_len());
        self.field.encode(x, xs);
        self.field.encode(y, ys);
    }

    /// Complete addition, [Renes-Costello-Batina 2015] algorithm 1.
    ///
    /// [Renes-Costello-Batina 2015]: https://eprint.iacr.org/2015/1060
    pub(crate) fn add(&self, lhs: &ProjectivePoint, rhs: &ProjectivePoint) -> ProjectivePoint {
        let (a, b3) = (self.a, self.b3);

        let t0 = lhs.x * rhs.x; // 1
        let t1 = lhs.y * rhs.y; // 2
        let t2 = lhs.z * rhs.z; // 3
        let t3 = lhs.x + lhs.y; // 4
        let t4 = rhs.x + rhs.y; // 5
        let t3 = t3 * t4; // 6
        let t4 = t0 + t1; // 7
        let t3 = t3 - t4; // 8
        let t4 = lhs.x + lhs.z; // 9
        let t5 = rhs.x + rhs.z; // 10
        let t4 = t4 * t5; // 11
        let t5 = t0 + t2; // 12
        let t4 = t4 - t5; // 13
        let t5 = lhs.y + lhs.z; // 14
        let x3 = rhs.y + rhs.z; // 15
        let t5 = t5 * x3; // 16
        let x3 = t1 + t2; // 17
        let t5 = t5 - x3; // 18
        let z3 = a * t4; // 19
        let x3 = b3 * t2; // 20
        let z3 = x3 + z3; // 21
        let x3 = t1 - z3; // 22
        let z3 = t1 + z3; // 23
        let y3 = x3 * z3; // 24
        let t1 = t0 + t0; // 25
        let t1 = t1 + t0; // 26
        let t2 = a * t2; // 27
        let t4 = b3 * t4; // 28
        let t1 = t1 + t2; // 29
        let t2 = t0 - t2; // 30
        let t2 = a * t2; // 31
        let t4 = t4 + t2; // 32
        let t0 = t1 * t4; // 33
        let y3 = y3 + t0; // 34
        let t0 = t5 * t4; // 35
        let x3 = t3 * x3; // 36
        let x3 = x3 - t0; // 37
        let t0 = t3 * t1; // 38
        let z3 = t5 * z3; // 39
        let z3 = z3 + t0; // 40

        ProjectivePoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Exception-free doubling, [Renes-Costello-Batina 2015] algorithm 3.
    ///
    /// [Renes-Costello-Batina 2015]: https://eprint.iacr.org/2015/1060
    pub(crate) fn double(&self, point: &ProjectivePoint) -> ProjectivePoint {
        let (a, b3) = (self.a, self.b3);

        let t0 = point.x * point.x; // 1
        let t1 = point.y * point.y; // 2
        let t2 = point.z * point.z; // 3
        let t3 = point.x * point.y; // 4
        let t3 = t3 + t3; // 5
        let z3 = point.x * point.z; // 6
        let z3 = z3 + z3; // 7
        let x3 = a * z3; // 8
        let y3 = b3 * t2; // 9
        let y3 = x3 + y3; // 10
        let x3 = t1 - y3; // 11
        let y3 = t1 + y3; // 12
        let y3 = x3 * y3; // 13
        let x3 = t3 * x3; // 14
        let z3 = b3 * z3; // 15
        let t2 = a * t2; // 16
        let t3 = t0 - t2; // 17
        let t3 = a * t3; // 18
        let t3 = t3 + z3; // 19
        let z3 = t0 + t0; // 20
        let t0 = z3 + t0; // 21
        let t0 = t0 + t2; // 22
        let t0 = t0 * t3; // 23
        let y3 = y3 + t0; // 24
        let t2 = point.y * point.z; // 25
        let t2 = t2 + t2; // 26
        let t0 = t2 * t3; // 27
        let x3 = x3 - t0; // 28
        let z3 = t2 * t1; // 29
        let z3 = z3 + z3; // 30
        let z3 = z3 + z3; // 31

        ProjectivePoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// `[k]point` by double-and-add-always over the low `bits` bits of `k`.
    ///
    /// The sequence of field operations depends only on `bits`.
    pub(crate) fn mul(&self, point: &ProjectivePoint, k: &Uint, bits: usize) -> ProjectivePoint {
        let mut acc = self.identity();
        for i in (0..bits).rev() {
            acc = self.double(&acc);
            let sum = self.add(&acc, point);
            acc = ProjectivePoint::conditional_select(&acc, &sum, k.bit(i).into());
        }
        acc
    }

    /// `[k1]p1 + [k2]p2`.
    pub(crate) fn lincomb(
        &self,
        (p1, k1): (&ProjectivePoint, &Uint),
        (p2, k2): (&ProjectivePoint, &Uint),
        bits: usize,
    ) -> ProjectivePoint {
        let sum = self.add(p1, p2);
        let mut acc = self.identity();
        for i in (0..bits).rev() {
            acc = self.double(&acc);
            let b1: Choice = k1.bit(i).into();
            let b2: Choice = k2.bit(i).into();
            let mut addend = ProjectivePoint::conditional_select(p1, p2, b2);
            addend.conditional_assign(&sum, b1 & b2);
            let next = self.add(&acc, &addend);
            acc = ProjectivePoint::conditional_select(&acc, &next, b1 | b2);
        }
        acc
    }
}
