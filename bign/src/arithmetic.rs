//! Arithmetic over runtime domain parameters.
//!
//! Field elements and scalars are residues modulo a prime chosen when a
//! parameter set is registered, so every supported security level shares one
//! 512-bit Montgomery backend from `crypto-bigint`. Points use projective
//! coordinates with the complete addition formulas of
//! [Renes-Costello-Batina 2015], which hold for any `a`.
//!
//! [Renes-Costello-Batina 2015]: https://eprint.iacr.org/2015/1060

pub(crate) mod field;
pub(crate) mod point;

pub(crate) use self::{
    field::{Modulus, Residue, Uint},
    point::{Curve, ProjectivePoint},
};
