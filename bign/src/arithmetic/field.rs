//! Residues modulo an odd runtime modulus.

use crate::{Error, Result};
use alloc::vec::Vec;
use crypto_bigint::{
    Encoding, Integer, U512,
    modular::runtime_mod::{DynResidue, DynResidueParams},
};
use subtle::ConstantTimeLess;

const LIMBS: usize = U512::LIMBS;

/// Backing integer type, wide enough for `l = 256`.
pub(crate) type Uint = U512;

/// Residue in Montgomery form.
pub(crate) type Residue = DynResidue<LIMBS>;

/// Odd modulus together with its Montgomery parameters and the width of its
/// little-endian encoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Modulus {
    params: DynResidueParams<LIMBS>,
    byte_len: usize,
}

impl Modulus {
    /// Fails with [`Error::InvalidParameters`] if `modulus` is even or does
    /// not fit in `byte_len` bytes.
    pub(crate) fn new(modulus: &Uint, byte_len: usize) -> Result<Self> {
        if !bool::from(modulus.is_odd()) || modulus.bits_vartime() > byte_len * 8 {
            return Err(Error::InvalidParameters);
        }
        Ok(Self {
            params: DynResidueParams::new(modulus),
            byte_len,
        })
    }

    pub(crate) fn value(&self) -> &Uint {
        self.params.modulus()
    }

    pub(crate) fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Bit length of the modulus.
    pub(crate) fn bits(&self) -> usize {
        self.value().bits_vartime()
    }

    pub(crate) fn zero(&self) -> Residue {
        Residue::zero(self.params)
    }

    pub(crate) fn one(&self) -> Residue {
        Residue::one(self.params)
    }

    /// Reduce any integer below 2^512.
    pub(crate) fn reduce(&self, x: &Uint) -> Residue {
        Residue::new(x, self.params)
    }

    /// Interpret up to 64 little-endian bytes as an integer and reduce it.
    pub(crate) fn reduce_bytes(&self, bytes: &[u8]) -> Result<Residue> {
        Ok(self.reduce(&uint_from_le(bytes)?))
    }

    /// Decode exactly `byte_len` little-endian bytes holding a value below
    /// the modulus.
    pub(crate) fn decode(&self, bytes: &[u8]) -> Option<Residue> {
        if bytes.len() != self.byte_len {
            return None;
        }
        let x = uint_from_le(bytes).ok()?;
        if bool::from(x.ct_lt(self.value())) {
            Some(self.reduce(&x))
        } else {
            None
        }
    }

    /// Write the canonical `byte_len`-byte little-endian encoding of `x`.
    pub(crate) fn encode(&self, x: &Residue, out: &mut [u8]) {
        uint_to_le(&x.retrieve(), out);
    }
}

/// Interpret up to 64 little-endian bytes as an integer.
pub(crate) fn uint_from_le(bytes: &[u8]) -> Result<Uint> {
    let mut buf = [0u8; Uint::BYTES];
    buf.get_mut(..bytes.len())
        .ok_or(Error::SizeMismatch)?
        .copy_from_slice(bytes);
    Ok(Uint::from_le_bytes(buf))
}

/// Write the low `out.len()` bytes of `x` in little-endian order.
pub(crate) fn uint_to_le(x: &Uint, out: &mut [u8]) {
    let bytes = x.to_le_bytes();
    let n = out.len().min(bytes.len());
    out[..n].copy_from_slice(&bytes[..n]);
}

/// Little-endian encoding of `x` truncated to `len` bytes.
pub(crate) fn uint_to_le_vec(x: &Uint, len: usize) -> Vec<u8> {
    let mut out = alloc::vec![0u8; len];
    uint_to_le(x, &mut out);
    out
}
