//! `belt-hash`: 256-bit hash function built on `belt-compr`.

use crate::{BLOCK_SIZE, BeltBlock, Error, HASH_SIZE, Result, block::H};
use digest::{
    FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update, consts::U32,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// `belt-hash` output.
pub type Hash = [u8; HASH_SIZE];

/// Size of a `belt-hash` input block.
const HASH_BLOCK_SIZE: usize = 32;

/// Streaming `belt-hash` state.
///
/// [`BeltHash::finalize`] consumes the state, so a stream can only be
/// finalized once. [`BeltHash::finalize_reset`] returns the hash and puts the
/// state back to its initial value for reuse.
#[derive(Clone)]
pub struct BeltHash {
    /// Chaining value.
    h: [u8; 32],
    /// Running XOR of the first compression output over all blocks.
    s: [u8; BLOCK_SIZE],
    buffer: [u8; HASH_BLOCK_SIZE],
    pos: usize,
    /// Message length in bits, modulo 2^128.
    bit_len: u128,
}

impl BeltHash {
    /// Create a fresh hash state.
    pub fn new() -> Self {
        let mut h = [0u8; 32];
        h.copy_from_slice(&H[..32]);
        Self {
            h,
            s: [0; BLOCK_SIZE],
            buffer: [0; HASH_BLOCK_SIZE],
            pos: 0,
            bit_len: 0,
        }
    }

    /// Absorb `data`. May be called any number of times with chunks of any
    /// size.
    pub fn update(&mut self, mut data: &[u8]) {
        self.bit_len = self.bit_len.wrapping_add((data.len() as u128) << 3);

        if self.pos > 0 {
            let take = (HASH_BLOCK_SIZE - self.pos).min(data.len());
            self.buffer[self.pos..self.pos + take].copy_from_slice(&data[..take]);
            self.pos += take;
            data = &data[take..];
            if self.pos < HASH_BLOCK_SIZE {
                return;
            }
            let block = self.buffer;
            self.absorb(&block);
            self.pos = 0;
        }

        let mut blocks = data.chunks_exact(HASH_BLOCK_SIZE);
        for block in &mut blocks {
            let mut x = [0u8; HASH_BLOCK_SIZE];
            x.copy_from_slice(block);
            self.absorb(&x);
        }
        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.pos = rest.len();
    }

    /// Consume the state and return the hash.
    pub fn finalize(mut self) -> Hash {
        self.finalize_inner()
    }

    /// Return the hash and reset the state to its initial value.
    pub fn finalize_reset(&mut self) -> Hash {
        let out = self.finalize_inner();
        self.reset();
        out
    }

    /// Consume the state and write the hash into `out`.
    ///
    /// Fails if `out` is not exactly [`HASH_SIZE`] bytes long.
    pub fn finalize_into_slice(self, out: &mut [u8]) -> Result<()> {
        if out.len() != HASH_SIZE {
            return Err(Error);
        }
        out.copy_from_slice(&self.finalize());
        Ok(())
    }

    /// Reset the state to its initial value.
    pub fn reset(&mut self) {
        self.zeroize_state();
        self.h.copy_from_slice(&H[..32]);
    }

    fn absorb(&mut self, block: &[u8; HASH_BLOCK_SIZE]) {
        let (t, h) = compress(block, &self.h);
        for (s, t) in self.s.iter_mut().zip(t) {
            *s ^= t;
        }
        self.h = h;
    }

    fn finalize_inner(&mut self) -> Hash {
        if self.pos > 0 {
            self.buffer[self.pos..].fill(0);
            let block = self.buffer;
            self.absorb(&block);
            self.pos = 0;
        }

        let mut last = [0u8; HASH_BLOCK_SIZE];
        last[..BLOCK_SIZE].copy_from_slice(&self.bit_len.to_le_bytes());
        last[BLOCK_SIZE..].copy_from_slice(&self.s);
        let (_, y) = compress(&last, &self.h);
        y
    }

    fn zeroize_state(&mut self) {
        self.h.zeroize();
        self.s.zeroize();
        self.buffer.zeroize();
        self.pos = 0;
        self.bit_len = 0;
    }
}

impl Default for BeltHash {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BeltHash {
    fn drop(&mut self) {
        self.zeroize_state();
    }
}

impl ZeroizeOnDrop for BeltHash {}

impl core::fmt::Debug for BeltHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("BeltHash { ... }")
    }
}

impl HashMarker for BeltHash {}

impl OutputSizeUser for BeltHash {
    type OutputSize = U32;
}

impl Update for BeltHash {
    fn update(&mut self, data: &[u8]) {
        BeltHash::update(self, data);
    }
}

impl FixedOutput for BeltHash {
    fn finalize_into(mut self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.finalize_inner());
    }
}

impl Reset for BeltHash {
    fn reset(&mut self) {
        BeltHash::reset(self);
    }
}

impl FixedOutputReset for BeltHash {
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.finalize_reset());
    }
}

/// Compute the `belt-hash` of `data` in one call.
pub fn belt_hash(data: &[u8]) -> Hash {
    let mut hasher = BeltHash::new();
    hasher.update(data);
    hasher.finalize()
}

/// `belt-compr`: compress the block `X1 ‖ X2` together with the chaining
/// value `X3 ‖ X4`.
///
/// Returns `(σ1, σ2)`, the 128-bit value folded into the running sum and the
/// next 256-bit chaining value.
fn compress(block: &[u8; 32], chain: &[u8; 32]) -> ([u8; 16], [u8; 32]) {
    let (x1, x2) = block.split_at(16);
    let (x3, x4) = chain.split_at(16);

    // S = E_{X1‖X2}(X3 ^ X4) ^ X3 ^ X4
    let mut x34 = [0u8; 16];
    for i in 0..16 {
        x34[i] = x3[i] ^ x4[i];
    }
    let mut s = x34;
    BeltBlock::new(block).encrypt_block(&mut s);
    xor(&mut s, &x34);

    // Y1 = E_{S‖X4}(X1) ^ X1
    let mut key = [0u8; 32];
    key[..16].copy_from_slice(&s);
    key[16..].copy_from_slice(x4);
    let mut y1 = [0u8; 16];
    y1.copy_from_slice(x1);
    BeltBlock::new(&key).encrypt_block(&mut y1);
    xor(&mut y1, x1);

    // Y2 = E_{~S‖X3}(X2) ^ X2
    for (k, s) in key[..16].iter_mut().zip(&s) {
        *k = !s;
    }
    key[16..].copy_from_slice(x3);
    let mut y2 = [0u8; 16];
    y2.copy_from_slice(x2);
    BeltBlock::new(&key).encrypt_block(&mut y2);
    xor(&mut y2, x2);
    key.zeroize();

    let mut y = [0u8; 32];
    y[..16].copy_from_slice(&y1);
    y[16..].copy_from_slice(&y2);
    (s, y)
}

fn xor(dst: &mut [u8; 16], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

#[cfg(test)]
mod tests {
    use super::{BeltHash, H, belt_hash};
    use hex_literal::hex;

    #[test]
    fn test_vectors() {
        assert_eq!(
            belt_hash(&H[..13]),
            hex!("ABEF9725D4C5A83597A367D14494CC2542F20F659DDFECC961A3EC550CBA8C75")
        );
        assert_eq!(
            belt_hash(&H[..32]),
            hex!("749E4C3653AECE5E48DB4761227742EB6DBE13F4A80F7BEFF1A9CF8D10EE7786")
        );
        assert_eq!(
            belt_hash(&H[..48]),
            hex!("9D02EE446FB6A29FE5C982D4B13AF9D3E90861BC4CEF27CF306BFB0B174A154A")
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            belt_hash(&[]),
            hex!("EB6BA8BDE3821909B63E14764485530FD8E875A23834D41D6C100AC446828C7E")
        );
    }

    #[test]
    fn finalize_reset_restarts() {
        let mut hasher = BeltHash::new();
        hasher.update(b"testing");
        let first = hasher.finalize_reset();
        assert_eq!(
            first,
            hex!("613B139F4A32674D6AB83537FAF90494E9D51F8CEFC929283D7EB194518E46F9")
        );
        hasher.update(b"testing");
        assert_eq!(hasher.finalize(), first);
    }

    #[test]
    fn finalize_into_slice_checks_size() {
        let mut out = [0u8; 31];
        assert!(BeltHash::new().finalize_into_slice(&mut out).is_err());
        let mut out = [0u8; 32];
        BeltHash::new().finalize_into_slice(&mut out).unwrap();
        assert_eq!(out, belt_hash(&[]));
    }
}
