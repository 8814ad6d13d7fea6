//! `belt-block`: 128-bit block cipher with a 256-bit key.

use crate::{BLOCK_SIZE, Error, KEY_SIZE, Result};
use hex_literal::hex;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Substitution table `H`.
///
/// Its first 32 bytes are also the initial `belt-hash` state.
pub(crate) const H: [u8; 256] = hex!(
    "B194BAC80A08F53B366D008E584A5DE4"
    "8504FA9D1BB6C7AC252E72C202FDCE0D"
    "5BE3D61217B96181FE6786AD716B890B"
    "5CB0C0FF33C356B835C405AED8E07F99"
    "E12BDC1AE28257EC703FCCF095EE8DF1"
    "C1AB76389FE678CAF7C6F860D5BB9C4F"
    "F33C657B637C306ADD4EA7799EB23D31"
    "3E98B56E27D3BCCF591E181F4C5AB793"
    "E9DEE72C8F0C0FA62DDB49F46F739647"
    "06075316ED247A3739CBA38303A98BF6"
    "92BD9B1CE5D141015445FBC95E4D0EF2"
    "682080AA227D642F2687F93490405511"
    "BE32971343FC9A48A02A885F194B09A1"
    "7ECDA4D01544AF8CA58450BF66D2E88A"
    "A2D7465242A8DFB36974C551EB232921"
    "D4EFD9B43A622875911410EA776CDA1D"
);

/// Substitute every byte of `u` through `H`, then rotate left by `r` bits.
#[inline(always)]
fn g(u: u32, r: u32) -> u32 {
    let [b0, b1, b2, b3] = u.to_le_bytes();
    let v = u32::from_le_bytes([
        H[b0 as usize],
        H[b1 as usize],
        H[b2 as usize],
        H[b3 as usize],
    ]);
    v.rotate_left(r)
}

#[inline(always)]
fn g5(u: u32) -> u32 {
    g(u, 5)
}

#[inline(always)]
fn g13(u: u32) -> u32 {
    g(u, 13)
}

#[inline(always)]
fn g21(u: u32) -> u32 {
    g(u, 21)
}

/// `belt-block` cipher instance with an expanded key.
///
/// Key material is wiped when the instance is dropped.
#[derive(Clone)]
pub struct BeltBlock {
    key: [u32; 8],
}

impl BeltBlock {
    /// Create a cipher instance from a 256-bit key.
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let mut words = [0u32; 8];
        for (word, chunk) in words.iter_mut().zip(key.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self { key: words }
    }

    /// Create a cipher instance from a 128, 192 or 256-bit key.
    ///
    /// Shorter keys are expanded to 256 bits: a 128-bit key is repeated
    /// twice, a 192-bit key `θ1‖…‖θ6` is completed with `θ1⊕θ2⊕θ3` and
    /// `θ4⊕θ5⊕θ6`.
    pub fn new_from_slice(key: &[u8]) -> Result<Self> {
        let mut full = [0u8; KEY_SIZE];
        match key.len() {
            16 => {
                full[..16].copy_from_slice(key);
                full[16..].copy_from_slice(key);
            }
            24 => {
                full[..24].copy_from_slice(key);
                for i in 0..4 {
                    full[24 + i] = key[i] ^ key[4 + i] ^ key[8 + i];
                    full[28 + i] = key[12 + i] ^ key[16 + i] ^ key[20 + i];
                }
            }
            KEY_SIZE => full.copy_from_slice(key),
            _ => return Err(Error),
        }
        let cipher = Self::new(&full);
        full.zeroize();
        Ok(cipher)
    }

    /// Encrypt a single block in place.
    pub fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        let out = self.encrypt_words(load(block));
        store(&out, block);
    }

    /// Decrypt a single block in place.
    pub fn decrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        let out = self.decrypt_words(load(block));
        store(&out, block);
    }

    fn encrypt_words(&self, [mut a, mut b, mut c, mut d]: [u32; 4]) -> [u32; 4] {
        for i in 1..=8u32 {
            let k = |j: u32| self.key[((7 * i - 7 + j) % 8) as usize];
            b ^= g5(a.wrapping_add(k(0)));
            c ^= g21(d.wrapping_add(k(1)));
            a = a.wrapping_sub(g13(b.wrapping_add(k(2))));
            let e = g21(b.wrapping_add(c).wrapping_add(k(3))) ^ i;
            b = b.wrapping_add(e);
            c = c.wrapping_sub(e);
            d = d.wrapping_add(g13(c.wrapping_add(k(4))));
            b ^= g21(a.wrapping_add(k(5)));
            c ^= g5(d.wrapping_add(k(6)));
            core::mem::swap(&mut a, &mut b);
            core::mem::swap(&mut c, &mut d);
            core::mem::swap(&mut b, &mut c);
        }
        [b, d, a, c]
    }

    fn decrypt_words(&self, [mut a, mut b, mut c, mut d]: [u32; 4]) -> [u32; 4] {
        for i in (1..=8u32).rev() {
            let k = |j: u32| self.key[((7 * i - 1 - j) % 8) as usize];
            b ^= g5(a.wrapping_add(k(0)));
            c ^= g21(d.wrapping_add(k(1)));
            a = a.wrapping_sub(g13(b.wrapping_add(k(2))));
            let e = g21(b.wrapping_add(c).wrapping_add(k(3))) ^ i;
            b = b.wrapping_add(e);
            c = c.wrapping_sub(e);
            d = d.wrapping_add(g13(c.wrapping_add(k(4))));
            b ^= g21(a.wrapping_add(k(5)));
            c ^= g5(d.wrapping_add(k(6)));
            core::mem::swap(&mut a, &mut b);
            core::mem::swap(&mut c, &mut d);
            core::mem::swap(&mut a, &mut d);
        }
        [c, a, d, b]
    }
}

impl Drop for BeltBlock {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl ZeroizeOnDrop for BeltBlock {}

impl core::fmt::Debug for BeltBlock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("BeltBlock { ... }")
    }
}

fn load(block: &[u8; BLOCK_SIZE]) -> [u32; 4] {
    let mut words = [0u32; 4];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

fn store(words: &[u32; 4], block: &mut [u8; BLOCK_SIZE]) {
    for (chunk, word) in block.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}
