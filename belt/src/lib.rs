#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

mod block;
mod hash;
mod wbl;

pub use crate::{
    block::BeltBlock,
    hash::{BeltHash, Hash, belt_hash},
    wbl::BeltWbl,
};
pub use digest;

use core::fmt;

/// Size of a `belt-block` block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Size of a `belt` key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of a `belt-hash` output in bytes.
pub const HASH_SIZE: usize = 32;

/// Error type.
///
/// Returned when a buffer or key has a length the primitive cannot process.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Error;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("belt: invalid buffer or key length")
    }
}

impl core::error::Error for Error {}

/// Result type with the `belt` crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
