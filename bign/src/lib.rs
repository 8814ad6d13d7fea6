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

extern crate alloc;

pub mod dsa;
pub mod oid;

mod arithmetic;
mod encoding;
mod error;
mod params;
mod private_key;
mod public_key;
mod store;

pub use crate::{
    encoding::{from_hex, from_hex_array, to_hex},
    error::{Error, Result},
    oid::ObjectIdentifier,
    params::{Parameters, SEED_SIZE},
    private_key::{KeyPair, PrivateKey},
    public_key::{PublicKey, derive_public_key},
    store::{ParamStore, load_standard},
};
pub use belt::{self, BeltHash, Hash, belt_hash};
pub use rand_core;
