//! Error types.

use core::fmt;

/// Result type with the `bign` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// No parameter set is registered under the requested object identifier.
    UnknownParameterSet,

    /// Object identifier string is not a valid dotted sequence of arcs.
    MalformedOid,

    /// DER input has the wrong tag, a bad length or non-canonical content.
    InvalidDerEncoding,

    /// Private key is zero or not below the group order.
    InvalidPrivateKey,

    /// Public key does not encode a point on the curve.
    InvalidPublicKey,

    /// Domain parameters are inconsistent.
    InvalidParameters,

    /// Input is not a hexadecimal string.
    InvalidHex,

    /// Buffer length does not match the size implied by the parameters or
    /// digest variant.
    SizeMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::UnknownParameterSet => "unknown parameter set",
            Error::MalformedOid => "malformed object identifier",
            Error::InvalidDerEncoding => "invalid DER encoding",
            Error::InvalidPrivateKey => "invalid private key",
            Error::InvalidPublicKey => "invalid public key",
            Error::InvalidParameters => "invalid domain parameters",
            Error::InvalidHex => "invalid hexadecimal string",
            Error::SizeMismatch => "buffer size mismatch",
        })
    }
}

impl core::error::Error for Error {}

impl From<der::Error> for Error {
    fn from(_: der::Error) -> Error {
        Error::InvalidDerEncoding
    }
}

impl From<belt::Error> for Error {
    fn from(_: belt::Error) -> Error {
        Error::SizeMismatch
    }
}

impl From<hex::FromHexError> for Error {
    fn from(_: hex::FromHexError) -> Error {
        Error::InvalidHex
    }
}

impl From<Error> for signature::Error {
    fn from(_: Error) -> signature::Error {
        signature::Error::new()
    }
}
