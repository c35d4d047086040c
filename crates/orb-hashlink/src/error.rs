//! Error types for orb-hashlink

use thiserror::Error;

/// Errors that can occur while parsing, creating or verifying hashlinks
#[derive(Error, Debug)]
pub enum HashLinkError {
    /// Input does not start with `hl:`
    #[error("hashlink '{0}' must start with 'hl:' prefix")]
    MissingPrefix(String),

    /// Wrong number of `:`-separated parts
    #[error("hashlink '{hashlink}' must have 2 or 3 parts, got {parts}")]
    InvalidPartCount { hashlink: String, parts: usize },

    /// The resource hash part is empty
    #[error("resource hash is empty in hashlink '{0}'")]
    EmptyResourceHash(String),

    /// Multibase prefix is not supported
    #[error("unsupported multibase encoding '{0}'")]
    UnsupportedEncoding(String),

    /// Multibase payload is not valid base64url
    #[error("invalid base64url payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Multihash code or length is not sha2-256
    #[error("unsupported multihash: code 0x{code:02x}, length {length}")]
    UnsupportedMultihash { code: u8, length: usize },

    /// Metadata is not a CBOR map of links
    #[error("invalid hashlink metadata: {0}")]
    InvalidMetadata(String),

    /// CBOR encoding failed
    #[error("CBOR encoding failed: {0}")]
    Cbor(String),

    /// Content does not hash to the resource hash
    #[error("resource hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },
}
