//! Multibase and multihash encoding
//!
//! Only the encodings produced by Orb are supported: base64url without
//! padding (multibase prefix `u`) wrapping a sha2-256 multihash.

use crate::error::HashLinkError;
use crate::Result;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

/// Multibase prefix for base64url (no padding)
pub const BASE64_URL_PREFIX: char = 'u';

/// Multihash code for sha2-256
pub const SHA2_256_CODE: u8 = 0x12;

/// Digest length of sha2-256 in bytes
pub const SHA2_256_LENGTH: u8 = 0x20;

/// Encode bytes as a base64url multibase string
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(1 + bytes.len() * 4 / 3 + 1);
    out.push(BASE64_URL_PREFIX);
    out.push_str(&URL_SAFE_NO_PAD.encode(bytes));
    out
}

/// Decode a multibase string
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    let mut chars = encoded.chars();
    match chars.next() {
        Some(BASE64_URL_PREFIX) => Ok(URL_SAFE_NO_PAD.decode(chars.as_str())?),
        Some(other) => Err(HashLinkError::UnsupportedEncoding(other.to_string())),
        None => Err(HashLinkError::UnsupportedEncoding(String::new())),
    }
}

/// Wrap a sha2-256 digest of `content` in a multihash
pub fn sha256_multihash(content: &[u8]) -> Vec<u8> {
    let digest = Sha256::digest(content);
    let mut multihash = Vec::with_capacity(2 + digest.len());
    multihash.push(SHA2_256_CODE);
    multihash.push(SHA2_256_LENGTH);
    multihash.extend_from_slice(&digest);
    multihash
}

/// Strip the multihash header, returning the raw sha2-256 digest
pub fn sha256_digest(multihash: &[u8]) -> Result<Vec<u8>> {
    match multihash {
        [SHA2_256_CODE, SHA2_256_LENGTH, digest @ ..] if digest.len() == SHA2_256_LENGTH as usize => {
            Ok(digest.to_vec())
        }
        [code, ..] => Err(HashLinkError::UnsupportedMultihash {
            code: *code,
            length: multihash.len().saturating_sub(2),
        }),
        [] => Err(HashLinkError::UnsupportedMultihash { code: 0, length: 0 }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_multihash_header() {
        let mh = sha256_multihash(b"hello");
        assert_eq!(mh.len(), 34);
        assert_eq!(mh[0], SHA2_256_CODE);
        assert_eq!(mh[1], SHA2_256_LENGTH);
    }

    #[test]
    fn test_encoded_multihash_starts_with_orb_prefix() {
        // 0x12 0x20 always encodes to "EiA" / "EiB" / ... in base64url
        let encoded = encode(&sha256_multihash(b"content"));
        assert!(encoded.starts_with("uEi"), "got {encoded}");
    }

    #[test]
    fn test_decode_rejects_unknown_prefix() {
        let err = decode("zQmSomething").unwrap_err();
        assert!(matches!(err, HashLinkError::UnsupportedEncoding(ref p) if p == "z"));
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        assert!(decode("").is_err());
    }

    #[test]
    fn test_sha256_digest_rejects_wrong_code() {
        let err = sha256_digest(&[0x11, 0x14, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, HashLinkError::UnsupportedMultihash { code: 0x11, .. }));
    }

    #[test]
    fn test_sha256_digest_rejects_truncated_digest() {
        let mut mh = sha256_multihash(b"abc");
        mh.truncate(10);
        assert!(sha256_digest(&mh).is_err());
    }
}
