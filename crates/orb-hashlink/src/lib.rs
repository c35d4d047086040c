//! Orb-Hashlink: `hl:` content-addressed references
//!
//! A hashlink identifies an immutable resource by the multihash of its
//! content and optionally lists where the resource can be fetched:
//!
//! ```text
//! hl:<resource-hash>[:<metadata>]
//! ```
//!
//! The BDD harness uses this crate to evaluate
//! `$hashlink(|...|).ResourceHash` expressions and to check anchor
//! content returned by CAS endpoints.

pub mod error;
pub mod metadata;
pub mod multibase;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::HashLinkError;

/// Result type for hashlink operations
pub type Result<T> = std::result::Result<T, HashLinkError>;

/// Hashlink scheme prefix
pub const HL_PREFIX: &str = "hl:";

const SEPARATOR: char = ':';

/// Parsed form of a hashlink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashLinkInfo {
    /// Multibase-encoded multihash of the resource content
    pub resource_hash: String,
    /// Locations of the resource, from the metadata part
    pub links: Vec<String>,
}

impl HashLinkInfo {
    /// Hex encoding of the raw sha2-256 digest
    pub fn digest_hex(&self) -> Result<String> {
        Ok(hex::encode(decode_resource_hash(&self.resource_hash)?))
    }
}

impl std::fmt::Display for HashLinkInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", HL_PREFIX, self.resource_hash)?;
        if !self.links.is_empty() {
            let metadata = metadata::encode_links(&self.links).map_err(|_| std::fmt::Error)?;
            write!(f, "{}{}", SEPARATOR, metadata)?;
        }
        Ok(())
    }
}

/// Parse a hashlink into its resource hash and links
///
/// # TDD: test_parse_hash_link_with_metadata
pub fn parse_hash_link(hash_link: &str) -> Result<HashLinkInfo> {
    let (resource_hash, meta) = split_hash_link(hash_link)?;

    let links = match meta {
        Some(meta) if !meta.is_empty() => metadata::decode_links(meta)?,
        _ => Vec::new(),
    };

    debug!(resource_hash = %resource_hash, links = links.len(), "Parsed hashlink");

    Ok(HashLinkInfo {
        resource_hash: resource_hash.to_string(),
        links,
    })
}

/// Validate the `hl:` structure and split out the hash and metadata parts
fn split_hash_link(hash_link: &str) -> Result<(&str, Option<&str>)> {
    if !hash_link.starts_with(HL_PREFIX) {
        return Err(HashLinkError::MissingPrefix(hash_link.to_string()));
    }

    let parts: Vec<&str> = hash_link.split(SEPARATOR).collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(HashLinkError::InvalidPartCount {
            hashlink: hash_link.to_string(),
            parts: parts.len(),
        });
    }

    let resource_hash = parts[1];
    if resource_hash.is_empty() {
        return Err(HashLinkError::EmptyResourceHash(hash_link.to_string()));
    }

    Ok((resource_hash, parts.get(2).copied()))
}

/// Compute the multibase-encoded sha2-256 multihash of `content`
pub fn create_resource_hash(content: &[u8]) -> String {
    multibase::encode(&multibase::sha256_multihash(content))
}

/// Encode links as hashlink metadata
pub fn create_metadata(links: &[String]) -> Result<String> {
    metadata::encode_links(links)
}

/// Build a hashlink for `content`, with metadata only when `links` is non-empty
pub fn create_hash_link(content: &[u8], links: &[String]) -> Result<String> {
    let resource_hash = create_resource_hash(content);
    if links.is_empty() {
        return Ok(format!("{HL_PREFIX}{resource_hash}"));
    }

    let metadata = create_metadata(links)?;
    Ok(format!("{HL_PREFIX}{resource_hash}{SEPARATOR}{metadata}"))
}

/// Decode a resource hash into the raw sha2-256 digest
pub fn decode_resource_hash(resource_hash: &str) -> Result<Vec<u8>> {
    let multihash = multibase::decode(resource_hash)?;
    multibase::sha256_digest(&multihash)
}

/// Check that `content` hashes to the resource hash of `hash_link`
pub fn verify_hash_link(hash_link: &str, content: &[u8]) -> Result<()> {
    let info = parse_hash_link(hash_link)?;
    let expected = decode_resource_hash(&info.resource_hash)?;
    let actual = multibase::sha256_digest(&multibase::sha256_multihash(content))?;

    if expected != actual {
        return Err(HashLinkError::HashMismatch {
            expected: info.resource_hash,
            actual: create_resource_hash(content),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hash_link_without_metadata() {
        let info = parse_hash_link("hl:abc").unwrap();
        assert_eq!(info.resource_hash, "abc");
        assert!(info.links.is_empty());
    }

    #[test]
    fn test_parse_hash_link_with_metadata() {
        let links = vec!["https://orb.domain1.com/cas/x".to_string()];
        let hl = create_hash_link(b"anchor", &links).unwrap();

        let info = parse_hash_link(&hl).unwrap();
        assert_eq!(info.resource_hash, create_resource_hash(b"anchor"));
        assert_eq!(info.links, links);
    }

    #[test]
    fn test_parse_hash_link_requires_prefix() {
        let err = parse_hash_link("abc:def").unwrap_err();
        assert!(matches!(err, HashLinkError::MissingPrefix(_)));
    }

    #[test]
    fn test_parse_hash_link_rejects_too_many_parts() {
        let err = parse_hash_link("hl:a:b:c").unwrap_err();
        assert!(matches!(err, HashLinkError::InvalidPartCount { parts: 4, .. }));
    }

    #[test]
    fn test_parse_hash_link_rejects_empty_hash() {
        let err = parse_hash_link("hl:").unwrap_err();
        assert!(matches!(err, HashLinkError::EmptyResourceHash(_)));
    }

    #[test]
    fn test_parse_hash_link_rejects_corrupt_metadata() {
        let err = parse_hash_link("hl:abc:zNotCbor").unwrap_err();
        assert!(matches!(err, HashLinkError::UnsupportedEncoding(ref enc) if enc == "z"));
    }

    #[test]
    fn test_display_round_trips_hash_link() {
        let hl = create_hash_link(b"x", &["https://a.example/cas".to_string()]).unwrap();
        assert_eq!(parse_hash_link(&hl).unwrap().to_string(), hl);
    }

    #[test]
    fn test_digest_hex_is_sha256_hex() {
        let info = parse_hash_link(&create_hash_link(b"", &[]).unwrap()).unwrap();
        assert_eq!(
            info.digest_hex().unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_verify_detects_tampered_content() {
        let hl = create_hash_link(b"original", &[]).unwrap();
        assert!(verify_hash_link(&hl, b"original").is_ok());

        let err = verify_hash_link(&hl, b"tampered").unwrap_err();
        assert!(matches!(err, HashLinkError::HashMismatch { .. }));
    }
}
