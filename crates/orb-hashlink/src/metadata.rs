//! Hashlink metadata
//!
//! Metadata is a multibase-encoded CBOR map. Key `15` holds the list of
//! URLs where the linked resource can be fetched.

use crate::error::HashLinkError;
use crate::multibase;
use crate::Result;
use ciborium::value::{Integer, Value};

/// CBOR map key holding the resource URLs
pub const URL_KEY: u8 = 0x0f;

/// Encode a list of links as hashlink metadata
pub fn encode_links(links: &[String]) -> Result<String> {
    let urls = links.iter().cloned().map(Value::Text).collect();
    let map = Value::Map(vec![(Value::Integer(Integer::from(URL_KEY)), Value::Array(urls))]);

    let mut bytes = Vec::new();
    ciborium::into_writer(&map, &mut bytes).map_err(|e| HashLinkError::Cbor(e.to_string()))?;

    Ok(multibase::encode(&bytes))
}

/// Decode the list of links from hashlink metadata
pub fn decode_links(metadata: &str) -> Result<Vec<String>> {
    let bytes = multibase::decode(metadata)?;
    let value: Value = ciborium::from_reader(bytes.as_slice())
        .map_err(|e| HashLinkError::InvalidMetadata(e.to_string()))?;

    let Value::Map(entries) = value else {
        return Err(HashLinkError::InvalidMetadata(
            "metadata is not a CBOR map".to_string(),
        ));
    };

    let mut links = Vec::new();
    for (key, value) in entries {
        if !is_url_key(&key) {
            continue;
        }
        let Value::Array(items) = value else {
            return Err(HashLinkError::InvalidMetadata(
                "url entry is not an array".to_string(),
            ));
        };
        for item in items {
            match item {
                Value::Text(url) => links.push(url),
                other => {
                    return Err(HashLinkError::InvalidMetadata(format!(
                        "url entry contains non-text value: {other:?}"
                    )))
                }
            }
        }
    }

    Ok(links)
}

fn is_url_key(key: &Value) -> bool {
    matches!(key, Value::Integer(i) if *i == Integer::from(URL_KEY))
}
