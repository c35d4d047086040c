//! `$hashlink(|<hashlink>|).<Property>` accessor.

use orb_hashlink::parse_hash_link;

use super::TemplateFunction;
use crate::error::{Result, StateError};

/// Opening token of a hashlink call
pub const HASHLINK_MARKER: &str = "$hashlink(|";

/// Closing token of the hashlink argument
const ARG_CLOSE: &str = "|)";

const PROPERTY_SEPARATOR: char = '.';

/// Property yielding the resource hash of the hashlink
pub const RESOURCE_HASH: &str = "ResourceHash";

const NAME: &str = "hashlink";

/// Decodes a hashlink and returns one of its properties.
///
/// The call must make up the whole expression; surrounding text is not
/// preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashLinkFunction;

impl TemplateFunction for HashLinkFunction {
    fn name(&self) -> &str {
        NAME
    }

    fn marker(&self) -> &str {
        HASHLINK_MARKER
    }

    fn evaluate(&self, expr: &str) -> Result<String> {
        let Some(open) = expr.find(HASHLINK_MARKER) else {
            return Ok(expr.to_string());
        };
        let arg_start = open + HASHLINK_MARKER.len();

        let arg_end = expr[arg_start..]
            .find(ARG_CLOSE)
            .map(|offset| arg_start + offset)
            .ok_or_else(|| StateError::UnterminatedFunction {
                function: NAME.to_string(),
                expr: expr.to_string(),
            })?;

        let hash_link = &expr[arg_start..arg_end];
        let remainder = &expr[arg_end + ARG_CLOSE.len()..];

        let (_, property) = remainder.split_once(PROPERTY_SEPARATOR).ok_or_else(|| {
            StateError::MissingFunctionProperty {
                function: NAME.to_string(),
                expr: expr.to_string(),
            }
        })?;

        match property {
            RESOURCE_HASH => Ok(parse_hash_link(hash_link)?.resource_hash),
            other => Err(StateError::InvalidFunctionProperty {
                function: NAME.to_string(),
                property: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR_HASH: &str = "uEiAs8k26X7CjDiboOyrFueKeGxYeXB-nQl5zBDNik4uYJA";

    #[test]
    fn test_resource_hash_without_metadata() {
        let value = HashLinkFunction
            .evaluate(&format!("$hashlink(|hl:{ANCHOR_HASH}|).ResourceHash"))
            .unwrap();
        assert_eq!(value, ANCHOR_HASH);
    }

    #[test]
    fn test_corrupt_metadata_is_rejected() {
        let hl = format!("hl:{ANCHOR_HASH}:zNotCbor");
        let err = HashLinkFunction
            .evaluate(&format!("$hashlink(|{hl}|).ResourceHash"))
            .unwrap_err();
        assert!(matches!(
            err,
            StateError::HashLink(orb_hashlink::HashLinkError::UnsupportedEncoding(ref enc)) if enc == "z"
        ));
        assert_eq!(
            err.to_string(),
            parse_hash_link(&hl).unwrap_err().to_string()
        );
    }

    #[test]
    fn test_resource_hash_of_created_hash_link() {
        let hl = orb_hashlink::create_hash_link(b"anchor", &["https://orb.domain1.com/cas".to_string()])
            .unwrap();
        let value = HashLinkFunction
            .evaluate(&format!("$hashlink(|{hl}|).ResourceHash"))
            .unwrap();
        assert_eq!(value, orb_hashlink::create_resource_hash(b"anchor"));
    }

    #[test]
    fn test_unknown_property_is_named() {
        let err = HashLinkFunction
            .evaluate("$hashlink(|hl:abc|).Unknown")
            .unwrap_err();
        assert!(matches!(
            err,
            StateError::InvalidFunctionProperty { ref property, .. } if property == "Unknown"
        ));
        assert!(err.to_string().contains("Unknown"));
    }

    #[test]
    fn test_missing_property_separator() {
        let err = HashLinkFunction.evaluate("$hashlink(|hl:abc|)").unwrap_err();
        assert!(err.to_string().contains("no hashlink property specified"));
    }

    #[test]
    fn test_missing_argument_close() {
        let err = HashLinkFunction
            .evaluate("$hashlink(|hl:abc.ResourceHash")
            .unwrap_err();
        assert!(matches!(err, StateError::UnterminatedFunction { .. }));
    }

    #[test]
    fn test_invalid_hashlink_bubbles_up() {
        let err = HashLinkFunction
            .evaluate("$hashlink(|nothl|).ResourceHash")
            .unwrap_err();
        assert!(matches!(err, StateError::HashLink(_)));
    }
}
