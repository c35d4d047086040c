//! Compatibility tests against hashlinks in the shape Orb emits.

use orb_hashlink::{
    create_hash_link, create_resource_hash, parse_hash_link, verify_hash_link, HashLinkError,
};

#[test]
fn test_resource_hash_of_known_content() {
    // sha256("hello") = 2cf24dba...; multihash 1220 + digest, base64url
    assert_eq!(
        create_resource_hash(b"hello"),
        "uEiAs8k26X7CjDiboOyrFueKeGxYeXB-nQl5zBDNik4uYJA"
    );
}

#[test]
fn test_parse_returns_resource_hash_verbatim() {
    // The resource hash is not decoded during parsing
    let info = parse_hash_link("hl:not-a-real-multihash").unwrap();
    assert_eq!(info.resource_hash, "not-a-real-multihash");
}

#[test]
fn test_parse_surfaces_metadata_errors() {
    let err = parse_hash_link("hl:uEiAabc:zBadEncoding").unwrap_err();
    assert!(matches!(err, HashLinkError::UnsupportedEncoding(_)));
}

#[test]
fn test_created_hash_link_verifies_and_serializes() {
    let links = vec![
        "https://orb.domain1.com/cas/one".to_string(),
        "https://orb.domain2.com/cas/one".to_string(),
    ];
    let hl = create_hash_link(br#"{"anchor":"content"}"#, &links).unwrap();
    assert_eq!(hl.matches(':').count(), 2);

    verify_hash_link(&hl, br#"{"anchor":"content"}"#).unwrap();

    let info = parse_hash_link(&hl).unwrap();
    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["links"][1], "https://orb.domain2.com/cas/one");
}
