use sketchly_be::auth::{decode_token, generate_token};

#[test]
fn test_token_round_trip() {
    let token = generate_token("user-42", "test-secret").unwrap();
    let claims = decode_token(&token, "test-secret").unwrap();
    assert_eq!(claims.sub, "user-42");
}

#[test]
fn test_wrong_secret_rejected() {
    let token = generate_token("user-42", "test-secret").unwrap();
    assert!(decode_token(&token, "other-secret").is_err());
}

#[test]
fn test_garbage_token_rejected() {
    assert!(decode_token("not-a-jwt", "test-secret").is_err());
}
