//! PII vault integration tests through the public library API.

use rental_service::services::vault::{decode_key, is_valid_aadhaar, mask, PiiVault, VaultError};

const TEST_KEY: [u8; 32] = [0x7a; 32];

fn vault() -> PiiVault {
    PiiVault::new(&TEST_KEY)
}

#[test]
fn stored_envelope_round_trips_to_the_original_number() {
    let v = vault();
    let envelope = v.encrypt("234567890123").expect("encrypts");

    // Envelope is opaque hex, long enough to hold nonce + ciphertext + tag.
    assert!(envelope.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(envelope.len() >= 2 * (12 + 12 + 16));

    assert_eq!(v.decrypt(&envelope).expect("decrypts"), "234567890123");
}

#[test]
fn same_number_never_produces_the_same_envelope() {
    let v = vault();
    let a = v.encrypt("234567890123").expect("encrypts");
    let b = v.encrypt("234567890123").expect("encrypts");
    assert_ne!(a, b);
    assert_eq!(v.decrypt(&a).expect("decrypts"), v.decrypt(&b).expect("decrypts"));
}

#[test]
fn vault_built_from_hex_key_matches_raw_key() {
    let hex_key = "7a".repeat(32);
    let from_hex = PiiVault::from_hex_key(&hex_key).expect("valid key");
    let envelope = from_hex.encrypt("234567890123").expect("encrypts");
    assert_eq!(vault().decrypt(&envelope).expect("decrypts"), "234567890123");
}

#[test]
fn malformed_numbers_never_reach_the_cipher() {
    let v = vault();
    for bad in ["", "123", "12345678901", "1234567890123", "12345678901x", "1234 5678 9012"] {
        assert_eq!(v.encrypt(bad), Err(VaultError::InvalidFormat), "input: {bad:?}");
    }
}

#[test]
fn decryption_failures_are_total() {
    let v = vault();
    let envelope = v.encrypt("234567890123").expect("encrypts");

    // Tampering anywhere in the envelope voids the whole value.
    let mut bytes = hex::decode(&envelope).expect("hex");
    let last = bytes.len() - 1;
    bytes[last] ^= 0x80;
    assert_eq!(v.decrypt(&hex::encode(bytes)), Err(VaultError::DecryptionFailed));

    // So does a key mismatch.
    let other = PiiVault::new(&[0x7b; 32]);
    assert_eq!(other.decrypt(&envelope), Err(VaultError::DecryptionFailed));

    // And garbage input.
    assert_eq!(v.decrypt("deadbeef"), Err(VaultError::DecryptionFailed));
    assert_eq!(v.decrypt("not-hex"), Err(VaultError::DecryptionFailed));
}

#[test]
fn mask_shows_only_the_last_four_digits() {
    assert_eq!(mask("234567890123"), "XXXX XXXX 0123");
    assert_eq!(mask("999988887777"), "XXXX XXXX 7777");
}

#[test]
fn mask_is_fail_safe_on_unexpected_input() {
    assert_eq!(mask(""), "XXXX XXXX XXXX");
    assert_eq!(mask("1234"), "XXXX XXXX XXXX");
    assert_eq!(mask("12345678901x"), "XXXX XXXX XXXX");
}

#[test]
fn format_predicate_requires_exactly_twelve_digits() {
    assert!(is_valid_aadhaar("234567890123"));
    assert!(!is_valid_aadhaar("23456789012"));
    assert!(!is_valid_aadhaar("2345678901234"));
    assert!(!is_valid_aadhaar("2345678901a3"));
}

#[test]
fn keys_must_be_sixty_four_hex_characters() {
    assert!(decode_key(&"ab".repeat(32)).is_ok());
    assert_eq!(decode_key(""), Err(VaultError::InvalidKey));
    assert_eq!(decode_key(&"ab".repeat(16)), Err(VaultError::InvalidKey));
    assert_eq!(decode_key(&"zz".repeat(32)), Err(VaultError::InvalidKey));
}
