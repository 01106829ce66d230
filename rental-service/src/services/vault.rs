//! PII vault: AES-256-GCM envelope encryption and masking for Aadhaar
//! numbers.
//!
//! The envelope layout is hex(nonce || ciphertext || tag) with a 96-bit
//! random nonce, so encrypting the same number twice never yields the same
//! envelope. The masked display string is derived from the plaintext alone,
//! never from the ciphertext.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use thiserror::Error;

use service_core::error::AppError;

/// Aadhaar numbers are exactly 12 digits.
pub const AADHAAR_LENGTH: usize = 12;

const KEY_LENGTH: usize = 32;
const NONCE_LENGTH: usize = 12;
const TAG_LENGTH: usize = 16;
const FULLY_MASKED: &str = "XXXX XXXX XXXX";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VaultError {
    #[error("Aadhaar number must be exactly 12 digits")]
    InvalidFormat,

    #[error("Failed to encrypt Aadhaar number")]
    EncryptionFailed,

    /// Tampered ciphertext, wrong key, or a corrupted envelope. Total
    /// failure: no partial plaintext is ever surfaced.
    #[error("Failed to decrypt Aadhaar envelope")]
    DecryptionFailed,

    #[error("Encryption key must be a 64-character hex string (32 bytes)")]
    InvalidKey,
}

impl From<VaultError> for AppError {
    fn from(err: VaultError) -> Self {
        match &err {
            VaultError::InvalidFormat => AppError::BadRequest(anyhow::Error::new(err)),
            VaultError::InvalidKey => AppError::ConfigError(anyhow::Error::new(err)),
            _ => AppError::InternalError(anyhow::Error::new(err)),
        }
    }
}

/// Decode a 64-character hex key string into raw AES-256 key material.
pub fn decode_key(hex_key: &str) -> Result<[u8; KEY_LENGTH], VaultError> {
    let bytes = hex::decode(hex_key).map_err(|_| VaultError::InvalidKey)?;
    let key: [u8; KEY_LENGTH] = bytes.try_into().map_err(|_| VaultError::InvalidKey)?;
    Ok(key)
}

/// Format predicate: exactly 12 ASCII digits.
pub fn is_valid_aadhaar(value: &str) -> bool {
    value.len() == AADHAAR_LENGTH && value.bytes().all(|b| b.is_ascii_digit())
}

/// Masked display form: placeholder prefix plus the last 4 digits, e.g.
/// "XXXX XXXX 1234". Anything that is not a well-formed 12-digit number
/// masks completely rather than leaking a partial value.
pub fn mask(plaintext: &str) -> String {
    if !is_valid_aadhaar(plaintext) {
        return FULLY_MASKED.to_string();
    }
    format!("XXXX XXXX {}", &plaintext[AADHAAR_LENGTH - 4..])
}

/// Reversible encryption for the Aadhaar field.
///
/// Holds the process-wide key, injected at construction from configuration.
pub struct PiiVault {
    cipher: Aes256Gcm,
}

impl PiiVault {
    pub fn new(key: &[u8; KEY_LENGTH]) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)),
        }
    }

    pub fn from_hex_key(hex_key: &str) -> Result<Self, VaultError> {
        Ok(Self::new(&decode_key(hex_key)?))
    }

    /// Encrypt a validated Aadhaar number into an opaque storage envelope.
    ///
    /// A fresh random nonce is drawn per call; two encryptions of the same
    /// number produce different envelopes, so equality of stored values
    /// leaks nothing.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, VaultError> {
        if !is_valid_aadhaar(plaintext) {
            return Err(VaultError::InvalidFormat);
        }

        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| VaultError::EncryptionFailed)?;

        let mut envelope = nonce_bytes.to_vec();
        envelope.extend_from_slice(&ciphertext);
        Ok(hex::encode(envelope))
    }

    /// Decrypt a storage envelope back to the Aadhaar number.
    ///
    /// Any deviation from the expected layout, or a failed authentication
    /// tag, is a hard `DecryptionFailed`.
    pub fn decrypt(&self, envelope: &str) -> Result<String, VaultError> {
        let bytes = hex::decode(envelope).map_err(|_| VaultError::DecryptionFailed)?;
        if bytes.len() < NONCE_LENGTH + TAG_LENGTH {
            return Err(VaultError::DecryptionFailed);
        }

        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LENGTH);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| VaultError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|_| VaultError::DecryptionFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_vault() -> PiiVault {
        PiiVault::new(&[0x42; KEY_LENGTH])
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let vault = test_vault();
        let envelope = vault.encrypt("234567890123").unwrap();
        assert_eq!(vault.decrypt(&envelope).unwrap(), "234567890123");
    }

    #[test]
    fn envelopes_are_never_repeated() {
        let vault = test_vault();
        let first = vault.encrypt("234567890123").unwrap();
        let second = vault.encrypt("234567890123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn encrypt_rejects_malformed_numbers() {
        let vault = test_vault();
        assert_eq!(vault.encrypt("123").unwrap_err(), VaultError::InvalidFormat);
        assert_eq!(
            vault.encrypt("12345678901a").unwrap_err(),
            VaultError::InvalidFormat
        );
        assert_eq!(
            vault.encrypt("1234567890123").unwrap_err(),
            VaultError::InvalidFormat
        );
    }

    #[test]
    fn tampered_envelope_fails_hard() {
        let vault = test_vault();
        let envelope = vault.encrypt("234567890123").unwrap();

        // Flip one bit inside the ciphertext portion.
        let mut bytes = hex::decode(&envelope).unwrap();
        bytes[NONCE_LENGTH + 2] ^= 0x01;
        let tampered = hex::encode(bytes);

        assert_eq!(
            vault.decrypt(&tampered).unwrap_err(),
            VaultError::DecryptionFailed
        );
    }

    #[test]
    fn wrong_key_fails_decrypt() {
        let envelope = test_vault().encrypt("234567890123").unwrap();
        let other = PiiVault::new(&[0x43; KEY_LENGTH]);
        assert_eq!(
            other.decrypt(&envelope).unwrap_err(),
            VaultError::DecryptionFailed
        );
    }

    #[test]
    fn truncated_envelope_fails_decrypt() {
        let vault = test_vault();
        assert_eq!(vault.decrypt("abcd").unwrap_err(), VaultError::DecryptionFailed);
        assert_eq!(
            vault.decrypt("not hex at all").unwrap_err(),
            VaultError::DecryptionFailed
        );
    }

    #[test]
    fn mask_keeps_only_last_four_digits() {
        assert_eq!(mask("234567890123"), "XXXX XXXX 0123");
    }

    #[test]
    fn mask_never_discloses_partial_values() {
        assert_eq!(mask("123"), "XXXX XXXX XXXX");
        assert_eq!(mask(""), "XXXX XXXX XXXX");
        assert_eq!(mask("12345678901a"), "XXXX XXXX XXXX");
    }

    #[test]
    fn format_predicate() {
        assert!(is_valid_aadhaar("234567890123"));
        assert!(!is_valid_aadhaar("23456789012"));
        assert!(!is_valid_aadhaar("2345678901234"));
        assert!(!is_valid_aadhaar("23456789012x"));
    }

    #[test]
    fn decode_key_enforces_length() {
        assert!(decode_key(&"ab".repeat(32)).is_ok());
        assert_eq!(decode_key("abcd").unwrap_err(), VaultError::InvalidKey);
        assert_eq!(
            decode_key(&"zz".repeat(32)).unwrap_err(),
            VaultError::InvalidKey
        );
    }
}
