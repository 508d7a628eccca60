//! AES-256-CBC encryption and decryption
//!
//! Produces the OpenSSL "salted" envelope used by password-based AES:
//! - 8-byte ASCII magic `Salted__`
//! - 8 random salt bytes
//! - AES-256-CBC ciphertext with PKCS7 padding
//!
//! The whole envelope is base64 encoded, so the output is a self-contained
//! text blob. Key and IV come from [`derive_key_iv`].
//!
//! CBC without a MAC is not authenticated: a wrong key is detected through
//! bad padding most of the time, but not always. Callers that parse the
//! plaintext must treat parse failures as a second line of detection.

use aes::Aes256;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use block_padding::Pkcs7;
use cbc::cipher::{BlockModeDecrypt, BlockModeEncrypt, KeyIvInit};
use cbc::{Decryptor, Encryptor};

use super::kdf::derive_key_iv;

/// Envelope magic prefix
pub(crate) const SALTED_MAGIC: &[u8; 8] = b"Salted__";

/// Salt size in bytes
pub(crate) const SALT_LENGTH: usize = 8;

/// AES block size
const BLOCK_SIZE: usize = 16;

/// Header length: magic + salt
const HEADER_LENGTH: usize = SALTED_MAGIC.len() + SALT_LENGTH;

type Aes256CbcEnc = Encryptor<Aes256>;
type Aes256CbcDec = Decryptor<Aes256>;

/// Encrypt `plaintext` with a passphrase and a fresh random salt
///
/// # Returns
///
/// Base64 envelope on success, or error message on failure
pub fn encrypt(plaintext: &[u8], passphrase: &str) -> Result<String, String> {
    let salt: [u8; SALT_LENGTH] = rand::random();
    encrypt_with_salt(plaintext, passphrase, &salt)
}

/// Encrypt with a caller-supplied salt
pub(crate) fn encrypt_with_salt(
    plaintext: &[u8],
    passphrase: &str,
    salt: &[u8; SALT_LENGTH],
) -> Result<String, String> {
    if passphrase.is_empty() {
        return Err("Empty passphrase".to_string());
    }

    let derived = derive_key_iv(passphrase.as_bytes(), salt);

    // PKCS7 always adds at least one byte
    let padded_len = ((plaintext.len() / BLOCK_SIZE) + 1) * BLOCK_SIZE;
    let mut buffer = vec![0u8; padded_len];
    buffer[..plaintext.len()].copy_from_slice(plaintext);

    let encryptor = Aes256CbcEnc::new(&derived.key.into(), &derived.iv.into());
    let ciphertext = encryptor
        .encrypt_padded::<Pkcs7>(&mut buffer, plaintext.len())
        .map_err(|e| format!("Encryption failed: {:?}", e))?;

    let mut envelope = Vec::with_capacity(HEADER_LENGTH + ciphertext.len());
    envelope.extend_from_slice(SALTED_MAGIC);
    envelope.extend_from_slice(salt);
    envelope.extend_from_slice(ciphertext);

    Ok(STANDARD.encode(envelope))
}

/// Decrypt a base64 envelope produced by [`encrypt`] (or `openssl enc`)
///
/// # Returns
///
/// Decrypted bytes on success, or error message on failure
pub fn decrypt(envelope: &str, passphrase: &str) -> Result<Vec<u8>, String> {
    let raw = STANDARD
        .decode(envelope.trim())
        .map_err(|e| format!("Invalid base64: {}", e))?;

    if raw.len() < HEADER_LENGTH {
        return Err("Ciphertext too short".to_string());
    }

    let (header, body) = raw.split_at(HEADER_LENGTH);
    let (magic, salt) = header.split_at(SALTED_MAGIC.len());

    if magic != SALTED_MAGIC {
        return Err("Missing salt header".to_string());
    }
    if body.is_empty() || body.len() % BLOCK_SIZE != 0 {
        return Err(format!("Invalid ciphertext length: {}", body.len()));
    }

    let derived = derive_key_iv(passphrase.as_bytes(), salt);

    let mut buffer = body.to_vec();
    let decryptor = Aes256CbcDec::new(&derived.key.into(), &derived.iv.into());
    let plaintext = decryptor
        .decrypt_padded::<Pkcs7>(&mut buffer)
        .map_err(|e| format!("Decryption failed: {:?}", e))?;

    Ok(plaintext.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VECTOR_SALT: [u8; SALT_LENGTH] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    /// Produced by `openssl enc -aes-256-cbc -md md5 -S 0102030405060708 -pass pass:holistic-secret`
    const VECTOR_ENVELOPE: &str = "U2FsdGVkX18BAgMEBQYHCKgkxY960zwPjzxdW5AC/bL2nKAAfpz6UGUAFhkEtzUE";

    #[test]
    fn test_encrypt_vector() {
        let result = encrypt_with_salt(br#"{"name":"Alice"}"#, "holistic-secret", &VECTOR_SALT).unwrap();
        assert_eq!(result, VECTOR_ENVELOPE);
    }

    #[test]
    fn test_decrypt_vector() {
        let result = decrypt(VECTOR_ENVELOPE, "holistic-secret").unwrap();
        assert_eq!(result, br#"{"name":"Alice"}"#.to_vec());
    }

    /// Random-salt envelope from `openssl enc -aes-256-cbc -md md5 -pass pass:k -base64`
    #[test]
    fn test_decrypt_openssl_random_salt() {
        let result = decrypt("U2FsdGVkX18OLvyA9JyXxlTFiPinwm4CFIRy6tE8+gM=", "k").unwrap();
        assert_eq!(result, b"[1,2,3]".to_vec());
    }

    #[test]
    fn test_envelope_starts_with_salted_magic() {
        let envelope = encrypt(b"payload", "secret").unwrap();
        // base64("Salted__")
        assert!(envelope.starts_with("U2FsdGVkX1"));
    }

    #[test]
    fn test_fresh_salt_per_call() {
        let a = encrypt(b"same input", "secret").unwrap();
        let b = encrypt(b"same input", "secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_encrypt_decrypt_empty() {
        let envelope = encrypt(b"", "secret").unwrap();
        assert_eq!(decrypt(&envelope, "secret").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        assert!(encrypt(b"data", "").is_err());
    }

    #[test]
    fn test_decrypt_invalid_base64() {
        let err = decrypt("not base64 at all!", "secret").unwrap_err();
        assert!(err.contains("base64"));
    }

    #[test]
    fn test_decrypt_missing_header() {
        let envelope = STANDARD.encode([0u8; 32]);
        let err = decrypt(&envelope, "secret").unwrap_err();
        assert!(err.contains("header"));
    }

    #[test]
    fn test_decrypt_truncated() {
        let raw = STANDARD.decode(VECTOR_ENVELOPE).unwrap();
        let truncated = STANDARD.encode(&raw[..raw.len() - 5]);
        assert!(decrypt(&truncated, "holistic-secret").is_err());

        let header_only = STANDARD.encode(&raw[..HEADER_LENGTH]);
        assert!(decrypt(&header_only, "holistic-secret").is_err());

        let too_short = STANDARD.encode(&raw[..4]);
        assert!(decrypt(&too_short, "holistic-secret").is_err());
    }
}
