//! Encrypted field codec
//!
//! Turns a structured value into an opaque ciphertext string for storage
//! and back. The value is serialized to compact JSON, then sealed with
//! [`super::aes::encrypt`].

use serde_json::Value;

use super::aes;
use crate::error::{BookingError, Result};

/// Secret passphrase used for field encryption
///
/// Held by value and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey(String);

impl EncryptionKey {
    /// Wrap a secret, rejecting an empty one
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(BookingError::EncryptionError("Encryption key is empty".to_string()));
        }
        Ok(Self(secret))
    }

    /// Expose the passphrase to the cipher
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncryptionKey(***)")
    }
}

/// Serialize `value` and encrypt it under `key`
pub fn encrypt_value(value: &Value, key: &EncryptionKey) -> Result<String> {
    let plaintext = serde_json::to_string(value)
        .map_err(|e| BookingError::EncryptionError(e.to_string()))?;

    aes::encrypt(plaintext.as_bytes(), key.expose()).map_err(BookingError::EncryptionError)
}

/// Decrypt `ciphertext` under `key` and parse the structured value back
pub fn decrypt_value(ciphertext: &str, key: &EncryptionKey) -> Result<Value> {
    let plaintext = aes::decrypt(ciphertext, key.expose()).map_err(BookingError::DecryptionError)?;

    let text = String::from_utf8(plaintext)
        .map_err(|e| BookingError::MalformedPayload(format!("Invalid UTF-8: {}", e)))?;

    Ok(serde_json::from_str(&text)?)
}

/// Field cipher bound to one key for its whole lifetime
#[derive(Debug, Clone)]
pub struct FieldCipher {
    key: EncryptionKey,
}

impl FieldCipher {
    /// Create a cipher for `key`
    pub fn new(key: EncryptionKey) -> Self {
        Self { key }
    }

    /// Encrypt a structured value
    pub fn encrypt(&self, value: &Value) -> Result<String> {
        encrypt_value(value, &self.key)
    }

    /// Decrypt a ciphertext produced by [`FieldCipher::encrypt`]
    pub fn decrypt(&self, ciphertext: &str) -> Result<Value> {
        decrypt_value(ciphertext, &self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(secret: &str) -> EncryptionKey {
        EncryptionKey::new(secret).unwrap()
    }

    #[test]
    fn test_roundtrip_object() {
        let value = json!({"name": "Alice", "phone": "+31 6 1234 5678", "tags": ["new", 3, null]});
        let k = key("holistic-secret");

        let ciphertext = encrypt_value(&value, &k).unwrap();
        assert_eq!(decrypt_value(&ciphertext, &k).unwrap(), value);
    }

    #[test]
    fn test_roundtrip_primitives() {
        let k = key("holistic-secret");
        for value in [json!(null), json!(true), json!(42), json!(-1.5), json!("plain"), json!([])] {
            let ciphertext = encrypt_value(&value, &k).unwrap();
            assert_eq!(decrypt_value(&ciphertext, &k).unwrap(), value);
        }
    }

    #[test]
    fn test_roundtrip_exact_floats() {
        let k = key("holistic-secret");
        for f in [1.2056145300003068e64, 0.1, 5e-324, f64::MAX, -2.2250738585072014e-308] {
            let value = json!({"rate": f});
            let back = decrypt_value(&encrypt_value(&value, &k).unwrap(), &k).unwrap();
            assert_eq!(back, value);
            assert_eq!(back["rate"].as_f64().unwrap().to_bits(), f.to_bits());
        }

        let big = json!({"id": u64::MAX});
        assert_eq!(decrypt_value(&encrypt_value(&big, &k).unwrap(), &k).unwrap(), big);
    }

    #[test]
    fn test_decrypts_openssl_envelope() {
        let value = decrypt_value(
            "U2FsdGVkX18BAgMEBQYHCKgkxY960zwPjzxdW5AC/bL2nKAAfpz6UGUAFhkEtzUE",
            &key("holistic-secret"),
        )
        .unwrap();
        assert_eq!(value, json!({"name": "Alice"}));
    }

    #[test]
    fn test_wrong_key_fails() {
        let value = json!({"name": "Alice"});
        let ciphertext = encrypt_value(&value, &key("correct")).unwrap();

        match decrypt_value(&ciphertext, &key("wrong")) {
            Err(BookingError::DecryptionError(_)) | Err(BookingError::MalformedPayload(_)) => {}
            other => panic!("Expected decryption failure, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_is_decryption_error() {
        let err = decrypt_value("definitely-not-ciphertext", &key("k")).unwrap_err();
        assert!(matches!(err, BookingError::DecryptionError(_)));
    }

    #[test]
    fn test_non_json_plaintext_is_malformed_payload() {
        let ciphertext = aes::encrypt(b"not json {", "k").unwrap();
        let err = decrypt_value(&ciphertext, &key("k")).unwrap_err();
        assert!(matches!(err, BookingError::MalformedPayload(_)));
    }

    #[test]
    fn test_ciphertext_hides_plaintext() {
        let ciphertext = encrypt_value(&json!({"name": "Alice"}), &key("k")).unwrap();
        assert!(!ciphertext.contains("Alice"));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(EncryptionKey::new(""), Err(BookingError::EncryptionError(_))));
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let shown = format!("{:?}", key("super-secret"));
        assert!(!shown.contains("super-secret"));
    }

    #[test]
    fn test_field_cipher() {
        let cipher = FieldCipher::new(key("k"));
        let value = json!({"answer": 42});
        let ciphertext = cipher.encrypt(&value).unwrap();
        assert_eq!(cipher.decrypt(&ciphertext).unwrap(), value);
    }
}
