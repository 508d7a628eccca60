//! Cryptographic operations for encrypted booking fields
//!
//! Password-based AES-256-CBC in the OpenSSL salted envelope format,
//! with keys derived by `EVP_BytesToKey` (MD5, one iteration).

mod aes;
mod kdf;
mod codec;

pub use self::aes::{encrypt, decrypt};
pub use self::codec::{encrypt_value, decrypt_value, EncryptionKey, FieldCipher};
