//! Passphrase-based key derivation
//!
//! Implements the OpenSSL `EVP_BytesToKey` scheme with MD5 and a single
//! iteration, which is what password-based AES in JavaScript land
//! (`openssl enc`, CryptoJS) produces:
//!
//! ```text
//! D_0 = ""
//! D_i = MD5(D_{i-1} || passphrase || salt)
//! key || iv = D_1 || D_2 || D_3 ...  (first 48 bytes)
//! ```

use md5::{Digest, Md5};

/// Key length for AES-256 (32 bytes = 256 bits)
pub(crate) const KEY_LENGTH: usize = 32;

/// IV length for AES-CBC (16 bytes = 128 bits)
pub(crate) const IV_LENGTH: usize = 16;

/// Key and IV pair derived from a passphrase and salt
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct DerivedKey {
    pub(crate) key: [u8; KEY_LENGTH],
    pub(crate) iv: [u8; IV_LENGTH],
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey").finish_non_exhaustive()
    }
}

/// Derive an AES-256 key and CBC IV from `passphrase` and `salt`
pub(crate) fn derive_key_iv(passphrase: &[u8], salt: &[u8]) -> DerivedKey {
    let mut material: Vec<u8> = Vec::with_capacity(KEY_LENGTH + IV_LENGTH + 16);
    let mut previous: Vec<u8> = Vec::new();

    while material.len() < KEY_LENGTH + IV_LENGTH {
        let mut hasher = Md5::new();
        hasher.update(&previous);
        hasher.update(passphrase);
        hasher.update(salt);
        previous = hasher.finalize().to_vec();
        material.extend_from_slice(&previous);
    }

    let mut key = [0u8; KEY_LENGTH];
    let mut iv = [0u8; IV_LENGTH];
    key.copy_from_slice(&material[..KEY_LENGTH]);
    iv.copy_from_slice(&material[KEY_LENGTH..KEY_LENGTH + IV_LENGTH]);

    DerivedKey { key, iv }
}
