//! AES-256-CBC encryption with an HMAC-SHA256 tag (encrypt-then-MAC).
//!
//! Every call to `encrypt` draws a fresh random 16-byte IV.  The tag is
//! computed over `IV || ciphertext` and placed in front, so `decrypt`
//! can authenticate the whole blob before touching the block cipher.
//!
//! Layout of the returned byte buffer:
//!   [ 32-byte HMAC | 16-byte IV | ciphertext (PKCS#7 padded) ]

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::keys::VaultKey;
use crate::errors::{PassVaultError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Size of the HMAC-SHA256 tag in bytes.
pub const MAC_LEN: usize = 32;

/// Size of the CBC initialization vector in bytes.
pub const IV_LEN: usize = 16;

/// Smallest blob `decrypt` will look at: tag plus IV.
pub const MIN_BLOB_LEN: usize = MAC_LEN + IV_LEN;

/// Authenticated symmetric encryption under one fixed vault key.
pub struct CryptoManager {
    key: VaultKey,
}

impl CryptoManager {
    /// Build a manager from raw key bytes.
    ///
    /// Fails with `InvalidKeySize` unless `key` is exactly 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        Ok(Self {
            key: VaultKey::from_slice(key)?,
        })
    }

    pub fn from_key(key: VaultKey) -> Self {
        Self { key }
    }

    /// Generate a new random vault key.
    pub fn generate_key() -> VaultKey {
        VaultKey::generate()
    }

    /// Encrypt a UTF-8 string and return `MAC || IV || ciphertext`.
    pub fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>> {
        let mut iv = [0u8; IV_LEN];
        rand::rng().fill_bytes(&mut iv);

        let cipher = Aes256CbcEnc::new_from_slices(self.key.as_bytes(), &iv)
            .map_err(|e| PassVaultError::EncryptionFailed(format!("cipher init: {e}")))?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        let tag = self.compute_mac(&iv, &ciphertext)?;

        let mut output = Vec::with_capacity(MAC_LEN + IV_LEN + ciphertext.len());
        output.extend_from_slice(&tag);
        output.extend_from_slice(&iv);
        output.extend_from_slice(&ciphertext);
        Ok(output)
    }

    /// Authenticate and decrypt a blob produced by `encrypt`.
    ///
    /// The tag is checked in constant time first; on mismatch nothing is
    /// decrypted and `AuthenticationFailed` is returned.
    pub fn decrypt(&self, blob: &[u8]) -> Result<String> {
        if blob.len() < MIN_BLOB_LEN {
            return Err(PassVaultError::MalformedCiphertext(format!(
                "expected at least {MIN_BLOB_LEN} bytes, got {}",
                blob.len()
            )));
        }

        let (stored_tag, rest) = blob.split_at(MAC_LEN);
        let (iv, ciphertext) = rest.split_at(IV_LEN);

        let expected_tag = self.compute_mac(iv, ciphertext)?;
        if !bool::from(expected_tag.as_slice().ct_eq(stored_tag)) {
            return Err(PassVaultError::AuthenticationFailed);
        }

        let cipher = Aes256CbcDec::new_from_slices(self.key.as_bytes(), iv)
            .map_err(|e| PassVaultError::Internal(format!("cipher init: {e}")))?;

        // The tag covers the padding, so an unpad failure here means the
        // blob was produced under this key by something other than `encrypt`.
        let plaintext = cipher
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| PassVaultError::Internal("invalid padding in authenticated data".into()))?;

        String::from_utf8(plaintext).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            PassVaultError::Internal("decrypted payload is not valid UTF-8".into())
        })
    }

    fn compute_mac(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(self.key.as_bytes())
            .map_err(|e| PassVaultError::Internal(format!("invalid HMAC key: {e}")))?;
        mac.update(iv);
        mac.update(ciphertext);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> CryptoManager {
        CryptoManager::new(&[0x42u8; 32]).unwrap()
    }

    #[test]
    fn new_rejects_short_key() {
        assert!(matches!(
            CryptoManager::new(&[0u8; 16]),
            Err(PassVaultError::InvalidKeySize(16))
        ));
    }

    #[test]
    fn blob_layout_sizes() {
        // 5 bytes of plaintext pad to one 16-byte block.
        let blob = manager().encrypt("hello").unwrap();
        assert_eq!(blob.len(), MAC_LEN + IV_LEN + 16);

        // Exactly one block of plaintext gains a full padding block.
        let blob = manager().encrypt("0123456789abcdef").unwrap();
        assert_eq!(blob.len(), MAC_LEN + IV_LEN + 32);
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let m = manager();
        let blob = m.encrypt("").unwrap();
        assert_eq!(m.decrypt(&blob).unwrap(), "");
    }

    #[test]
    fn short_blob_is_malformed() {
        let result = manager().decrypt(&[0u8; MIN_BLOB_LEN - 1]);
        assert!(matches!(result, Err(PassVaultError::MalformedCiphertext(_))));
    }

    #[test]
    fn tag_only_blob_fails_authentication() {
        // 48 bytes passes the size check but carries a bogus tag.
        let result = manager().decrypt(&[0u8; MIN_BLOB_LEN]);
        assert!(matches!(result, Err(PassVaultError::AuthenticationFailed)));
    }

    #[test]
    fn swapped_iv_fails_authentication() {
        let m = manager();
        let a = m.encrypt("first").unwrap();
        let b = m.encrypt("first").unwrap();

        let mut spliced = a.clone();
        spliced[MAC_LEN..MIN_BLOB_LEN].copy_from_slice(&b[MAC_LEN..MIN_BLOB_LEN]);
        assert!(matches!(
            m.decrypt(&spliced),
            Err(PassVaultError::AuthenticationFailed)
        ));
    }
}
