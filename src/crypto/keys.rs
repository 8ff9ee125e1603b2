//! The raw symmetric vault key and its on-disk form.
//!
//! `secret.key` holds exactly 32 random bytes.  The key is independent of
//! the master password: the password only gates access to it.

use std::fs;
use std::path::Path;

use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{PassVaultError, Result};

/// Length of the vault key in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte vault key that zeroes its memory when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Build a key from a slice, rejecting anything that is not 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| PassVaultError::InvalidKeySize(bytes.len()))?;
        Ok(Self { bytes })
    }

    /// Generate a fresh key from the OS-seeded CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Load the key from `path`.
    ///
    /// A missing file is reported as `MissingKeyMaterial` so callers can
    /// tell a damaged install apart from a vault that was never set up.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PassVaultError::MissingKeyMaterial(path.to_path_buf()));
        }

        let mut data = fs::read(path)?;
        let key = Self::from_slice(&data);
        data.zeroize();
        key
    }

    /// Write the key to `path` with owner-only permissions.
    pub fn store(&self, path: &Path) -> Result<()> {
        crate::vault::layout::write_atomic(path, &self.bytes)
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VaultKey(..)")
    }
}
