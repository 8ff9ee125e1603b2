//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - PBKDF2 master-password hashing and the strength policy (`hasher`)
//! - AES-256-CBC + HMAC-SHA256 authenticated encryption (`cipher`)
//! - The raw 32-byte vault key (`keys`)

pub mod cipher;
pub mod hasher;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{CryptoManager, hash_password, verify_password, ...};
pub use cipher::CryptoManager;
pub use hasher::{generate_password, hash_password, is_strong, verify_password};
pub use keys::VaultKey;
