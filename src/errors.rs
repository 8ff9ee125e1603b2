use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Password policy / credentials ---
    #[error("Password is too weak — use at least 8 characters with upper and lower case letters, a digit and a symbol")]
    WeakPassword,

    #[error("Incorrect master password")]
    InvalidCredentials,

    #[error("Too many failed unlock attempts ({0})")]
    TooManyAttempts(u32),

    // --- Crypto errors ---
    #[error("Invalid key size: expected 32 bytes, got {0}")]
    InvalidKeySize(usize),

    #[error("Malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    #[error("Authentication failed — vault data is corrupted or has been tampered with")]
    AuthenticationFailed,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),

    // --- Vault errors ---
    #[error("No vault found in {0} — run `passvault init` first")]
    NotInitialized(PathBuf),

    #[error("Vault already exists in {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Key material missing: {0}")]
    MissingKeyMaterial(PathBuf),

    #[error("Vault is locked")]
    VaultLocked,

    #[error("Section '{0}' already exists")]
    DuplicateSection(String),

    #[error("Section '{0}' not found")]
    SectionNotFound(String),

    #[error("Account #{index} not found in section '{section}'")]
    AccountNotFound { section: String, index: usize },

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
