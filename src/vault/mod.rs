//! Vault module: encrypted credential storage.
//!
//! This module provides:
//! - `Section`, `Account` and `HistoryEntry` record types (`model`)
//! - Plaintext user preferences (`settings`)
//! - Fixed file layout and the atomic writer (`layout`)
//! - High-level `VaultStore` for setting up, unlocking and editing a vault (`store`)

pub mod layout;
pub mod model;
pub mod settings;
pub mod store;

// Re-export the most commonly used items.
pub use layout::VaultLayout;
pub use model::{Account, HistoryEntry, Section};
pub use settings::Settings;
pub use store::{VaultState, VaultStore};
