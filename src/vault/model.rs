//! Record model: sections of accounts, each with a secret history.
//!
//! These types are plain data.  Every change to them goes through
//! `VaultStore`, which persists the whole section list after each edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// One past (or current) secret of an account and when it was set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct HistoryEntry {
    pub secret: String,

    #[zeroize(skip)]
    pub timestamp: DateTime<Utc>,
}

/// A single credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct Account {
    /// What the account is for (e.g. "Gmail").
    #[serde(rename = "type")]
    pub kind: String,

    /// Login name or e-mail address.
    pub identifier: String,

    /// The current secret.
    pub secret: String,

    /// Every secret this account has held, oldest first.  Append-only.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl Account {
    /// Create an account whose history is seeded with the initial secret.
    pub fn new(kind: &str, identifier: &str, secret: &str) -> Self {
        Self {
            kind: kind.to_string(),
            identifier: identifier.to_string(),
            secret: secret.to_string(),
            history: vec![HistoryEntry {
                secret: secret.to_string(),
                timestamp: Utc::now(),
            }],
        }
    }

    /// Apply an edit.  A history entry is appended only when the secret
    /// actually changes.  Returns `true` if it did.
    pub fn update(&mut self, kind: &str, identifier: &str, secret: &str) -> bool {
        self.kind = kind.to_string();
        self.identifier = identifier.to_string();

        if self.secret == secret {
            return false;
        }

        self.secret.zeroize();
        self.secret = secret.to_string();
        self.history.push(HistoryEntry {
            secret: secret.to_string(),
            timestamp: Utc::now(),
        });
        true
    }

    /// Short display label, e.g. `Gmail (a@b.com)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.kind, self.identifier)
    }
}

/// A named, ordered collection of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct Section {
    pub name: String,

    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl Section {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            accounts: Vec::new(),
        }
    }

    /// Case-insensitive name comparison used for uniqueness and lookup.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
