use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use crate::domain::{identity::Identity, password::Password};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Identity must not be empty")]
    EmptyIdentity,
    #[error("Secret must not be empty")]
    EmptySecret,
}

/// A decoded login attempt.
#[derive(Debug, Clone)]
pub struct CredentialRequest {
    pub identity: Identity,
    pub secret: Password,
}

impl CredentialRequest {
    pub fn new(identity: Identity, secret: Password) -> Self {
        Self { identity, secret }
    }
}

/// Account status as recorded by the credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountState {
    Active,
    Locked,
    Unknown,
}

impl AccountState {
    /// Maps the stored column value; anything unrecognised is `Unknown`.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            "locked" => Self::Locked,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Locked => "locked",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// PHC-formatted secret hash as stored for an account.
#[derive(Debug, Clone)]
pub struct StoredHash(Secret<String>);

impl StoredHash {
    pub fn new(phc: Secret<String>) -> Self {
        Self(phc)
    }

    pub fn as_phc(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for StoredHash {
    fn from(phc: String) -> Self {
        Self(Secret::new(phc))
    }
}

impl AsRef<Secret<String>> for StoredHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// A credential row, borrowed from the store for the duration of one login.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub identity: Identity,
    pub secret_hash: StoredHash,
    pub account_state: AccountState,
}

impl CredentialRecord {
    pub fn new(identity: Identity, secret_hash: StoredHash, account_state: AccountState) -> Self {
        Self {
            identity,
            secret_hash,
            account_state,
        }
    }
}
