pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    credential::{AccountState, CredentialError, CredentialRecord, CredentialRequest, StoredHash},
    identity::Identity,
    password::Password,
    session::{SessionClaims, SessionToken},
};

pub use ports::{
    repositories::{CredentialStore, LookupError},
    services::{ClaimsSigner, SigningError, TokenVerificationError},
};
