use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{credential::CredentialRecord, identity::Identity};

// CredentialStore port trait and errors
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Credential not found")]
    NotFound,
    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),
}

impl PartialEq for LookupError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::NotFound, Self::NotFound)
                | (Self::StoreUnavailable(_), Self::StoreUnavailable(_))
        )
    }
}

/// Read access to persisted credentials.
///
/// Implementations must pass `identity` to the backing store as a bound
/// parameter, never as part of query text.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn lookup(&self, identity: &Identity) -> Result<CredentialRecord, LookupError>;
}

#[async_trait]
impl<T: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<T> {
    async fn lookup(&self, identity: &Identity) -> Result<CredentialRecord, LookupError> {
        (**self).lookup(identity).await
    }
}
