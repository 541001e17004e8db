use thiserror::Error;

use crate::domain::session::SessionClaims;

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("Failed to sign claims: {0}")]
    Signing(String),
    #[error("Invalid claims: {0}")]
    InvalidClaims(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenVerificationError {
    #[error("Token is malformed or its signature is invalid")]
    Invalid,
    #[error("Token has expired")]
    Expired,
}

/// Signing capability backed by externally managed key material.
///
/// Callers only hand over claims and get back the compact signed form; the
/// key never leaves the implementation.
pub trait ClaimsSigner: Send + Sync {
    fn sign(&self, claims: &SessionClaims) -> Result<String, SigningError>;

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenVerificationError>;
}

impl<T: ClaimsSigner + ?Sized> ClaimsSigner for std::sync::Arc<T> {
    fn sign(&self, claims: &SessionClaims) -> Result<String, SigningError> {
        (**self).sign(claims)
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenVerificationError> {
        (**self).verify(token)
    }
}
