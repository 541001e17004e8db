use secrecy::{ExposeSecret, Secret};

use crate::domain::credential::CredentialError;

/// The secret presented by the caller.
///
/// No trimming or case folding is applied; the bytes reach the verifier
/// exactly as they were sent.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(raw: Secret<String>) -> Result<Self, CredentialError> {
        if raw.expose_secret().is_empty() {
            return Err(CredentialError::EmptySecret);
        }
        Ok(Self(raw))
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = CredentialError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
