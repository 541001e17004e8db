use std::fmt;

use crate::domain::credential::CredentialError;

/// The account identifier claimed in a login attempt.
///
/// The value is kept byte-for-byte as received. It is treated as opaque data
/// everywhere: stores bind it as a query parameter and it is never echoed
/// back to the caller.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn parse(raw: String) -> Result<Self, CredentialError> {
        if raw.is_empty() {
            return Err(CredentialError::EmptyIdentity);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Identities stay out of log output and panic messages.
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Identity([REDACTED])")
    }
}
