use chrono::{DateTime, Duration, Utc};
use gatehouse_core::{
    ClaimsSigner, Identity, SessionClaims, SessionToken, SigningError, TokenVerificationError,
};
use secrecy::Secret;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenIssuerError {
    #[error("Token lifetime must be positive")]
    NonPositiveLifetime,
    #[error("Token issuer must not be empty")]
    EmptyIssuer,
}

/// Issues expiring session tokens through an injected signer.
#[derive(Clone)]
pub struct TokenIssuer<S> {
    signer: S,
    issuer: String,
    ttl: Duration,
}

impl<S: ClaimsSigner> TokenIssuer<S> {
    pub fn new(signer: S, issuer: impl Into<String>, ttl: Duration) -> Result<Self, TokenIssuerError> {
        let issuer = issuer.into();
        if issuer.is_empty() {
            return Err(TokenIssuerError::EmptyIssuer);
        }
        if ttl <= Duration::zero() {
            return Err(TokenIssuerError::NonPositiveLifetime);
        }
        Ok(Self { signer, issuer, ttl })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, identity: &Identity) -> Result<SessionToken, SigningError> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(
        &self,
        identity: &Identity,
        issued_at: DateTime<Utc>,
    ) -> Result<SessionToken, SigningError> {
        let claims = SessionClaims::new(identity.as_str(), &self.issuer, issued_at, self.ttl)
            .ok_or_else(|| SigningError::InvalidClaims("expiry out of range".to_owned()))?;

        let encoded = self.signer.sign(&claims)?;

        Ok(SessionToken::new(claims, Secret::new(encoded)))
    }

    /// Checks signature, issuer and expiry of a previously issued token.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenVerificationError> {
        let claims = self.signer.verify(token)?;

        if claims.iss != self.issuer {
            return Err(TokenVerificationError::Invalid);
        }
        if claims.is_expired_at(Utc::now()) {
            return Err(TokenVerificationError::Expired);
        }

        Ok(claims)
    }
}
