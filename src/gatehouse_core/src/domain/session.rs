use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claim set carried inside an issued session token.
///
/// Timestamps are unix seconds. `jti` is random per token, so two tokens for
/// the same identity issued in the same second still differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl SessionClaims {
    pub fn new(subject: &str, issuer: &str, issued_at: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(ttl)?;
        Some(Self {
            sub: subject.to_owned(),
            iss: issuer.to_owned(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// A signed session token handed to the client after a successful login.
#[derive(Debug, Clone)]
pub struct SessionToken {
    claims: SessionClaims,
    encoded: Secret<String>,
}

impl SessionToken {
    pub fn new(claims: SessionClaims, encoded: Secret<String>) -> Self {
        Self { claims, encoded }
    }

    pub fn subject(&self) -> &str {
        &self.claims.sub
    }

    pub fn token_id(&self) -> &str {
        &self.claims.jti
    }

    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.claims.issued_at()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims.expires_at()
    }

    /// The compact, signed form sent to the client.
    pub fn encoded(&self) -> &str {
        self.encoded.expose_secret()
    }
}
