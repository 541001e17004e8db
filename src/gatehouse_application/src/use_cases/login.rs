use std::time::Duration;

use gatehouse_core::{
    ClaimsSigner, CredentialRequest, CredentialStore, LookupError, Password, SessionToken,
    SigningError, StoredHash,
};

use crate::{token_issuer::TokenIssuer, verifier::ConstantTimeVerifier};

/// Error types specific to login use case.
///
/// Every variant except `SigningFailure` means "bad credential" to the
/// outside world; the distinction is for internal telemetry only.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Credential not found")]
    NotFound,
    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Secret mismatch")]
    SecretMismatch,
    #[error("Account is not active")]
    AccountLocked,
    #[error("Token signing failed: {0}")]
    SigningFailure(#[from] SigningError),
}

impl From<LookupError> for LoginError {
    fn from(error: LookupError) -> Self {
        match error {
            LookupError::NotFound => LoginError::NotFound,
            LookupError::StoreUnavailable(e) => LoginError::StoreUnavailable(e),
        }
    }
}

/// Login use case - verifies a credential and issues a session token
pub struct LoginUseCase<C, S> {
    store: C,
    verifier: ConstantTimeVerifier,
    issuer: TokenIssuer<S>,
    lookup_timeout: Duration,
}

impl<C, S> LoginUseCase<C, S>
where
    C: CredentialStore,
    S: ClaimsSigner,
{
    pub fn new(
        store: C,
        verifier: ConstantTimeVerifier,
        issuer: TokenIssuer<S>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            store,
            verifier,
            issuer,
            lookup_timeout,
        }
    }

    pub fn issuer(&self) -> &TokenIssuer<S> {
        &self.issuer
    }

    /// Execute the login use case
    ///
    /// The secret comparison runs whether or not the lookup succeeded, so a
    /// missing account, a store outage and a wrong secret all take the same
    /// path through the verifier before the outcome is decided.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, request: CredentialRequest) -> Result<SessionToken, LoginError> {
        let CredentialRequest { identity, secret } = request;

        let lookup = match tokio::time::timeout(self.lookup_timeout, self.store.lookup(&identity))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(LookupError::StoreUnavailable(
                "lookup deadline exceeded".to_owned(),
            )),
        };

        let stored = lookup.as_ref().ok().map(|record| record.secret_hash.clone());
        let matched = self.verify_secret(secret, stored).await;

        let record = lookup?;
        if !matched {
            return Err(LoginError::SecretMismatch);
        }
        if !record.account_state.is_active() {
            return Err(LoginError::AccountLocked);
        }

        Ok(self.issuer.issue(&record.identity)?)
    }

    async fn verify_secret(&self, secret: Password, stored: Option<StoredHash>) -> bool {
        let verifier = self.verifier.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| verifier.verify(&secret, stored.as_ref()))
        })
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Secret verification task failed");
            false
        })
    }
}
