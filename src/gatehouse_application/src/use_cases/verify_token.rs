use gatehouse_core::{ClaimsSigner, SessionClaims, TokenVerificationError};

use crate::token_issuer::TokenIssuer;

/// Verify token use case - checks a session token for downstream consumers
pub struct VerifyTokenUseCase<'a, S> {
    issuer: &'a TokenIssuer<S>,
}

impl<'a, S: ClaimsSigner> VerifyTokenUseCase<'a, S> {
    pub fn new(issuer: &'a TokenIssuer<S>) -> Self {
        Self { issuer }
    }

    #[tracing::instrument(name = "VerifyTokenUseCase::execute", skip_all)]
    pub fn execute(&self, token: &str) -> Result<SessionClaims, TokenVerificationError> {
        if token.is_empty() {
            return Err(TokenVerificationError::Invalid);
        }
        self.issuer.verify(token)
    }
}
