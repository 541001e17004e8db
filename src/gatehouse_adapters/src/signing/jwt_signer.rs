use gatehouse_core::{ClaimsSigner, SessionClaims, SigningError, TokenVerificationError};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use crate::config::MIN_JWT_SECRET_LEN;

#[derive(Debug, Error)]
pub enum JwtSignerError {
    #[error("JWT secret must be at least {0} bytes")]
    SecretTooShort(usize),
}

/// HS256 signer over a shared secret held by the operator.
#[derive(Clone)]
pub struct JwtSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSigner {
    pub fn new(secret: &Secret<String>) -> Result<Self, JwtSignerError> {
        let secret = secret.expose_secret().as_bytes();
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(JwtSignerError::SecretTooShort(MIN_JWT_SECRET_LEN));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "iss", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl ClaimsSigner for JwtSigner {
    fn sign(&self, claims: &SessionClaims) -> Result<String, SigningError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| SigningError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenVerificationError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenVerificationError::Expired,
                _ => TokenVerificationError::Invalid,
            })
    }
}
