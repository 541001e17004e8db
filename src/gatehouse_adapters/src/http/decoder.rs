//! Decoding of inbound credential payloads.

use gatehouse_core::{CredentialRequest, Identity, Password};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed request")]
    MalformedRequest,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LoginRequest {
    #[serde(alias = "username")]
    identity: String,
    #[serde(alias = "password")]
    secret: Secret<String>,
}

/// Parses `{ "identity": ..., "secret": ... }`.
///
/// Any deviation (invalid JSON, wrong types, unknown or missing fields,
/// empty values) is reported as the same `MalformedRequest`. Values are not
/// trimmed or case-folded.
pub fn decode(raw_body: &[u8]) -> Result<CredentialRequest, DecodeError> {
    let request: LoginRequest =
        serde_json::from_slice(raw_body).map_err(|_| DecodeError::MalformedRequest)?;

    let identity = Identity::parse(request.identity).map_err(|_| DecodeError::MalformedRequest)?;
    let secret = Password::parse(request.secret).map_err(|_| DecodeError::MalformedRequest)?;

    Ok(CredentialRequest::new(identity, secret))
}
