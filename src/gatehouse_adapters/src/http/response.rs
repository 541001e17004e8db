//! The single place where login outcomes become HTTP responses.
//!
//! `Rejection` has no payload, so nothing about the caller's input or the
//! internal failure reason can reach a response body or header.

use axum::{
    Json,
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};
use gatehouse_application::LoginError;
use gatehouse_core::{SessionToken, TokenVerificationError};
use serde::{Deserialize, Serialize};

use crate::http::decoder::DecodeError;

pub const INVALID_REQUEST: &str = "invalid request";
pub const INVALID_CREDENTIALS: &str = "invalid credentials";
pub const INVALID_TOKEN: &str = "invalid token";
pub const METHOD_NOT_ALLOWED: &str = "method not allowed";
pub const INTERNAL_ERROR: &str = "internal server error";

const NO_STORE: [(HeaderName, &str); 2] = [
    (header::CACHE_CONTROL, "no-store"),
    (header::PRAGMA, "no-cache"),
];

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MalformedRequest,
    InvalidCredentials,
    InvalidToken,
    MethodNotAllowed,
    Internal,
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::MalformedRequest => StatusCode::BAD_REQUEST,
            Rejection::InvalidCredentials | Rejection::InvalidToken => StatusCode::UNAUTHORIZED,
            Rejection::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Rejection::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rejection::MalformedRequest => INVALID_REQUEST,
            Rejection::InvalidCredentials => INVALID_CREDENTIALS,
            Rejection::InvalidToken => INVALID_TOKEN,
            Rejection::MethodNotAllowed => METHOD_NOT_ALLOWED,
            Rejection::Internal => INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message().to_owned(),
        });

        (self.status(), NO_STORE, body).into_response()
    }
}

impl From<DecodeError> for Rejection {
    fn from(_: DecodeError) -> Self {
        tracing::warn!(reason = "malformed_request", "Login rejected");
        Rejection::MalformedRequest
    }
}

impl From<LoginError> for Rejection {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::NotFound => {
                tracing::warn!(reason = "not_found", "Login rejected");
                Rejection::InvalidCredentials
            }
            LoginError::SecretMismatch => {
                tracing::warn!(reason = "secret_mismatch", "Login rejected");
                Rejection::InvalidCredentials
            }
            LoginError::AccountLocked => {
                tracing::warn!(reason = "account_locked", "Login rejected");
                Rejection::InvalidCredentials
            }
            LoginError::StoreUnavailable(e) => {
                tracing::warn!(reason = "store_unavailable", error = %e, "Login rejected");
                Rejection::InvalidCredentials
            }
            LoginError::SigningFailure(e) => {
                tracing::error!(reason = "signing_failure", error = %e, "Token signing failed");
                Rejection::Internal
            }
        }
    }
}

impl From<TokenVerificationError> for Rejection {
    fn from(error: TokenVerificationError) -> Self {
        tracing::debug!(error = %error, "Token rejected");
        Rejection::InvalidToken
    }
}

/// Response for a successful login.
pub fn issued(token: &SessionToken) -> Response {
    let body = Json(TokenResponse {
        token: token.encoded().to_owned(),
    });

    (StatusCode::OK, NO_STORE, body).into_response()
}
