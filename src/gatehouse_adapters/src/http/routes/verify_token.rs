use std::sync::Arc;

use axum::{Json, extract::State};
use gatehouse_application::{LoginUseCase, VerifyTokenUseCase};
use gatehouse_core::{ClaimsSigner, CredentialStore};
use serde::{Deserialize, Serialize};

use crate::http::response::Rejection;

#[derive(Deserialize)]
pub struct VerifyTokenRequest {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyTokenResponse {
    pub sub: String,
    pub exp: i64,
}

/// `POST /verify-token`
///
/// Every failure, including an unparseable body, gets the same 401.
#[tracing::instrument(name = "Verify token", skip_all)]
pub async fn verify_token<C, S>(
    State(login): State<Arc<LoginUseCase<C, S>>>,
    request: Result<Json<VerifyTokenRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<Json<VerifyTokenResponse>, Rejection>
where
    C: CredentialStore + 'static,
    S: ClaimsSigner + 'static,
{
    let Ok(Json(request)) = request else {
        return Err(Rejection::InvalidToken);
    };

    let claims = VerifyTokenUseCase::new(login.issuer()).execute(&request.token)?;

    Ok(Json(VerifyTokenResponse {
        sub: claims.sub,
        exp: claims.exp,
    }))
}
