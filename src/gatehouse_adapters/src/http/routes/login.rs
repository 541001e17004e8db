use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    response::Response,
};
use gatehouse_application::LoginUseCase;
use gatehouse_core::{ClaimsSigner, CredentialStore};

use crate::http::{
    decoder::{self, DecodeError},
    response,
    response::Rejection,
};

/// `POST /login`
///
/// The raw body is taken as bytes so that a missing or wrong content type
/// is handled by the decoder like any other malformed payload. A body the
/// extractor refuses (over the size limit, or cut off) is malformed too.
#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<C, S>(
    State(use_case): State<Arc<LoginUseCase<C, S>>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, Rejection>
where
    C: CredentialStore + 'static,
    S: ClaimsSigner + 'static,
{
    let body = body.map_err(|_| DecodeError::MalformedRequest)?;
    let request = decoder::decode(&body)?;
    let token = use_case.execute(request).await?;

    tracing::info!("Session token issued");
    Ok(response::issued(&token))
}

pub async fn method_not_allowed() -> Rejection {
    Rejection::MethodNotAllowed
}
