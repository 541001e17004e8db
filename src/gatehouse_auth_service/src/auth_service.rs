use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, request},
    routing::post,
};
use gatehouse_adapters::{
    config::{AllowedOrigins, AuthSettings, MAX_REQUEST_BODY_BYTES},
    http::routes::{login, method_not_allowed, verify_token},
};
use gatehouse_application::{
    ConstantTimeVerifier, LoginUseCase, TokenIssuer, TokenIssuerError, VerifierError,
};
use gatehouse_core::{ClaimsSigner, CredentialStore};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error(transparent)]
    Verifier(#[from] VerifierError),
    #[error(transparent)]
    TokenIssuer(#[from] TokenIssuerError),
}

/// The login service: `POST /login` and `POST /verify-token`.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Wire the login use case from a credential store, a claims signer and
    /// the auth settings.
    ///
    /// Fails if the Argon2 parameters are unusable or the token lifetime or
    /// issuer are invalid.
    pub fn new<C, S>(store: C, signer: S, settings: &AuthSettings) -> Result<Self, AuthServiceError>
    where
        C: CredentialStore + 'static,
        S: ClaimsSigner + 'static,
    {
        let verifier = ConstantTimeVerifier::new(settings.argon2.into())?;
        let issuer = TokenIssuer::new(
            signer,
            settings.jwt.issuer.clone(),
            chrono::Duration::seconds(settings.jwt.time_to_live),
        )?;
        let use_case = Arc::new(LoginUseCase::new(
            store,
            verifier,
            issuer,
            settings.lookup_timeout(),
        ));

        let router = Router::new()
            .route(
                "/login",
                post(login::<C, S>).fallback(method_not_allowed),
            )
            .route(
                "/verify-token",
                post(verify_token::<C, S>).fallback(method_not_allowed),
            )
            .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
            .with_state(use_case);

        Ok(Self { router })
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AuthService into a router that can be mounted on another router
    ///
    /// CORS is only enabled when `allowed_origins` is given and non-empty.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::POST])
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
