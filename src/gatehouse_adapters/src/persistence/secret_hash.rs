use gatehouse_application::HashParams;
use gatehouse_core::{Password, StoredHash};
use secrecy::{ExposeSecret, Secret};

/// Hash a secret into a PHC Argon2id string with a fresh random salt.
///
/// Runs on the blocking pool; the parameters should match the ones the
/// verifier is configured with.
#[tracing::instrument(name = "Computing secret hash", skip_all)]
pub async fn compute_secret_hash(
    secret: Password,
    params: HashParams,
) -> Result<StoredHash, String> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            params
                .hash_secret(secret.as_ref().expose_secret().as_bytes())
                .map(|phc| StoredHash::new(Secret::new(phc)))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}
