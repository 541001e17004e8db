pub mod hashmap_credential_store;
pub mod postgres_credential_store;
pub mod secret_hash;

pub use hashmap_credential_store::HashMapCredentialStore;
pub use postgres_credential_store::PostgresCredentialStore;
pub use secret_hash::compute_secret_hash;

/// Failure while seeding a credential.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
    #[error("Credential already exists")]
    AlreadyExists,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
