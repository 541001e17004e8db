mod auth_service;
mod helpers;
mod tracing;

pub use auth_service::{AuthService, AuthServiceError};
pub use helpers::{configure_postgresql, get_postgres_pool};

// Re-export commonly used types
pub use gatehouse_adapters::config::{AllowedOrigins, AuthServiceSetting, AuthSettings};
pub use gatehouse_core::{ClaimsSigner, CredentialStore};
