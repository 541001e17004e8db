//! # Gatehouse - Credential Login Service
//!
//! Facade crate that re-exports the public APIs of the gatehouse components,
//! so an application can mount the login endpoint from one dependency.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! gatehouse = { path = "../gatehouse" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Identity`, `Password`, `CredentialRecord`, `SessionToken`
//! - **Ports**: `CredentialStore`, `ClaimsSigner`
//! - **Use cases**: `LoginUseCase`, `VerifyTokenUseCase`
//! - **Adapters**: `PostgresCredentialStore`, `HashMapCredentialStore`, `JwtSigner`
//! - **Service**: `AuthService` - router with `/login` and `/verify-token`

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use gatehouse_core::*;
}

pub use gatehouse_core::{
    AccountState, CredentialError, CredentialRecord, CredentialRequest, Identity, Password,
    SessionClaims, SessionToken, StoredHash,
};

// ============================================================================
// Ports
// ============================================================================

pub use gatehouse_core::{
    ClaimsSigner, CredentialStore, LookupError, SigningError, TokenVerificationError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gatehouse_application::*;
}

pub use gatehouse_application::{
    ConstantTimeVerifier, HashParams, LoginError, LoginUseCase, TokenIssuer, VerifyTokenUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP decoding, responses and route handlers
    pub mod http {
        pub use gatehouse_adapters::http::*;
    }

    /// Credential stores
    pub mod persistence {
        pub use gatehouse_adapters::persistence::*;
    }

    /// Token signing
    pub mod signing {
        pub use gatehouse_adapters::signing::*;
    }

    /// Configuration
    pub mod config {
        pub use gatehouse_adapters::config::*;
    }
}

pub use gatehouse_adapters::{
    HashMapCredentialStore, JwtSigner, PostgresCredentialStore, compute_secret_hash,
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

pub use gatehouse_auth_service::{
    AuthService, AuthServiceError, configure_postgresql, get_postgres_pool,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use axum;
