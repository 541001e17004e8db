//! Concrete adapters for the gatehouse ports: credential stores, the JWT
//! signer, settings loading and the HTTP surface of the login endpoint.

pub mod config;
pub mod http;
#[cfg(test)]
mod log_capture;
pub mod persistence;
pub mod signing;

pub use http::{DecodeError, Rejection, decode};
pub use persistence::{
    HashMapCredentialStore, PostgresCredentialStore, ProvisioningError, compute_secret_hash,
};
pub use signing::{JwtSigner, JwtSignerError};
