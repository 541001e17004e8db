#[cfg(test)]
mod log_capture;
pub mod token_issuer;
pub mod use_cases;
pub mod verifier;

pub use token_issuer::{TokenIssuer, TokenIssuerError};
pub use use_cases::{
    login::{LoginError, LoginUseCase},
    verify_token::VerifyTokenUseCase,
};
pub use verifier::{ConstantTimeVerifier, DIGEST_LEN, HashParams, VerifierError};
