pub mod decoder;
pub mod response;
pub mod routes;

pub use decoder::{DecodeError, decode};
pub use response::{ErrorResponse, Rejection, TokenResponse};
