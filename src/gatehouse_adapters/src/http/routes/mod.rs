mod login;
mod verify_token;

pub use login::{login, method_not_allowed};
pub use verify_token::{VerifyTokenRequest, VerifyTokenResponse, verify_token};
