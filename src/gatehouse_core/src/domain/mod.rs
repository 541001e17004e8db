pub mod credential;
pub mod identity;
pub mod password;
pub mod session;
