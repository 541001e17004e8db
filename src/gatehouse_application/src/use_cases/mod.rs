pub mod login;
pub mod verify_token;
