pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "GATEHOUSE_ENV";
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "GATEHOUSE_ALLOWED_ORIGINS";
}

/// HS256 keys shorter than the digest size are refused.
pub const MIN_JWT_SECRET_LEN: usize = 32;

pub const DEFAULT_JWT_ISSUER: &str = "gatehouse";
pub const DEFAULT_TOKEN_TTL_IN_SECONDS: i64 = 600;
pub const DEFAULT_LOOKUP_TIMEOUT_IN_MILLIS: i64 = 2000;
pub const DEFAULT_MAX_DB_CONNECTIONS: i64 = 5;

/// Upper bound on a `/login` or `/verify-token` request body.
pub const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024;

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
