use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File, builder::DefaultState};
use gatehouse_application::HashParams;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

use crate::config::constants::{
    DEFAULT_JWT_ISSUER, DEFAULT_LOOKUP_TIMEOUT_IN_MILLIS, DEFAULT_MAX_DB_CONNECTIONS,
    DEFAULT_TOKEN_TTL_IN_SECONDS, MIN_JWT_SECRET_LEN, env, prod,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceSetting {
    pub application: ApplicationSettings,
    pub postgres: PostgresSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub address: String,
    #[serde(default)]
    pub allowed_origins: Option<AllowedOrigins>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
    pub lookup_timeout_in_millis: u64,
    pub argon2: Argon2Settings,
}

impl AuthSettings {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub issuer: String,
    /// Token lifetime in seconds.
    pub time_to_live: i64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Argon2Settings {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl From<Argon2Settings> for HashParams {
    fn from(settings: Argon2Settings) -> Self {
        HashParams {
            memory_kib: settings.memory_kib,
            iterations: settings.iterations,
            parallelism: settings.parallelism,
        }
    }
}

/// CORS origins, configured as a comma-separated list.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "String")]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for AllowedOrigins {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| format!("invalid origin: {origin}"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(AllowedOrigins)
    }
}

impl AuthServiceSetting {
    /// Load settings from defaults, optional `config/` files, `GATEHOUSE__*`
    /// environment variables and the well-known overrides.
    pub fn load() -> Result<Self, SettingsError> {
        // A missing .env file is fine; real deployments set the environment.
        let _ = dotenvy::dotenv();

        let environment =
            std::env::var(env::APP_ENVIRONMENT_ENV_VAR).unwrap_or_else(|_| "local".to_owned());

        let config = Self::defaults()?
            .add_source(File::with_name("config/base").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(
                Environment::with_prefix("GATEHOUSE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option(
                "auth.jwt.secret",
                std::env::var(env::JWT_SECRET_ENV_VAR).ok(),
            )?
            .set_override_option("postgres.url", std::env::var(env::DATABASE_URL_ENV_VAR).ok())?
            .set_override_option(
                "application.allowed_origins",
                std::env::var(env::ALLOWED_ORIGINS_ENV_VAR).ok(),
            )?
            .build()?;

        Self::from_config(config)
    }

    pub fn defaults() -> Result<config::ConfigBuilder<DefaultState>, ConfigError> {
        let argon2 = HashParams::default();

        Config::builder()
            .set_default("application.address", prod::APP_ADDRESS)?
            .set_default("postgres.max_connections", DEFAULT_MAX_DB_CONNECTIONS)?
            .set_default("auth.jwt.issuer", DEFAULT_JWT_ISSUER)?
            .set_default("auth.jwt.time_to_live", DEFAULT_TOKEN_TTL_IN_SECONDS)?
            .set_default(
                "auth.lookup_timeout_in_millis",
                DEFAULT_LOOKUP_TIMEOUT_IN_MILLIS,
            )?
            .set_default("auth.argon2.memory_kib", i64::from(argon2.memory_kib))?
            .set_default("auth.argon2.iterations", i64::from(argon2.iterations))?
            .set_default("auth.argon2.parallelism", i64::from(argon2.parallelism))
    }

    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.auth.jwt.secret.expose_secret().len() < MIN_JWT_SECRET_LEN {
            return Err(SettingsError::Invalid(format!(
                "auth.jwt.secret must be at least {MIN_JWT_SECRET_LEN} bytes"
            )));
        }
        if self.auth.jwt.time_to_live <= 0 {
            return Err(SettingsError::Invalid(
                "auth.jwt.time_to_live must be positive".to_owned(),
            ));
        }
        if self.auth.jwt.issuer.is_empty() {
            return Err(SettingsError::Invalid(
                "auth.jwt.issuer must not be empty".to_owned(),
            ));
        }
        if self.auth.lookup_timeout_in_millis == 0 {
            return Err(SettingsError::Invalid(
                "auth.lookup_timeout_in_millis must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}
