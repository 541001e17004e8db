pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, ApplicationSettings, Argon2Settings, AuthServiceSetting, AuthSettings,
    JwtSettings, PostgresSettings, SettingsError,
};
