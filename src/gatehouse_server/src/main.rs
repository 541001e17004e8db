use color_eyre::eyre::Result;
use gatehouse_adapters::{JwtSigner, PostgresCredentialStore, config::AuthServiceSetting};
use gatehouse_auth_service::{AuthService, configure_postgresql};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let config = AuthServiceSetting::load()?;

    let pg_pool = configure_postgresql(&config.postgres).await?;
    let credential_store = PostgresCredentialStore::new(pg_pool);
    let signer = JwtSigner::new(&config.auth.jwt.secret)?;

    let auth_service = AuthService::new(credential_store, signer, &config.auth)?;

    let listener = tokio::net::TcpListener::bind(&config.application.address).await?;
    tracing::info!("Starting gatehouse...");

    auth_service
        .run_standalone(listener, config.application.allowed_origins.clone())
        .await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
