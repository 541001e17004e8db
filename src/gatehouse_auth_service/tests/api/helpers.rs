use std::time::Duration;

use fake::{Fake, faker::internet::en::Username};
use gatehouse_adapters::{
    HashMapCredentialStore, JwtSigner,
    config::{Argon2Settings, AuthSettings, JwtSettings},
};
use gatehouse_application::HashParams;
use gatehouse_auth_service::AuthService;
use gatehouse_core::{AccountState, Identity, Password};
use secrecy::Secret;

pub const JWT_SECRET: &str = "api-test-secret-0123456789abcdef";
pub const ISSUER: &str = "gatehouse-test";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub store: HashMapCredentialStore,
    pub settings: AuthSettings,
}

pub fn auth_settings() -> AuthSettings {
    AuthSettings {
        jwt: JwtSettings {
            secret: Secret::new(JWT_SECRET.to_owned()),
            issuer: ISSUER.to_owned(),
            time_to_live: 600,
        },
        lookup_timeout_in_millis: 2000,
        argon2: Argon2Settings {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let settings = auth_settings();
        let store = HashMapCredentialStore::new();
        let signer = JwtSigner::new(&settings.jwt.secret).expect("Failed to build signer");

        let service = AuthService::new(store.clone(), signer, &settings)
            .expect("Failed to build auth service");

        let listener = tokio::net::TcpListener::bind(gatehouse_adapters::config::constants::test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            service
                .run_standalone(listener, None)
                .await
                .expect("Auth service stopped");
        });

        Self {
            address,
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap(),
            store,
            settings,
        }
    }

    pub async fn add_credential(&self, identity: &str, secret: &str, state: AccountState) {
        self.store
            .add_credential(
                Identity::parse(identity.to_owned()).unwrap(),
                Password::parse(Secret::new(secret.to_owned())).unwrap(),
                state,
                HashParams::from(self.settings.argon2),
            )
            .await
            .expect("Failed to seed credential");
    }

    pub async fn post_login<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/login", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login_raw(&self, body: &'static str) -> reqwest::Response {
        self.http_client
            .post(format!("{}/login", &self.address))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login_bytes(&self, body: Vec<u8>) -> reqwest::Response {
        self.http_client
            .post(format!("{}/login", &self.address))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_login(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/login", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_verify_token<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/verify-token", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn get_random_identity() -> String {
    let name: String = Username().fake();
    format!("{name}-{}", uuid::Uuid::new_v4().simple())
}
