use gatehouse_application::HashParams;
use gatehouse_core::{
    AccountState, CredentialRecord, CredentialStore, Identity, LookupError, Password, StoredHash,
};
use secrecy::Secret;
use sqlx::{FromRow, Pool, Postgres};

use crate::persistence::{ProvisioningError, compute_secret_hash};

#[derive(FromRow)]
struct CredentialRow {
    identity: String,
    secret_hash: String,
    account_state: String,
}

impl TryFrom<CredentialRow> for CredentialRecord {
    type Error = LookupError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        let identity = Identity::parse(row.identity)
            .map_err(|e| LookupError::StoreUnavailable(e.to_string()))?;

        Ok(CredentialRecord::new(
            identity,
            StoredHash::new(Secret::new(row.secret_hash)),
            AccountState::from_stored(&row.account_state),
        ))
    }
}

pub struct PostgresCredentialStore {
    pool: sqlx::PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresCredentialStore { pool }
    }

    /// Hash `secret` and insert a new row for `identity`.
    #[tracing::instrument(name = "Adding credential to PostgreSQL", skip_all)]
    pub async fn add_credential(
        &self,
        identity: &Identity,
        secret: Password,
        account_state: AccountState,
        params: HashParams,
    ) -> Result<(), ProvisioningError> {
        let secret_hash = compute_secret_hash(secret, params)
            .await
            .map_err(ProvisioningError::Unexpected)?;

        sqlx::query(
            r#"
                INSERT INTO credentials (identity, secret_hash, account_state)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(identity.as_str())
        .bind(secret_hash.as_phc())
        .bind(account_state.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return ProvisioningError::AlreadyExists;
                }
            }
            ProvisioningError::Unexpected(e.to_string())
        })?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl CredentialStore for PostgresCredentialStore {
    /// The identity is only ever sent as a bound parameter.
    #[tracing::instrument(name = "Retrieving credential from PostgreSQL", skip_all)]
    async fn lookup(&self, identity: &Identity) -> Result<CredentialRecord, LookupError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
                SELECT identity, secret_hash, account_state
                FROM credentials
                WHERE identity = $1
            "#,
        )
        .bind(identity.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LookupError::StoreUnavailable(e.to_string()))?;

        let Some(row) = row else {
            return Err(LookupError::NotFound);
        };

        row.try_into()
    }
}
