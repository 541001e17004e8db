use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use gatehouse_application::HashParams;
use gatehouse_core::{
    AccountState, CredentialRecord, CredentialStore, Identity, LookupError, Password,
};

use crate::persistence::{ProvisioningError, compute_secret_hash};

/// In-memory store keyed by the exact identity string.
#[derive(Default, Clone)]
pub struct HashMapCredentialStore {
    credentials: Arc<RwLock<HashMap<Identity, CredentialRecord>>>,
}

impl HashMapCredentialStore {
    pub fn new() -> Self {
        Self {
            credentials: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn insert(&self, record: CredentialRecord) -> Result<(), ProvisioningError> {
        let mut credentials = self.credentials.write().await;
        if credentials.contains_key(&record.identity) {
            return Err(ProvisioningError::AlreadyExists);
        }
        credentials.insert(record.identity.clone(), record);
        Ok(())
    }

    /// Hash `secret` and store it under `identity`.
    pub async fn add_credential(
        &self,
        identity: Identity,
        secret: Password,
        account_state: AccountState,
        params: HashParams,
    ) -> Result<(), ProvisioningError> {
        let secret_hash = compute_secret_hash(secret, params)
            .await
            .map_err(ProvisioningError::Unexpected)?;

        self.insert(CredentialRecord::new(identity, secret_hash, account_state))
            .await
    }
}

#[async_trait::async_trait]
impl CredentialStore for HashMapCredentialStore {
    async fn lookup(&self, identity: &Identity) -> Result<CredentialRecord, LookupError> {
        let credentials = self.credentials.read().await;
        credentials
            .get(identity)
            .cloned()
            .ok_or(LookupError::NotFound)
    }
}
