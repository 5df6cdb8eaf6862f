//! Test helper module
//!
//! Provides a mock control-plane client and convenient test factory methods.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use storage_cache_provider::{
    AccountListKeysResult, AccountListResult, AccountProperties, AccountsClient, ClientError,
    StorageAccount, StorageAccountKey,
};
use tokio::sync::RwLock;

use crate::services::AccountRegistry;

// ===== MockAccountsClient =====

pub struct MockAccountsClient {
    accounts: RwLock<Vec<StorageAccount>>,
    keys: RwLock<HashMap<String, AccountListKeysResult>>,
    /// If true, `list` returns a response without an account list
    missing_value: RwLock<bool>,
    /// If Some, `list` returns this error
    list_error: RwLock<Option<ClientError>>,
    /// If Some, `list_keys` returns this error
    list_keys_error: RwLock<Option<ClientError>>,
    list_keys_requests: RwLock<Vec<(String, String)>>,
    delay: Option<Duration>,
    list_calls: AtomicUsize,
    list_keys_calls: AtomicUsize,
    lists_in_flight: AtomicUsize,
    max_concurrent_lists: AtomicUsize,
}

impl MockAccountsClient {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(Vec::new()),
            keys: RwLock::new(HashMap::new()),
            missing_value: RwLock::new(false),
            list_error: RwLock::new(None),
            list_keys_error: RwLock::new(None),
            list_keys_requests: RwLock::new(Vec::new()),
            delay: None,
            list_calls: AtomicUsize::new(0),
            list_keys_calls: AtomicUsize::new(0),
            lists_in_flight: AtomicUsize::new(0),
            max_concurrent_lists: AtomicUsize::new(0),
        }
    }

    /// Make every remote call sleep for `delay` first.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn set_accounts(&self, accounts: Vec<StorageAccount>) {
        *self.accounts.write().await = accounts;
    }

    pub async fn set_keys(&self, account_name: &str, keys: AccountListKeysResult) {
        self.keys
            .write()
            .await
            .insert(account_name.to_string(), keys);
    }

    pub async fn set_missing_value(&self, missing: bool) {
        *self.missing_value.write().await = missing;
    }

    pub async fn set_list_error(&self, err: Option<ClientError>) {
        *self.list_error.write().await = err;
    }

    pub async fn set_list_keys_error(&self, err: Option<ClientError>) {
        *self.list_keys_error.write().await = err;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn list_keys_calls(&self) -> usize {
        self.list_keys_calls.load(Ordering::SeqCst)
    }

    /// Highest number of `list` calls observed running at the same time.
    pub fn max_concurrent_lists(&self) -> usize {
        self.max_concurrent_lists.load(Ordering::SeqCst)
    }

    /// `(resource_group, account_name)` of every `list_keys` call, in order.
    pub async fn list_keys_requests(&self) -> Vec<(String, String)> {
        self.list_keys_requests.read().await.clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl AccountsClient for MockAccountsClient {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn list(&self) -> storage_cache_provider::Result<AccountListResult> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.lists_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_concurrent_lists.fetch_max(in_flight, Ordering::SeqCst);

        self.pause().await;
        let result = if let Some(err) = self.list_error.read().await.clone() {
            Err(err)
        } else if *self.missing_value.read().await {
            Ok(AccountListResult::default())
        } else {
            Ok(AccountListResult::from_accounts(
                self.accounts.read().await.clone(),
            ))
        };

        self.lists_in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn list_keys(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> storage_cache_provider::Result<AccountListKeysResult> {
        self.list_keys_calls.fetch_add(1, Ordering::SeqCst);
        self.list_keys_requests
            .write()
            .await
            .push((resource_group.to_string(), account_name.to_string()));

        self.pause().await;
        if let Some(err) = self.list_keys_error.read().await.clone() {
            return Err(err);
        }
        self.keys
            .read()
            .await
            .get(account_name)
            .cloned()
            .ok_or_else(|| ClientError::ResourceNotFound {
                resource: format!("{resource_group}/{account_name}"),
                raw_message: None,
            })
    }
}

// ===== Factory methods =====

/// Create a test `AccountRegistry` together with its mock client
pub fn create_test_registry() -> (AccountRegistry, Arc<MockAccountsClient>) {
    let client = Arc::new(MockAccountsClient::new());
    let registry = AccountRegistry::new(client.clone());
    (registry, client)
}

/// Canonical resource ID of a storage account in subscription `s`
pub fn account_id(resource_group: &str, name: &str) -> String {
    format!(
        "/subscriptions/s/resourceGroups/{resource_group}/providers/Microsoft.Storage/storageAccounts/{name}"
    )
}

/// Raw account with the given name and ID and a small properties blob
pub fn storage_account(name: &str, id: &str) -> StorageAccount {
    let mut other = serde_json::Map::new();
    other.insert("accessTier".to_string(), serde_json::Value::from("Hot"));
    StorageAccount {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        location: Some("westeurope".to_string()),
        kind: Some("StorageV2".to_string()),
        properties: Some(AccountProperties {
            provisioning_state: Some("Succeeded".to_string()),
            other,
            ..AccountProperties::default()
        }),
    }
}

/// `listKeys` response carrying the given key values, in order
pub fn key_result(values: &[&str]) -> AccountListKeysResult {
    AccountListKeysResult {
        keys: Some(
            values
                .iter()
                .enumerate()
                .map(|(i, value)| StorageAccountKey {
                    key_name: Some(format!("key{}", i + 1)),
                    value: Some((*value).to_string()),
                    permissions: Some("FULL".to_string()),
                })
                .collect(),
        ),
    }
}
