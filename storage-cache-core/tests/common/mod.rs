//! Shared test tools for cache integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use storage_cache_provider::{
    AccountListKeysResult, AccountListResult, AccountsClient, ClientError, Result, StorageAccount,
    StorageAccountKey,
};

/// Fixed-content control plane with call counters.
pub struct StubAccountsClient {
    accounts: Vec<StorageAccount>,
    keys: HashMap<String, String>,
    delay: Duration,
    pub list_calls: AtomicUsize,
    pub list_keys_calls: AtomicUsize,
}

impl StubAccountsClient {
    /// `accounts` are `(name, resource_group, key)` triples.
    pub fn new(accounts: &[(&str, &str, &str)], delay: Duration) -> Self {
        Self {
            accounts: accounts
                .iter()
                .map(|(name, rg, _)| StorageAccount {
                    id: Some(format!(
                        "/subscriptions/s/resourceGroups/{rg}/providers/Microsoft.Storage/storageAccounts/{name}"
                    )),
                    name: Some((*name).to_string()),
                    ..StorageAccount::default()
                })
                .collect(),
            keys: accounts
                .iter()
                .map(|(name, _, key)| ((*name).to_string(), (*key).to_string()))
                .collect(),
            delay,
            list_calls: AtomicUsize::new(0),
            list_keys_calls: AtomicUsize::new(0),
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn list_keys_calls(&self) -> usize {
        self.list_keys_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountsClient for StubAccountsClient {
    fn id(&self) -> &'static str {
        "stub"
    }

    async fn list(&self) -> Result<AccountListResult> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(AccountListResult::from_accounts(self.accounts.clone()))
    }

    async fn list_keys(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> Result<AccountListKeysResult> {
        self.list_keys_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        let value = self
            .keys
            .get(account_name)
            .cloned()
            .ok_or_else(|| ClientError::ResourceNotFound {
                resource: format!("{resource_group}/{account_name}"),
                raw_message: None,
            })?;
        Ok(AccountListKeysResult {
            keys: Some(vec![StorageAccountKey {
                key_name: Some("key1".to_string()),
                value: Some(value),
                permissions: Some("FULL".to_string()),
            }]),
        })
    }
}
