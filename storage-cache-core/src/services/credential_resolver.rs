//! Lazy access key resolution
//!
//! Each record owns one resolver. The key is fetched on first use under the
//! resolver's lock and cached for the lifetime of the record.

use storage_cache_provider::{AccountKey, AccountsClient};
use tokio::sync::Mutex;

use crate::error::{CacheError, CacheResult};

/// Access key slot of one account record.
#[derive(Debug, Default)]
pub struct CredentialResolver {
    key: Mutex<Option<AccountKey>>,
}

impl CredentialResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The resolved key, if any.
    pub async fn cached(&self) -> Option<AccountKey> {
        self.key.lock().await.clone()
    }

    /// Return the cached key or fetch, store and return the first key of `account_name`.
    ///
    /// The lock is held for the whole check-fetch-store sequence, so
    /// concurrent callers wait for the first fetch instead of issuing their
    /// own. A failed fetch leaves the slot empty.
    pub async fn resolve(
        &self,
        account_name: &str,
        resource_group: &str,
        client: &dyn AccountsClient,
    ) -> CacheResult<AccountKey> {
        let mut slot = self.key.lock().await;

        if let Some(key) = slot.as_ref() {
            log::debug!("Cache Hit - account key for storage account {account_name:?}");
            return Ok(key.clone());
        }

        log::debug!(
            "Cache Miss - looking up the account key for storage account {account_name:?} via {}..",
            client.id()
        );
        let result = client
            .list_keys(resource_group, account_name)
            .await
            .map_err(|source| {
                let err = CacheError::ListKeys {
                    account: account_name.to_string(),
                    resource_group: resource_group.to_string(),
                    source,
                };
                if err.is_expected() {
                    log::warn!("{err}");
                } else {
                    log::error!("{err}");
                }
                err
            })?;

        let Some(value) = result.first_value() else {
            log::warn!(
                "listKeys returned no usable key for storage account {account_name:?} (resource group {resource_group:?})"
            );
            return Err(CacheError::KeysMissing {
                account: account_name.to_string(),
                resource_group: resource_group.to_string(),
            });
        };

        let key = AccountKey::new(value);
        *slot = Some(key.clone());
        Ok(key)
    }
}
