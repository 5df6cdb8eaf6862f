//! Account registry
//!
//! Name → record cache in front of the control plane. Lookups that miss
//! enumerate every account once and populate the cache with all of them.

use std::collections::HashMap;
use std::sync::Arc;

use storage_cache_provider::{AccountKey, AccountsClient, StorageAccount};
use tokio::sync::{Mutex, RwLock};

use crate::error::{CacheError, CacheResult};
use crate::types::AccountRecord;

/// Storage account registry
///
/// Records are handed out as `Arc<AccountRecord>`, so a key resolved through
/// one handle is visible through every other handle to the same record.
///
/// Two locks are involved:
/// - `accounts` guards the mapping and is only held for map reads and writes.
/// - `population` serializes every writer. A miss holds it across the whole
///   enumerate-and-populate sequence, remote call included, so at most one
///   enumeration is in flight per registry. Inserts and removals wait for an
///   in-flight miss and are never undone by it. Hits only take `accounts`.
pub struct AccountRegistry {
    client: Arc<dyn AccountsClient>,
    accounts: RwLock<HashMap<String, Arc<AccountRecord>>>,
    population: Mutex<()>,
}

impl AccountRegistry {
    /// Create an empty registry backed by `client`.
    #[must_use]
    pub fn new(client: Arc<dyn AccountsClient>) -> Self {
        Self {
            client,
            accounts: RwLock::new(HashMap::new()),
            population: Mutex::new(()),
        }
    }

    /// Insert (or replace) the record for `account_name`.
    ///
    /// Nothing is inserted when the account cannot be turned into a record.
    /// Waits for an in-flight miss to finish.
    pub async fn add_to_cache(&self, account_name: &str, account: &StorageAccount) -> CacheResult<()> {
        let record = AccountRecord::from_remote(account_name, account)?;
        let _population = self.population.lock().await;
        self.accounts
            .write()
            .await
            .insert(account_name.to_string(), Arc::new(record));
        log::debug!("Cached storage account {account_name:?}");
        Ok(())
    }

    /// Evict `account_name`. Evicting an absent name is a no-op.
    ///
    /// Waits for an in-flight miss to finish, so the next lookup of the name
    /// enumerates afresh.
    pub async fn remove_account_from_cache(&self, account_name: &str) {
        let _population = self.population.lock().await;
        if self.accounts.write().await.remove(account_name).is_some() {
            log::debug!("Evicted storage account {account_name:?}");
        }
    }

    /// Find an account, enumerating the control plane on a miss.
    ///
    /// # Returns
    /// * `Ok(Some(record))` - the account is cached or was found by enumeration
    /// * `Ok(None)` - enumeration succeeded and the account does not exist
    /// * `Err(_)` - enumeration failed or returned malformed data; accounts
    ///   cached before the failure stay cached
    pub async fn find_account(&self, account_name: &str) -> CacheResult<Option<Arc<AccountRecord>>> {
        if let Some(record) = self.get(account_name).await {
            log::debug!("Cache Hit - storage account {account_name:?}");
            return Ok(Some(record));
        }

        let _population = self.population.lock().await;

        // A miss that queued behind this one may already have populated the name
        if let Some(record) = self.get(account_name).await {
            log::debug!("Cache Hit - storage account {account_name:?} (populated while waiting)");
            return Ok(Some(record));
        }

        log::debug!(
            "Cache Miss - enumerating storage accounts via {} to find {account_name:?}..",
            self.client.id()
        );
        let listing = self.client.list().await.map_err(|e| {
            let err = CacheError::ListAccounts(e);
            if err.is_expected() {
                log::warn!("{err}");
            } else {
                log::error!("{err}");
            }
            err
        })?;
        let accounts = listing.value.ok_or(CacheError::AccountListMissing)?;

        self.populate(&accounts).await?;

        let found = self.get(account_name).await;
        if found.is_none() {
            log::debug!("Storage account {account_name:?} does not exist");
        }
        Ok(found)
    }

    /// Find `account_name` and resolve its access key in one step.
    ///
    /// `Ok(None)` when the account does not exist.
    pub async fn find_account_key(&self, account_name: &str) -> CacheResult<Option<AccountKey>> {
        match self.find_account(account_name).await? {
            Some(record) => self.account_key(&record).await.map(Some),
            None => Ok(None),
        }
    }

    /// Resolve the access key of `record` through this registry's client.
    pub async fn account_key(&self, record: &AccountRecord) -> CacheResult<AccountKey> {
        record.account_key(self.client.as_ref()).await
    }

    /// Number of cached accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    /// Whether `account_name` is cached. Never calls out.
    pub async fn contains(&self, account_name: &str) -> bool {
        self.accounts.read().await.contains_key(account_name)
    }

    /// Names of all cached accounts, unordered.
    pub async fn cached_account_names(&self) -> Vec<String> {
        self.accounts.read().await.keys().cloned().collect()
    }

    async fn get(&self, account_name: &str) -> Option<Arc<AccountRecord>> {
        self.accounts.read().await.get(account_name).cloned()
    }

    /// Insert every named account under its own name.
    ///
    /// Stops at the first account that cannot be turned into a record; the
    /// ones inserted before it stay.
    async fn populate(&self, accounts: &[StorageAccount]) -> CacheResult<()> {
        let mut cache = self.accounts.write().await;
        let mut populated = 0_usize;

        for account in accounts {
            let Some(name) = account.name.as_deref() else {
                log::warn!("Skipping storage account without a name (id {:?})", account.id);
                continue;
            };
            let record = AccountRecord::from_remote(name, account).inspect_err(|e| {
                log::warn!("Stopping population after {populated} account(s): {e}");
            })?;
            cache.insert(name.to_string(), Arc::new(record));
            populated += 1;
        }

        log::info!(
            "Populated {populated} storage account(s), {} cached in total",
            cache.len()
        );
        Ok(())
    }
}
