//! Account record type definition

use storage_cache_provider::{
    AccountId, AccountKey, AccountProperties, AccountsClient, StorageAccount,
};

use crate::error::{CacheError, CacheResult};
use crate::services::CredentialResolver;

/// One storage account as known to the cache.
///
/// Everything except the access key is immutable after construction. The key
/// slot goes from empty to resolved at most once and is shared by every
/// holder of the record's `Arc`.
#[derive(Debug)]
pub struct AccountRecord {
    name: String,
    id: String,
    resource_group: String,
    properties: Option<AccountProperties>,
    credentials: CredentialResolver,
}

impl AccountRecord {
    /// Build a record from the control plane's representation.
    ///
    /// Pure: takes no locks and touches no shared state.
    ///
    /// # Errors
    /// * `AccountIdMissing` - the representation has no (or an empty) `id`
    /// * `InvalidAccountId` - the `id` is not a storage account resource ID
    pub fn from_remote(name: &str, account: &StorageAccount) -> CacheResult<Self> {
        let id = account
            .id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| CacheError::AccountIdMissing(name.to_string()))?;

        let parsed = AccountId::parse(id).map_err(|source| CacheError::InvalidAccountId {
            account: name.to_string(),
            id: id.to_string(),
            source,
        })?;

        Ok(Self {
            name: name.to_string(),
            id: id.to_string(),
            resource_group: parsed.resource_group,
            properties: account.properties.clone(),
            credentials: CredentialResolver::new(),
        })
    }

    /// Short account name (the cache key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full resource identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn resource_group(&self) -> &str {
        &self.resource_group
    }

    /// Properties blob exactly as the control plane returned it.
    pub fn properties(&self) -> Option<&AccountProperties> {
        self.properties.as_ref()
    }

    /// The access key if it has already been resolved. Never calls out.
    pub async fn cached_key(&self) -> Option<AccountKey> {
        self.credentials.cached().await
    }

    /// Resolve the account's access key, fetching it from `client` on first use.
    ///
    /// # Errors
    /// * `ListKeys` - the `listKeys` call failed
    /// * `KeysMissing` - the response carried no usable key
    pub async fn account_key(&self, client: &dyn AccountsClient) -> CacheResult<AccountKey> {
        self.credentials
            .resolve(&self.name, &self.resource_group, client)
            .await
    }
}
