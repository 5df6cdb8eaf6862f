use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AccountListKeysResult, AccountListResult};

/// Storage accounts control-plane client.
///
/// Implementations carry no state the caller has to coordinate with, so they
/// may be invoked while the caller holds its own locks.
#[async_trait]
pub trait AccountsClient: Send + Sync {
    /// Client identifier, used in logs.
    fn id(&self) -> &'static str;

    /// Enumerate every storage account visible to the client.
    ///
    /// Paginated backends follow continuation links internally and return the
    /// concatenation of all pages.
    async fn list(&self) -> Result<AccountListResult>;

    /// List the access keys of one account.
    async fn list_keys(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> Result<AccountListKeysResult>;
}
