//! Storage Account Cache Core Library
//!
//! In-process cache of storage account metadata and access keys in front of
//! a control-plane [`AccountsClient`]:
//! - [`AccountRegistry`] maps account names to shared [`AccountRecord`]s and
//!   populates itself by enumerating the control plane on a miss.
//! - [`CredentialResolver`] fetches each record's access key on first use and
//!   caches it for the record's lifetime.
//!
//! Entries never expire and are only evicted explicitly. The registry is a
//! plain value: create one per client (or per test) and share it by `Arc`.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use storage_cache_core::AccountRegistry;
//! use storage_cache_provider::{ArmAccountsClient, ArmClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArmAccountsClient::new(ArmClientConfig::from_env()?)?;
//! let registry = AccountRegistry::new(Arc::new(client));
//!
//! if let Some(account) = registry.find_account("acct1").await? {
//!     let key = registry.account_key(&account).await?;
//!     println!("{} in {}: {} byte key", account.name(), account.resource_group(), key.expose().len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CacheError, CacheResult};
pub use services::{AccountRegistry, CredentialResolver};
pub use storage_cache_provider::AccountsClient;
pub use types::AccountRecord;
