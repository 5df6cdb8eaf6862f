//! # storage-cache-provider
//!
//! Control-plane client abstraction for cloud storage accounts.
//!
//! The crate defines the [`AccountsClient`] trait consumed by the account
//! cache, the wire types it exchanges ([`StorageAccount`],
//! [`AccountListResult`], [`AccountListKeysResult`]), the storage account
//! resource ID parser ([`AccountId`]) and an Azure Resource Manager REST
//! implementation ([`ArmAccountsClient`]).
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use storage_cache_provider::{AccountsClient, ArmAccountsClient, ArmClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ArmClientConfig::from_env()?;
//!     let client = ArmAccountsClient::new(config)?;
//!
//!     let accounts = client.list().await?;
//!     for account in accounts.value.unwrap_or_default() {
//!         println!("{:?} -> {:?}", account.name, account.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All client operations return [`Result<T, ClientError>`](ClientError).
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are retried
//! with exponential backoff inside [`ArmAccountsClient`]; nothing above the
//! client retries.

mod arm;
mod config;
mod error;
mod http_client;
mod resource_id;
mod traits;
mod types;
mod utils;

pub use arm::ArmAccountsClient;
pub use config::{
    ArmClientConfig, ConfigError, DEFAULT_API_VERSION, DEFAULT_ENDPOINT, ENV_ACCESS_TOKEN,
    ENV_API_VERSION, ENV_ENDPOINT, ENV_MAX_RETRIES, ENV_SUBSCRIPTION_ID,
};
pub use error::{ClientError, Result};
pub use resource_id::{AccountId, ResourceIdError};
pub use traits::AccountsClient;
pub use types::{
    AccountKey, AccountListKeysResult, AccountListResult, AccountProperties, Endpoints,
    StorageAccount, StorageAccountKey,
};
