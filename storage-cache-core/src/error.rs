//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error types
pub use storage_cache_provider::{ClientError, ResourceIdError};

/// Account cache error type
///
/// Variants fall in two groups: validation errors (the control plane
/// returned malformed or incomplete data) and remote errors (a control-plane
/// call failed). "Account does not exist" is not an error, lookups report it
/// as `Ok(None)`.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CacheError {
    /// The raw account has no resource identifier
    #[error("`id` was missing for storage account {0:?}")]
    AccountIdMissing(String),

    /// The resource identifier could not be parsed
    #[error("Error parsing {id:?} as a storage account resource ID: {source}")]
    InvalidAccountId {
        account: String,
        id: String,
        source: ResourceIdError,
    },

    /// The enumeration response carried no account list
    #[error("Error loading storage accounts: the account list was missing from the response")]
    AccountListMissing,

    /// `listKeys` returned no usable key
    #[error("Keys were missing for storage account {account:?} (resource group {resource_group:?})")]
    KeysMissing {
        account: String,
        resource_group: String,
    },

    /// Enumerating accounts failed
    #[error("Error retrieving storage accounts: {0}")]
    ListAccounts(#[source] ClientError),

    /// Listing keys failed
    #[error(
        "Error listing keys for storage account {account:?} (resource group {resource_group:?}): {source}"
    )]
    ListKeys {
        account: String,
        resource_group: String,
        source: ClientError,
    },
}

impl CacheError {
    /// Malformed or incomplete data from the control plane.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::AccountIdMissing(_)
                | Self::InvalidAccountId { .. }
                | Self::AccountListMissing
                | Self::KeysMissing { .. }
        )
    }

    /// A control-plane call failed.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::ListAccounts(_) | Self::ListKeys { .. })
    }

    /// The underlying client error, for remote failures.
    #[must_use]
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::ListAccounts(e) | Self::ListKeys { source: e, .. } => Some(e),
            _ => None,
        }
    }

    /// Whether it is expected behavior, used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ListAccounts(e) | Self::ListKeys { source: e, .. } => e.is_expected(),
            _ => false,
        }
    }
}

/// Cache layer Result type alias
pub type CacheResult<T> = std::result::Result<T, CacheError>;
