use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============ Accounts ============

/// Raw storage account as returned by the control plane.
///
/// Every field is optional because the remote API does not guarantee any of
/// them; consumers decide which ones are mandatory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAccount {
    /// Full resource identifier (`/subscriptions/.../storageAccounts/{name}`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Short account name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Azure region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Account kind (`StorageV2`, `BlobStorage`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Account properties blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<AccountProperties>,
}

/// Storage account properties.
///
/// Only a handful of fields are typed; everything else the API sends is kept
/// in [`other`](Self::other) so the blob passes through unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_endpoints: Option<Endpoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hns_enabled: Option<bool>,
    /// Untyped remainder of the properties object.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Data-plane endpoints of a storage account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dfs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<String>,
}

/// One page (or the concatenation of all pages) of an account enumeration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountListResult {
    /// Accounts in this response. `None` means the response was malformed.
    #[serde(default)]
    pub value: Option<Vec<StorageAccount>>,
    /// Continuation URL, present while more pages remain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}

impl AccountListResult {
    /// Build a complete (single page) listing.
    pub fn from_accounts(accounts: Vec<StorageAccount>) -> Self {
        Self {
            value: Some(accounts),
            next_link: None,
        }
    }
}

// ============ Keys ============

/// Response of the `listKeys` action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountListKeysResult {
    #[serde(default)]
    pub keys: Option<Vec<StorageAccountKey>>,
}

impl AccountListKeysResult {
    /// First key value, if the response carries a non-empty one.
    pub fn first_value(&self) -> Option<&str> {
        self.keys
            .as_deref()
            .and_then(<[StorageAccountKey]>::first)
            .and_then(|key| key.value.as_deref())
            .filter(|value| !value.is_empty())
    }
}

/// One access key of a storage account.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAccountKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// `Read` or `Full`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

impl std::fmt::Debug for StorageAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageAccountKey")
            .field("key_name", &self.key_name)
            .field("value", &self.value.as_ref().map(|_| "<redacted>"))
            .field("permissions", &self.permissions)
            .finish()
    }
}

/// A resolved storage account access key.
///
/// `Debug` never prints the secret; use [`expose`](Self::expose) to read it.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountKey(String);

impl AccountKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw key value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccountKey(<redacted>)")
    }
}
