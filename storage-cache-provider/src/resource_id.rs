//! Storage account resource ID parsing
//!
//! `/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Storage/storageAccounts/{name}`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PROVIDER_NAMESPACE: &str = "Microsoft.Storage";

/// Resource ID parse failure.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", content = "details")]
pub enum ResourceIdError {
    #[error("resource ID is empty")]
    Empty,

    #[error("resource ID must start with '/'")]
    NotAbsolute,

    #[error("resource ID has an odd number of segments: every key needs a value")]
    UnpairedSegment,

    #[error("resource ID has no `{0}` segment")]
    MissingSegment(String),

    #[error("resource ID segment `{0}` has an empty value")]
    EmptyValue(String),

    #[error("resource ID belongs to provider `{0}`, expected `Microsoft.Storage`")]
    WrongProvider(String),
}

/// Parsed storage account resource ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountId {
    pub subscription_id: String,
    pub resource_group: String,
    pub name: String,
}

impl AccountId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            name: name.into(),
        }
    }

    /// Parse a storage account resource ID.
    ///
    /// Segment keys are matched case-insensitively, the control plane is
    /// not consistent about `resourceGroups` vs `resourcegroups`.
    pub fn parse(raw: &str) -> Result<Self, ResourceIdError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ResourceIdError::Empty);
        }
        let Some(path) = raw.strip_prefix('/') else {
            return Err(ResourceIdError::NotAbsolute);
        };

        let segments: Vec<&str> = path.trim_end_matches('/').split('/').collect();
        if segments.len() % 2 != 0 {
            return Err(ResourceIdError::UnpairedSegment);
        }

        let mut subscription_id = None;
        let mut resource_group = None;
        let mut provider = None;
        let mut name = None;

        for pair in segments.chunks_exact(2) {
            let (key, value) = (pair[0], pair[1]);
            if value.is_empty() {
                return Err(ResourceIdError::EmptyValue(key.to_string()));
            }
            match key.to_ascii_lowercase().as_str() {
                "subscriptions" => subscription_id = Some(value),
                "resourcegroups" => resource_group = Some(value),
                "providers" => provider = Some(value),
                "storageaccounts" => name = Some(value),
                // Child resources (blobServices/default, ...) are ignored
                _ => {}
            }
        }

        if let Some(provider) = provider
            && !provider.eq_ignore_ascii_case(PROVIDER_NAMESPACE)
        {
            return Err(ResourceIdError::WrongProvider(provider.to_string()));
        }

        let missing = |segment: &str| ResourceIdError::MissingSegment(segment.to_string());
        Ok(Self {
            subscription_id: subscription_id.ok_or_else(|| missing("subscriptions"))?.to_string(),
            resource_group: resource_group.ok_or_else(|| missing("resourceGroups"))?.to_string(),
            name: name.ok_or_else(|| missing("storageAccounts"))?.to_string(),
        })
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{PROVIDER_NAMESPACE}/storageAccounts/{}",
            self.subscription_id, self.resource_group, self.name
        )
    }
}

impl FromStr for AccountId {
    type Err = ResourceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
