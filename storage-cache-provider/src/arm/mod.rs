//! Azure Resource Manager storage accounts client

mod client;

use reqwest::Client;

use crate::config::ArmClientConfig;
use crate::error::{ClientError, Result};
use crate::http_client::create_http_client;

/// Maximum number of `nextLink` pages followed by one listing.
pub(crate) const MAX_LIST_PAGES: usize = 1_000;

/// [`AccountsClient`](crate::AccountsClient) backed by the ARM REST API.
pub struct ArmAccountsClient {
    pub(crate) client: Client,
    pub(crate) config: ArmClientConfig,
}

impl ArmAccountsClient {
    /// Validate the configuration and build the HTTP client.
    pub fn new(config: ArmClientConfig) -> Result<Self> {
        config.validate().map_err(|e| ClientError::InvalidConfig {
            detail: e.to_string(),
        })?;
        let client = create_http_client(config.connect_timeout(), config.request_timeout())?;
        Ok(Self { client, config })
    }
}
