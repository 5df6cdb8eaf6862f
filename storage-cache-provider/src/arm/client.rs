//! ARM REST calls and the `AccountsClient` implementation

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use crate::http_client::{BodyLogging, HttpUtils};
use crate::traits::AccountsClient;
use crate::types::{AccountListKeysResult, AccountListResult};

use super::{ArmAccountsClient, MAX_LIST_PAGES};

const CLIENT_ID: &str = "azure-arm";

impl ArmAccountsClient {
    /// `GET .../providers/Microsoft.Storage/storageAccounts`
    pub(crate) fn list_url(&self) -> String {
        format!(
            "{}/subscriptions/{}/providers/Microsoft.Storage/storageAccounts?api-version={}",
            self.config.base_url(),
            urlencoding::encode(&self.config.subscription_id),
            urlencoding::encode(&self.config.api_version),
        )
    }

    /// `POST .../storageAccounts/{name}/listKeys`
    pub(crate) fn list_keys_url(&self, resource_group: &str, account_name: &str) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Storage/storageAccounts/{}/listKeys?api-version={}",
            self.config.base_url(),
            urlencoding::encode(&self.config.subscription_id),
            urlencoding::encode(resource_group),
            urlencoding::encode(account_name),
            urlencoding::encode(&self.config.api_version),
        )
    }

    /// `nextLink` values are absolute URLs, but only ones with the configured
    /// endpoint's scheme, host and port are followed so the bearer token never
    /// leaves it.
    fn checked_next_link(&self, next_link: &str) -> Result<String> {
        let outside = || ClientError::ParseError {
            detail: format!("nextLink {next_link:?} points outside the configured endpoint"),
        };
        let base = Url::parse(self.config.base_url()).map_err(|e| ClientError::InvalidConfig {
            detail: format!("endpoint {:?}: {e}", self.config.base_url()),
        })?;
        let next = Url::parse(next_link).map_err(|_| outside())?;

        let same_origin = next.scheme() == base.scheme()
            && next.host_str().is_some()
            && next.host_str() == base.host_str()
            && next.port_or_known_default() == base.port_or_known_default();
        if same_origin {
            Ok(next_link.to_string())
        } else {
            Err(outside())
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self.client.get(url).bearer_auth(&self.config.access_token);
        let body = HttpUtils::execute_request_with_retry(
            request,
            "GET",
            url,
            BodyLogging::Truncated,
            self.config.max_retries,
        )
        .await?;
        HttpUtils::parse_json(&body, BodyLogging::Truncated)
    }

    async fn post_secret<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self
            .client
            .post(url)
            .bearer_auth(&self.config.access_token)
            .header(reqwest::header::CONTENT_LENGTH, 0);
        let body = HttpUtils::execute_request_with_retry(
            request,
            "POST",
            url,
            BodyLogging::Suppressed,
            self.config.max_retries,
        )
        .await?;
        HttpUtils::parse_json(&body, BodyLogging::Suppressed)
    }
}

#[async_trait]
impl AccountsClient for ArmAccountsClient {
    fn id(&self) -> &'static str {
        CLIENT_ID
    }

    async fn list(&self) -> Result<AccountListResult> {
        let first: AccountListResult = self.get(&self.list_url()).await?;
        collect_pages(first, MAX_LIST_PAGES, |next_link| async move {
            let url = self.checked_next_link(&next_link)?;
            self.get(&url).await
        })
        .await
    }

    async fn list_keys(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> Result<AccountListKeysResult> {
        let result: AccountListKeysResult = self
            .post_secret(&self.list_keys_url(resource_group, account_name))
            .await?;

        if log::log_enabled!(log::Level::Debug) {
            for key in result.keys.iter().flatten() {
                log::debug!(
                    "[{CLIENT_ID}] {account_name}: key {:?} ({})",
                    key.key_name,
                    if key.value.is_some() { "value present" } else { "no value" }
                );
            }
        }
        Ok(result)
    }
}

/// Follow `nextLink` from `first` and concatenate every page's accounts.
///
/// A first page without `value` is returned as-is. Later pages without
/// `value` contribute nothing. More than `max_pages` pages is an error.
pub(crate) async fn collect_pages<F, Fut>(
    mut first: AccountListResult,
    max_pages: usize,
    mut fetch_next: F,
) -> Result<AccountListResult>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<AccountListResult>>,
{
    let Some(mut accounts) = first.value.take() else {
        // Malformed first page, let the caller decide
        return Ok(first);
    };

    let mut next_link = first.next_link.take();
    let mut pages = 1;
    while let Some(link) = next_link {
        if pages >= max_pages {
            return Err(ClientError::ParseError {
                detail: format!("account listing exceeded {max_pages} pages"),
            });
        }
        let mut page = fetch_next(link).await?;
        accounts.extend(page.value.take().unwrap_or_default());
        next_link = page.next_link.take();
        pages += 1;
    }

    log::debug!(
        "[{CLIENT_ID}] Listed {} storage accounts across {pages} page(s)",
        accounts.len()
    );
    Ok(AccountListResult::from_accounts(accounts))
}
