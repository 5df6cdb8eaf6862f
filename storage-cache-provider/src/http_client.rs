//! Generic HTTP client tools
//!
//! Sends a prepared `RequestBuilder`, maps transport failures and status codes
//! to [`ClientError`], and retries transient failures with backoff.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Response body logging policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyLogging {
    /// Log a truncated copy of the body at `debug`.
    Truncated,
    /// Never log the body (it carries secrets).
    Suppressed,
}

/// ARM error envelope: `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ArmErrorResponse {
    error: ArmErrorBody,
}

#[derive(Debug, Deserialize)]
struct ArmErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Create an HTTP client with the given timeouts.
pub(crate) fn create_http_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client, ClientError> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
        .map_err(|e| ClientError::NetworkError {
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// HTTP tool function set
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the body of a 2xx response.
    ///
    /// Non-2xx responses are mapped to the matching [`ClientError`] variant.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
        body_logging: BodyLogging,
    ) -> Result<String, ClientError> {
        log::debug!("{method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                ClientError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("Response Status: {status_code}");

        // Extract Retry-After header (before consuming response body)
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let response_text = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        if body_logging == BodyLogging::Truncated {
            log::debug!("Response Body: {}", truncate_for_log(&response_text));
        }

        if (200..300).contains(&status_code) {
            return Ok(response_text);
        }

        let error = map_status(status_code, url, retry_after, &response_text);
        if error.is_expected() {
            log::warn!("{method_name} {url} failed: {error}");
        } else {
            log::error!("{method_name} {url} failed: {error}");
        }
        Err(error)
    }

    /// Parse JSON response
    pub fn parse_json<T>(response_text: &str, body_logging: BodyLogging) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("JSON parse failed: {e}");
            if body_logging == BodyLogging::Truncated {
                log::error!("Raw response: {}", truncate_for_log(response_text));
            }
            ClientError::ParseError {
                detail: e.to_string(),
            }
        })
    }

    /// Performs an HTTP request (with retries)
    ///
    /// # Retry strategy
    /// - Only transient errors are retried (see [`ClientError::is_retryable`])
    /// - Exponential backoff: 100ms, 200ms, 400ms, 800ms, ... (maximum 10 seconds)
    /// - `Retry-After` is honoured for rate limiting, capped at 30 seconds
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
        body_logging: BodyLogging,
        max_retries: u32,
    ) -> Result<String, ClientError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, method_name, url, body_logging).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder can only be used once
            let Some(req) = request_builder.try_clone() else {
                log::warn!("Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, method_name, url, body_logging)
                    .await;
            };

            match Self::execute_request(req, method_name, url, body_logging).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ClientError::NetworkError {
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// Map a non-2xx response to a [`ClientError`].
fn map_status(status_code: u16, url: &str, retry_after: Option<u64>, body: &str) -> ClientError {
    let arm_error = serde_json::from_str::<ArmErrorResponse>(body).ok();
    let raw_message = arm_error
        .as_ref()
        .and_then(|e| e.error.message.clone())
        .or_else(|| (!body.is_empty()).then(|| truncate_for_log(body)));

    match status_code {
        401 => ClientError::InvalidCredentials { raw_message },
        403 => ClientError::PermissionDenied { raw_message },
        404 => ClientError::ResourceNotFound {
            resource: resource_path(url),
            raw_message,
        },
        429 => ClientError::RateLimited {
            retry_after,
            raw_message,
        },
        502..=504 => ClientError::NetworkError {
            detail: format!("HTTP {status_code}: {}", raw_message.unwrap_or_default()),
        },
        _ => match arm_error {
            Some(ArmErrorResponse { error }) => ClientError::Unknown {
                status: status_code,
                raw_code: error.code,
                raw_message: error.message.unwrap_or_default(),
            },
            None if body.trim_start().starts_with('{') => ClientError::ParseError {
                detail: format!("HTTP {status_code} with unrecognised error body"),
            },
            None => ClientError::Unknown {
                status: status_code,
                raw_code: None,
                raw_message: truncate_for_log(body),
            },
        },
    }
}

/// Strip scheme, host and query string from a request URL.
fn resource_path(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or(url);
    without_query
        .split_once("://")
        .and_then(|(_, rest)| rest.find('/').map(|i| rest[i..].to_string()))
        .unwrap_or_else(|| without_query.to_string())
}

/// Calculate retry delay
///
/// Use `retry_after` (capped at 30s) when rate limited, otherwise exponential backoff.
fn retry_delay(error: &ClientError, attempt: u32) -> Duration {
    if let ClientError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// Calculate exponential backoff delay
///
/// Backoff strategy: 100ms, 200ms, 400ms, 800ms, 1.6s, ...
/// Maximum delay limit is 10 seconds
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // Prevent 2^attempt from overflowing
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    let delay_ms = delay_ms.min(10_000);
    Duration::from_millis(delay_ms)
}
