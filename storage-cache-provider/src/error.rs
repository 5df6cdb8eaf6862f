use serde::{Deserialize, Serialize};

/// Unified error type for all control-plane client operations.
///
/// Every variant is serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API rate limit exceeded
///
/// The built-in HTTP client retries these with exponential backoff. Callers
/// above the client (the account cache) never retry on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ClientError {
    /// A network-level error occurred (DNS resolution failure, connection refused, HTTP 502-504).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The bearer token is missing, invalid or expired (HTTP 401).
    InvalidCredentials {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The caller lacks permission for the requested operation (HTTP 403).
    PermissionDenied {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The addressed subscription, resource group or account does not exist (HTTP 404).
    ResourceNotFound {
        /// Path of the resource that was not found.
        resource: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// The client configuration was rejected before any request was sent.
    InvalidConfig {
        /// Why the configuration is unusable.
        detail: String,
    },

    /// An unrecognized error from the API.
    Unknown {
        /// HTTP status code of the response.
        status: u16,
        /// Error code from the ARM error body, if available.
        raw_code: Option<String>,
        /// Error message from the ARM error body (or the raw body).
        raw_message: String,
    },
}

impl ClientError {
    /// Whether the failure is transient and the request may be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// Whether it is expected behavior (bad input, missing resource, etc.), used for log levelling.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::ResourceNotFound { .. }
                | Self::InvalidConfig { .. }
        )
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "Rate limited")
                }
            }
            Self::InvalidCredentials { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Invalid credentials: {msg}")
                } else {
                    write!(f, "Invalid credentials")
                }
            }
            Self::PermissionDenied { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Permission denied: {msg}")
                } else {
                    write!(f, "Permission denied")
                }
            }
            Self::ResourceNotFound {
                resource,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "Resource '{resource}' not found: {msg}")
                } else {
                    write!(f, "Resource '{resource}' not found")
                }
            }
            Self::ParseError { detail } => write!(f, "Parse error: {detail}"),
            Self::InvalidConfig { detail } => write!(f, "Invalid client configuration: {detail}"),
            Self::Unknown {
                status,
                raw_code,
                raw_message,
            } => {
                if let Some(code) = raw_code {
                    write!(f, "HTTP {status} ({code}): {raw_message}")
                } else {
                    write!(f, "HTTP {status}: {raw_message}")
                }
            }
        }
    }
}

impl std::error::Error for ClientError {}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
