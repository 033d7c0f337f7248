//! Error types for Statuspage API calls.
//!
//! Every failed call surfaces one [`Error`]. Errors produced by an HTTP attempt
//! carry a [`Classification`] that drives retry eligibility: transient failures
//! are retried by a [`RetryPolicy`](crate::RetryPolicy), permanent ones surface
//! on first occurrence.

use crate::rate_limit::RateLimitInfo;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, Uri};
use std::time::Duration;

/// Boxed error used for opaque transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The semantic category assigned to a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// No response was received (connection failure, timeout, reset).
    TransientNetwork,
    /// The server failed (500, 502, 503, 504) or rate limited the call (420, 429).
    TransientServer,
    /// The request itself was rejected (any other non-2xx status).
    PermanentClient,
    /// A successful response carried a body that could not be decoded.
    DecodeFailure,
}

impl Classification {
    /// Returns `true` for the categories a retry can plausibly fix.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            Classification::TransientNetwork | Classification::TransientServer
        )
    }
}

/// A failure below the HTTP layer: no response was received.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// The attempt exceeded the transport's timeout.
    #[error("request timed out")]
    Timeout,

    /// Any other network-level failure (DNS, connect, reset, TLS, ...).
    #[error("network error: {0}")]
    Network(#[source] BoxError),
}

impl TransportError {
    /// Wraps an arbitrary error as a network failure.
    pub fn network(error: impl Into<BoxError>) -> Self {
        TransportError::Network(error.into())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Network(Box::new(error))
        }
    }
}

/// A non-2xx response, classified by the response classifier.
///
/// The `Display` form mirrors the request line and the resolved message, e.g.
/// `GET https://api.statuspage.io/v1/pages/x: 404 Resource not found`.
#[derive(thiserror::Error, Debug, Clone)]
#[error("{method} {uri}: {} {message}", status.as_u16())]
pub struct ApiError {
    /// Retry category of this failure.
    pub classification: Classification,
    /// The HTTP status code returned by the API.
    pub status: StatusCode,
    /// The body-provided `message`, or the canonical message for the status.
    pub message: String,
    /// Method of the request that failed.
    pub method: Method,
    /// Target URI of the request that failed.
    pub uri: Uri,
    /// Response headers of the failed attempt.
    pub headers: HeaderMap,
    /// Rate limit hints, present only for rate-limit statuses.
    pub rate_limit: Option<RateLimitInfo>,
}

impl ApiError {
    /// Returns `true` if the API rejected the call for exceeding its rate limit.
    pub fn is_rate_limited(&self) -> bool {
        crate::classify::is_rate_limit(self.status)
    }
}

/// The main error type for Statuspage API calls.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The relative path could not be resolved against the base address,
    /// or the base address itself is malformed.
    #[error("Invalid URI `{uri}`: {reason}")]
    InvalidUri {
        /// The offending input.
        uri: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No response was received.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A 2xx response body could not be decoded into the requested type.
    #[error("Failed to decode response (status {status}): {source}")]
    Decode {
        /// The HTTP status code of the response.
        status: StatusCode,
        /// The raw response body.
        raw_body: Bytes,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Invalid client or policy configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The call was cancelled before any attempt completed.
    #[error("Request cancelled before any attempt completed")]
    Cancelled,
}

impl Error {
    pub(crate) fn invalid_uri(uri: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidUri {
            uri: uri.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns the retry category of this error.
    ///
    /// Local errors (invalid URI, serialization, configuration, cancellation)
    /// never reached the API and have no classification.
    pub fn classification(&self) -> Option<Classification> {
        match self {
            Error::Transport(_) => Some(Classification::TransientNetwork),
            Error::Decode { .. } => Some(Classification::DecodeFailure),
            Error::Api(err) => Some(err.classification),
            Error::InvalidUri { .. }
            | Error::Serialization(_)
            | Error::Configuration(_)
            | Error::Cancelled => None,
        }
    }

    /// Returns `true` if this error is transient and worth retrying.
    ///
    /// # Examples
    ///
    /// ```
    /// use statuspage::{Error, TransportError};
    ///
    /// assert!(Error::Transport(TransportError::Timeout).is_retryable());
    /// assert!(!Error::Configuration("bad".to_string()).is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        self.classification()
            .is_some_and(Classification::is_transient)
    }

    /// Returns the HTTP status code if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api(err) => Some(err.status),
            Error::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the classified API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the server-requested delay before retrying, capped by `max_wait`.
    pub fn rate_limit_delay(&self, max_wait: Duration) -> Option<Duration> {
        self.api_error()?.rate_limit.as_ref()?.delay(max_wait)
    }
}

/// A specialized `Result` type for Statuspage API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, classification: Classification) -> Error {
        Error::Api(ApiError {
            classification,
            status: StatusCode::from_u16(status).unwrap(),
            message: "boom".to_string(),
            method: Method::GET,
            uri: Uri::from_static("https://api.statuspage.io/v1/pages"),
            headers: HeaderMap::new(),
            rate_limit: None,
        })
    }

    #[test]
    fn test_retryable_classifications() {
        assert!(api_error(503, Classification::TransientServer).is_retryable());
        assert!(api_error(429, Classification::TransientServer).is_retryable());
        assert!(!api_error(404, Classification::PermanentClient).is_retryable());
        assert!(Error::Transport(TransportError::network("reset")).is_retryable());
        assert!(!Error::Cancelled.is_retryable());
    }

    #[test]
    fn test_api_error_display() {
        let err = api_error(404, Classification::PermanentClient);
        assert_eq!(
            err.to_string(),
            "GET https://api.statuspage.io/v1/pages: 404 boom"
        );
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_decode_error_classification() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = Error::Decode {
            status: StatusCode::OK,
            raw_body: Bytes::from_static(b"nope"),
            source,
        };
        assert_eq!(err.classification(), Some(Classification::DecodeFailure));
        assert!(!err.is_retryable());
    }
}
