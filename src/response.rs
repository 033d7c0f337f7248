//! The value returned by a successful call.
//!
//! A [`Response`] pairs the decoded body with the transport metadata of the
//! attempt that produced it. Earlier failed attempts leave no trace here
//! beyond the `attempts` count.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A decoded value plus the metadata of the final attempt.
///
/// # Examples
///
/// ```no_run
/// use statuspage::Client;
///
/// # async fn example() -> Result<(), statuspage::Error> {
/// let client = Client::new("my-api-key")?;
///
/// let pages = client.pages().list().await?;
/// println!("{} pages, status {}", pages.len(), pages.status);
/// println!("took {:?} over {} attempt(s)", pages.latency, pages.attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The decoded response body.
    pub data: T,

    /// Status code of the final attempt.
    pub status: StatusCode,

    /// Headers of the final attempt.
    pub headers: HeaderMap,

    /// Time from the first attempt until the final response was decoded,
    /// including retry delays.
    pub latency: Duration,

    /// Number of attempts made; `1` when no retry was needed.
    pub attempts: usize,
}

impl<T> Response<T> {
    /// Creates a new `Response`.
    pub fn new(
        data: T,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
        attempts: usize,
    ) -> Self {
        Self {
            data,
            status,
            headers,
            latency,
            attempts,
        }
    }

    /// Maps the data while keeping the metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statuspage::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = Response::new(
    ///     vec![1, 2, 3],
    ///     StatusCode::OK,
    ///     HeaderMap::new(),
    ///     Duration::from_millis(10),
    ///     1,
    /// );
    ///
    /// assert_eq!(response.map(|v| v.len()).data, 3);
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            status: self.status,
            headers: self.headers,
            latency: self.latency,
            attempts: self.attempts,
        }
    }

    /// Consumes the response, returning only the data.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns `true` if the call needed more than one attempt.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }

    /// Returns a header of the final attempt as a string.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statuspage::Response;
    /// # use http::{HeaderMap, HeaderValue, StatusCode};
    /// # use std::time::Duration;
    /// let mut headers = HeaderMap::new();
    /// headers.insert("x-ratelimit-remaining", HeaderValue::from_static("59"));
    ///
    /// let response = Response::new((), StatusCode::OK, headers, Duration::ZERO, 1);
    /// assert_eq!(response.header("x-ratelimit-remaining"), Some("59"));
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
