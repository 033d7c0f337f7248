//! The HTTP capability the client sends requests through.
//!
//! [`Transport`] is deliberately small: send one request, return one fully
//! buffered response or a [`TransportError`]. [`ReqwestTransport`] is the
//! default implementation; tests and embedders can plug in their own.

use crate::error::TransportError;
use crate::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

/// Sends one HTTP request and awaits its response.
///
/// Implementations must return a response whose body has been read in full,
/// so that the underlying connection is released before `send` returns.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Performs exactly one exchange.
    async fn send(
        &self,
        request: http::Request<Bytes>,
    ) -> std::result::Result<http::Response<Bytes>, TransportError>;
}

/// A [`Transport`] backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            Error::Configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }

    /// Wraps an existing, fully configured reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: http::Request<Bytes>,
    ) -> std::result::Result<http::Response<Bytes>, TransportError> {
        let request = reqwest::Request::try_from(request)?;
        let response = self.client.execute(request).await?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        // Draining the body hands the connection back to the pool.
        let body = response.bytes().await?;

        let mut out = http::Response::new(body);
        *out.status_mut() = status;
        *out.version_mut() = version;
        *out.headers_mut() = headers;
        Ok(out)
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    //! An in-memory transport that replays a fixed script of outcomes.

    use super::*;
    use http::StatusCode;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    pub(crate) enum Step {
        Respond(u16, &'static str),
        Fail,
    }

    #[derive(Debug, Clone)]
    pub(crate) struct Seen {
        pub(crate) method: http::Method,
        pub(crate) uri: http::Uri,
        pub(crate) headers: http::HeaderMap,
        pub(crate) body: Bytes,
    }

    #[derive(Default)]
    pub(crate) struct ScriptedTransport {
        steps: Mutex<VecDeque<Step>>,
        seen: Mutex<Vec<Seen>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new(steps: impl IntoIterator<Item = Step>) -> Self {
            Self {
                steps: Mutex::new(steps.into_iter().collect()),
                seen: Mutex::default(),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }

        pub(crate) fn bodies(&self) -> Vec<Bytes> {
            self.seen
                .lock()
                .unwrap()
                .iter()
                .map(|seen| seen.body.clone())
                .collect()
        }

        pub(crate) fn requests(&self) -> Vec<Seen> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(
            &self,
            request: http::Request<Bytes>,
        ) -> std::result::Result<http::Response<Bytes>, TransportError> {
            let (parts, body) = request.into_parts();
            self.seen.lock().unwrap().push(Seen {
                method: parts.method,
                uri: parts.uri,
                headers: parts.headers,
                body,
            });
            let step = self.steps.lock().unwrap().pop_front();
            match step {
                Some(Step::Respond(status, body)) => {
                    let mut response = http::Response::new(Bytes::from_static(body.as_bytes()));
                    *response.status_mut() = StatusCode::from_u16(status).unwrap();
                    Ok(response)
                }
                Some(Step::Fail) => Err(TransportError::network("connection reset")),
                None => panic!("transport invoked more times than scripted"),
            }
        }
    }
}
