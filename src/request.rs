//! Replayable request descriptions.
//!
//! A [`RequestDescription`] is built once per logical call and then
//! re-materialized into a fresh [`http::Request`] for every attempt. The JSON
//! body is serialized exactly once and stored as immutable [`Bytes`], so every
//! attempt sends a byte-identical body and header set.

use crate::{Error, Result};
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, Uri};
use serde::Serialize;
use url::Url;

/// An immutable description of one logical request.
#[derive(Debug, Clone)]
pub struct RequestDescription {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl RequestDescription {
    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The fully resolved target URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Headers sent with every attempt.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The canonical JSON body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Produces an independent request for one attempt.
    ///
    /// The body is a new view over the stored bytes; nothing consumed by an
    /// earlier attempt is reused.
    pub fn materialize(&self) -> http::Request<Bytes> {
        let mut request = http::Request::new(self.body.clone().unwrap_or_default());
        *request.method_mut() = self.method.clone();
        *request.uri_mut() = self.uri.clone();
        *request.headers_mut() = self.headers.clone();
        request
    }
}

/// Builds a [`RequestDescription`].
///
/// Usually obtained from [`Client::request`](crate::Client::request), which
/// resolves the path and pre-populates the `Accept`, `Authorization` and
/// `User-Agent` headers.
///
/// # Examples
///
/// ```
/// use statuspage::request::RequestBuilder;
/// use http::Method;
/// use url::Url;
///
/// # fn example() -> Result<(), statuspage::Error> {
/// let url = Url::parse("https://api.statuspage.io/v1/pages/abc/components").unwrap();
/// let request = RequestBuilder::new(Method::POST, url)
///     .json(&serde_json::json!({"component": {"name": "API"}}))?
///     .build()?;
///
/// assert_eq!(request.headers()["content-type"], "application/json");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl RequestBuilder {
    /// Starts a request for an already resolved URL.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Sets (replacing) a header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Merges pre-validated headers, replacing existing values of the same name.
    pub fn headers(mut self, headers: &HeaderMap) -> Self {
        for (name, value) in headers {
            self.headers.insert(name.clone(), value.clone());
        }
        self
    }

    /// Appends query parameters. Pairs with an empty value are skipped.
    pub fn query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut pairs = pairs
            .into_iter()
            .filter(|(_, value)| !value.as_ref().is_empty())
            .peekable();
        if pairs.peek().is_some() {
            let mut query = self.url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key.as_ref(), value.as_ref());
            }
        }
        self
    }

    /// Serializes `body` once as the canonical JSON payload and marks the
    /// request as `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `body` cannot be encoded.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(body).map_err(Error::Serialization)?;
        self.body = Some(Bytes::from(bytes));
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    /// Finalizes the description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUri`] if the URL is not a valid request target.
    pub fn build(self) -> Result<RequestDescription> {
        let uri = Uri::try_from(self.url.as_str())
            .map_err(|e| Error::invalid_uri(self.url.as_str(), e))?;

        Ok(RequestDescription {
            method: self.method,
            uri,
            headers: self.headers,
            body: self.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Incident<'a> {
        name: &'a str,
        status: &'a str,
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_no_content_type_without_body() {
        let request = RequestBuilder::new(Method::GET, url("https://example.com/v1/pages"))
            .build()
            .unwrap();

        assert!(request.headers().get(CONTENT_TYPE).is_none());
        assert!(request.body().is_none());
        assert!(request.materialize().body().is_empty());
    }

    #[test]
    fn test_json_body_is_serialized_once() {
        let request = RequestBuilder::new(Method::POST, url("https://example.com/v1/incidents"))
            .json(&Incident {
                name: "outage",
                status: "investigating",
            })
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            request.body(),
            Some(&br#"{"name":"outage","status":"investigating"}"#[..])
        );
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_materialize_replays_identically() {
        let request = RequestBuilder::new(Method::PATCH, url("https://example.com/v1/x"))
            .header("Authorization", "OAuth key")
            .unwrap()
            .json(&serde_json::json!({"component": {"status": "major_outage"}}))
            .unwrap()
            .build()
            .unwrap();

        let first = request.materialize();
        let second = request.materialize();

        assert_eq!(first.body(), second.body());
        assert_eq!(first.headers(), second.headers());
        assert_eq!(first.method(), &Method::PATCH);
        assert_eq!(second.uri(), "https://example.com/v1/x");
    }

    #[test]
    fn test_query_skips_empty_values() {
        let request = RequestBuilder::new(Method::GET, url("https://example.com/v1/incidents"))
            .query([("q", "db"), ("impact", ""), ("page", "2")])
            .build()
            .unwrap();

        assert_eq!(
            request.uri().to_string(),
            "https://example.com/v1/incidents?q=db&page=2"
        );
    }

    #[test]
    fn test_invalid_header_rejected() {
        let result = RequestBuilder::new(Method::GET, url("https://example.com/"))
            .header("bad header", "x");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
