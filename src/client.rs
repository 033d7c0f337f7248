//! The client facade.
//!
//! [`Client`] owns the base address, credential, transport and default retry
//! policy, and exposes the single execution entry point every resource
//! service goes through. Use [`ClientBuilder`] to configure one.

use crate::config::ClientConfig;
use crate::decode::Decoder;
use crate::models::QueryPairs;
use crate::request::{RequestBuilder, RequestDescription};
use crate::retry::RetryPolicy;
use crate::services::{
    ComponentGroups, Components, IncidentUpdates, Incidents, Metrics, PageAccessGroups,
    PageAccessUsers, Pages, StatusEmbedConfigs, Subscribers, Templates,
};
use crate::transport::{ReqwestTransport, Transport};
use crate::{invoke, Error, Response, Result};
use http::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// The production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.statuspage.io/v1/";

/// `User-Agent` sent unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("statuspage-rs/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout of the default transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A Statuspage API client.
///
/// Cloning is cheap: the transport is shared. Configuration setters take
/// `&mut self` and are meant to be applied before the client is shared.
///
/// # Examples
///
/// ```no_run
/// use statuspage::{Client, RetryPolicy};
///
/// # async fn example() -> Result<(), statuspage::Error> {
/// let client = Client::builder()
///     .api_key("my-api-key")
///     .retry_policy(RetryPolicy::default())
///     .build()?;
///
/// let components = client.components().list("page-id").await?;
/// for component in components.iter() {
///     println!("{}: {:?}", component.name, component.status);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    authorization: Option<HeaderValue>,
    transport: Arc<dyn Transport>,
    default_policy: Option<RetryPolicy>,
    default_headers: HeaderMap,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("authorization", &self.authorization.is_some())
            .field("default_policy", &self.default_policy)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client for the production API with default settings and
    /// no retries.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the
    /// default transport cannot be built.
    pub fn new(api_key: impl AsRef<str>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Creates a new `ClientBuilder`.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client from plain configuration data.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured value is invalid.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.into_builder()?.build()
    }

    /// The API root paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The client-wide retry policy, if any.
    pub fn retry_policy(&self) -> Option<&RetryPolicy> {
        self.default_policy.as_ref()
    }

    /// Replaces the transport.
    pub fn set_transport(&mut self, transport: impl Transport) {
        self.transport = Arc::new(transport);
    }

    /// Replaces the base address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUri`] if `base_url` is not an absolute URL.
    pub fn set_base_url(&mut self, base_url: impl AsRef<str>) -> Result<()> {
        self.base_url = parse_base_url(base_url.as_ref())?;
        Ok(())
    }

    /// Replaces the API key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the key cannot be sent as a header.
    pub fn set_api_key(&mut self, api_key: impl AsRef<str>) -> Result<()> {
        self.authorization = Some(authorization(api_key.as_ref())?);
        Ok(())
    }

    /// Replaces (or with `None`, removes) the client-wide retry policy.
    pub fn set_retry_policy(&mut self, policy: Option<RetryPolicy>) {
        self.default_policy = policy;
    }

    /// Starts a request for `path`, relative to the base address.
    ///
    /// The returned builder already carries `Accept: application/json`, the
    /// `Authorization: OAuth <key>` header and the client's default headers.
    /// A leading `/` on `path` is ignored so that paths always stay below the
    /// API root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUri`] if `path` cannot be resolved.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::invalid_uri(path, e))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(authorization) = &self.authorization {
            headers.insert(AUTHORIZATION, authorization.clone());
        }

        Ok(RequestBuilder::new(method, url)
            .headers(&headers)
            .headers(&self.default_headers))
    }

    /// Executes a request.
    ///
    /// This is the single entry point every call goes through. `policy`
    /// replaces the client-wide policy for this call; with neither, exactly
    /// one attempt is made.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use statuspage::{Client, Json, RetryPolicy};
    /// use http::Method;
    ///
    /// # async fn example() -> Result<(), statuspage::Error> {
    /// let client = Client::new("my-api-key")?;
    /// let request = client.request(Method::GET, "pages")?.build()?;
    ///
    /// let pages = client
    ///     .execute(&request, Json::<serde_json::Value>::new(), Some(&RetryPolicy::default()))
    ///     .await?;
    /// println!("{}", pages.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute<D>(
        &self,
        request: &RequestDescription,
        decoder: D,
        policy: Option<&RetryPolicy>,
    ) -> Result<Response<D::Output>>
    where
        D: Decoder,
    {
        let transport = self.transport.as_ref();
        let decoder = &decoder;

        match policy.or(self.default_policy.as_ref()) {
            None => invoke::attempt(transport, request, decoder, 1).await,
            Some(policy) => {
                policy
                    .run(|attempt| invoke::attempt(transport, request, decoder, attempt))
                    .await
            }
        }
    }

    /// Builds and executes a request in one step.
    ///
    /// # Errors
    ///
    /// Any error of [`Client::request`], request serialization, or
    /// [`Client::execute`].
    pub async fn send<B, D>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        decoder: D,
    ) -> Result<Response<D::Output>>
    where
        B: Serialize + ?Sized,
        D: Decoder,
    {
        let mut builder = self.request(method, path)?;
        if let Some(body) = body {
            builder = builder.json(body)?;
        }
        self.execute(&builder.build()?, decoder, None).await
    }

    /// Request helper used by the resource services.
    pub(crate) async fn call<B, D>(
        &self,
        method: Method,
        path: &str,
        query: QueryPairs,
        body: Option<&B>,
        decoder: D,
    ) -> Result<Response<D::Output>>
    where
        B: Serialize + ?Sized,
        D: Decoder,
    {
        let mut builder = self.request(method, path)?.query(query);
        if let Some(body) = body {
            builder = builder.json(body)?;
        }
        self.execute(&builder.build()?, decoder, None).await
    }

    /// Pages.
    pub fn pages(&self) -> Pages<'_> {
        Pages::new(self)
    }

    /// Components of a page.
    pub fn components(&self) -> Components<'_> {
        Components::new(self)
    }

    /// Component groups of a page.
    pub fn component_groups(&self) -> ComponentGroups<'_> {
        ComponentGroups::new(self)
    }

    /// Incidents and scheduled maintenances.
    pub fn incidents(&self) -> Incidents<'_> {
        Incidents::new(self)
    }

    /// Updates posted to an incident.
    pub fn incident_updates(&self) -> IncidentUpdates<'_> {
        IncidentUpdates::new(self)
    }

    /// Notification subscribers.
    pub fn subscribers(&self) -> Subscribers<'_> {
        Subscribers::new(self)
    }

    /// System metrics and their data points.
    pub fn metrics(&self) -> Metrics<'_> {
        Metrics::new(self)
    }

    /// Audience-specific page users.
    pub fn page_access_users(&self) -> PageAccessUsers<'_> {
        PageAccessUsers::new(self)
    }

    /// Audience-specific page groups.
    pub fn page_access_groups(&self) -> PageAccessGroups<'_> {
        PageAccessGroups::new(self)
    }

    /// Incident templates.
    pub fn templates(&self) -> Templates<'_> {
        Templates::new(self)
    }

    /// Status embed widget configuration.
    pub fn status_embed_config(&self) -> StatusEmbedConfigs<'_> {
        StatusEmbedConfigs::new(self)
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use statuspage::{ClientBuilder, RetryPolicy};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), statuspage::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.statuspage.io/v1/")?
///     .api_key("my-api-key")
///     .timeout(Duration::from_secs(10))
///     .retry_policy(
///         RetryPolicy::builder()
///             .max_attempts(5)
///             .exponential_backoff(Duration::from_millis(200), Duration::from_secs(5))
///             .build()?,
///     )
///     .default_header("X-Request-Source", "deploy-bot")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Result<Url>,
    api_key: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    timeout: Option<Duration>,
    user_agent: String,
    default_headers: HeaderMap,
    retry_policy: Option<RetryPolicy>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: parse_base_url(DEFAULT_BASE_URL),
            api_key: None,
            transport: None,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: HeaderMap::new(),
            retry_policy: None,
        }
    }

    /// Sets the API root. A trailing `/` is added when missing so relative
    /// paths resolve below it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUri`] if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Ok(parse_base_url(url.as_ref())?);
        Ok(self)
    }

    /// Sets the API key sent as `Authorization: OAuth <key>`.
    pub fn api_key(mut self, api_key: impl AsRef<str>) -> Self {
        self.api_key = Some(api_key.as_ref().to_string());
        self
    }

    /// Uses a custom transport instead of the default reqwest one.
    ///
    /// The builder's `timeout` does not apply to custom transports.
    pub fn transport(mut self, transport: impl Transport) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Sets the per-attempt timeout of the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds a header included in every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the client-wide retry policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Installs [`RetryPolicy::default`]: four attempts with exponential
    /// backoff, retrying transient failures.
    pub fn default_retry(self) -> Self {
        self.retry_policy(RetryPolicy::default())
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL, API key or user agent is invalid,
    /// or the default transport cannot be built.
    pub fn build(self) -> Result<Client> {
        let base_url = self.base_url?;

        let authorization = self.api_key.as_deref().map(authorization).transpose()?;

        let mut default_headers = HeaderMap::new();
        let user_agent = HeaderValue::try_from(self.user_agent.as_str())
            .map_err(|e| Error::Configuration(format!("Invalid user agent: {}", e)))?;
        default_headers.insert(USER_AGENT, user_agent);
        default_headers.extend(self.default_headers);

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.timeout)?),
        };

        Ok(Client {
            base_url,
            authorization,
            transport,
            default_policy: self.retry_policy,
            default_headers,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_base_url(input: &str) -> Result<Url> {
    let mut url = Url::parse(input).map_err(|e| Error::invalid_uri(input, e))?;
    if url.cannot_be_a_base() {
        return Err(Error::invalid_uri(input, "not usable as a base URL"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn authorization(api_key: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::try_from(format!("OAuth {}", api_key))
        .map_err(|e| Error::Configuration(format!("Invalid API key: {}", e)))?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{Discard, Raw};
    use crate::transport::scripted::{ScriptedTransport, Step};
    use http::header::CONTENT_TYPE;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn client(steps: Vec<Step>) -> (Client, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new(steps));
        let client = Client::builder()
            .base_url("https://api.example.com/v1")
            .unwrap()
            .api_key("secret")
            .transport(SharedTransport(transport.clone()))
            .build()
            .unwrap();
        (client, transport)
    }

    struct SharedTransport(Arc<ScriptedTransport>);

    #[async_trait::async_trait]
    impl Transport for SharedTransport {
        async fn send(
            &self,
            request: http::Request<bytes::Bytes>,
        ) -> std::result::Result<http::Response<bytes::Bytes>, crate::TransportError> {
            self.0.send(request).await
        }
    }

    fn fast_policy(attempts: usize) -> RetryPolicy {
        RetryPolicy::builder()
            .max_attempts(attempts)
            .fixed_delay(Duration::from_millis(1))
            .build()
            .unwrap()
    }

    #[test]
    fn test_path_resolution() {
        let (client, _) = client(vec![]);

        let request = client.request(Method::GET, "pages/abc").unwrap().build().unwrap();
        assert_eq!(request.uri(), "https://api.example.com/v1/pages/abc");

        let request = client.request(Method::GET, "/pages").unwrap().build().unwrap();
        assert_eq!(request.uri(), "https://api.example.com/v1/pages");
    }

    #[test]
    fn test_invalid_path() {
        let (client, _) = client(vec![]);
        let result = client.request(Method::GET, "http://[::1");
        assert!(matches!(result, Err(Error::InvalidUri { .. })));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            Client::builder().base_url("not a url"),
            Err(Error::InvalidUri { .. })
        ));

        let (mut client, _) = client(vec![]);
        assert!(client.set_base_url("mailto:ops@example.com").is_err());
        client.set_base_url("https://staging.example.com/api").unwrap();
        assert_eq!(client.base_url().as_str(), "https://staging.example.com/api/");
    }

    #[test]
    fn test_standard_headers() {
        let (client, _) = client(vec![]);

        let get = client.request(Method::GET, "pages").unwrap().build().unwrap();
        assert_eq!(get.headers()[ACCEPT], "application/json");
        assert_eq!(get.headers()[AUTHORIZATION], "OAuth secret");
        assert_eq!(get.headers()[USER_AGENT], DEFAULT_USER_AGENT);
        assert!(get.headers().get(CONTENT_TYPE).is_none());

        let post = client
            .request(Method::POST, "pages")
            .unwrap()
            .json(&serde_json::json!({"page": {"name": "x"}}))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(post.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_no_authorization_without_key() {
        let client = Client::builder()
            .transport(ScriptedTransport::default())
            .build()
            .unwrap();
        let request = client.request(Method::GET, "pages").unwrap().build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_no_policy_means_single_attempt() {
        let (client, transport) = client(vec![Step::Respond(503, "")]);
        let request = client.request(Method::GET, "pages").unwrap().build().unwrap();

        let err = client.execute(&request, Discard, None).await.unwrap_err();

        assert_eq!(transport.calls(), 1);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_default_policy_retries() {
        let (mut client, transport) = client(vec![
            Step::Fail,
            Step::Respond(502, ""),
            Step::Respond(200, "pong"),
        ]);
        client.set_retry_policy(Some(fast_policy(4)));
        let request = client.request(Method::GET, "ping").unwrap().build().unwrap();

        let response = client.execute(&request, Raw, None).await.unwrap();

        assert_eq!(&response.data[..], b"pong");
        assert_eq!(response.attempts, 3);
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_per_call_policy_overrides_default() {
        let (mut client, transport) =
            client(vec![Step::Respond(503, ""), Step::Respond(503, "")]);
        client.set_retry_policy(Some(fast_policy(4)));
        let request = client.request(Method::GET, "pages").unwrap().build().unwrap();

        let retries = Arc::new(AtomicUsize::new(0));
        let counter = retries.clone();
        let single = RetryPolicy::builder()
            .max_attempts(1)
            .on_retry(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        let err = client.execute(&request, Discard, Some(&single)).await.unwrap_err();

        assert_eq!(transport.calls(), 1);
        assert_eq!(retries.load(Ordering::SeqCst), 0);
        assert_eq!(err.status(), Some(http::StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_body_replayed_on_every_attempt() {
        let (client, transport) = client(vec![
            Step::Respond(500, ""),
            Step::Respond(504, ""),
            Step::Respond(201, r#"{"id":"c1"}"#),
        ]);
        let request = client
            .request(Method::POST, "pages/p/components")
            .unwrap()
            .json(&serde_json::json!({"component": {"name": "API", "status": "operational"}}))
            .unwrap()
            .build()
            .unwrap();

        client
            .execute(&request, Discard, Some(&fast_policy(3)))
            .await
            .unwrap();

        let bodies = transport.bodies();
        assert_eq!(bodies.len(), 3);
        assert!(bodies.iter().all(|body| body.as_ref() == request.body().unwrap()));

        let requests = transport.requests();
        assert!(requests
            .iter()
            .all(|seen| seen.headers == requests[0].headers && seen.method == Method::POST));
        assert_eq!(requests[2].uri, "https://api.example.com/v1/pages/p/components");
    }
}
