//! # statuspage - An async client for the Statuspage REST API
//!
//! `statuspage` maps Statuspage resources (pages, components, incidents,
//! subscribers, metrics, ...) onto typed calls. Every call runs through one
//! execution engine that builds a replayable request, classifies the
//! response, decodes the body, and retries transient failures according to a
//! configurable policy.
//!
//! ## Quick Start
//!
//! ```no_run
//! use statuspage::models::{ComponentStatus, IncidentInput, IncidentStatus};
//! use statuspage::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), statuspage::Error> {
//!     let client = Client::builder()
//!         .api_key("my-api-key")
//!         .default_retry()
//!         .build()?;
//!
//!     let components = client.components().list("page-id").await?;
//!     println!("{} components in {:?}", components.len(), components.latency);
//!
//!     let api = components
//!         .iter()
//!         .find(|c| c.name == "API")
//!         .expect("API component");
//!     client
//!         .components()
//!         .update_status("page-id", &api.id, ComponentStatus::MajorOutage)
//!         .await?;
//!
//!     let incident = IncidentInput {
//!         name: Some("API unavailable".to_string()),
//!         status: Some(IncidentStatus::Investigating),
//!         component_ids: vec![api.id.clone()],
//!         ..Default::default()
//!     };
//!     let created = client.incidents().create("page-id", &incident).await?;
//!     println!("Opened incident {}", created.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed resources** - Serde models for every resource and its editable fields
//! - **One execution path** - Services, raw requests and custom decoders share `Client::execute`
//! - **Classified errors** - Each failure is transient-network, transient-server, permanent-client or a decode failure
//! - **Retry policies** - Fixed or exponential backoff, composable predicates, retry observers, cancellation
//! - **Replay fidelity** - Request bodies are serialized once and re-sent byte for byte on every attempt
//! - **Structured logging** - Attempts, responses and retries are logged with `tracing`
//! - **Pluggable transport** - `reqwest` by default, any [`Transport`] in tests or embedded setups
//!
//! ## Error Handling
//!
//! ```no_run
//! use statuspage::{Classification, Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("my-api-key")?;
//! match client.pages().get("missing").await {
//!     Ok(page) => println!("Found {}", page.name),
//!     Err(Error::Api(err)) if err.classification == Classification::PermanentClient => {
//!         eprintln!("{} (status {})", err.message, err.status);
//!     }
//!     Err(Error::Decode { status, raw_body, source }) => {
//!         eprintln!("Unexpected body for {}: {}", status, String::from_utf8_lossy(&raw_body));
//!         eprintln!("  Error: {}", source);
//!     }
//!     Err(e) if e.is_retryable() => eprintln!("Transient failure: {}", e),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Retry Policies
//!
//! A client-wide policy applies to every call; [`Client::execute`] accepts a
//! per-call policy that replaces it.
//!
//! ```no_run
//! use statuspage::retry::{OrPredicate, RetryOn5xx, RetryOnNetworkError};
//! use statuspage::{Client, RetryPolicy};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), statuspage::Error> {
//! let policy = RetryPolicy::builder()
//!     .max_attempts(5)
//!     .exponential_backoff(Duration::from_millis(200), Duration::from_secs(10))
//!     .predicate(OrPredicate::new(vec![
//!         Box::new(RetryOn5xx),
//!         Box::new(RetryOnNetworkError),
//!     ]))
//!     .on_retry(|retry, err| eprintln!("retry #{} after: {}", retry, err))
//!     .build()?;
//!
//! let client = Client::builder()
//!     .api_key("my-api-key")
//!     .retry_policy(policy)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod classify;
mod client;
pub mod config;
pub mod decode;
mod error;
mod invoke;
pub mod models;
pub mod rate_limit;
pub mod request;
mod response;
pub mod retry;
pub mod services;
pub mod transport;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use decode::{Decoder, Discard, Json, Raw};
pub use error::{ApiError, BoxError, Classification, Error, Result, TransportError};
pub use response::Response;
pub use retry::{DelayStrategy, RetryPolicy, RetryPolicyBuilder, RetryPredicate};
pub use tokio_util::sync::CancellationToken;
pub use transport::{ReqwestTransport, Transport};
