//! Executes exactly one attempt.

use crate::classify::{self, Verdict};
use crate::decode::Decoder;
use crate::error::ApiError;
use crate::rate_limit::RateLimitInfo;
use crate::request::RequestDescription;
use crate::transport::Transport;
use crate::{Error, Response, Result};
use std::time::Instant;

/// Sends `request` once through `transport`, classifies the response and
/// decodes a successful body with `decoder`.
///
/// `attempt` is 1-based and only used for logging and the returned metadata.
pub(crate) async fn attempt<D>(
    transport: &dyn Transport,
    request: &RequestDescription,
    decoder: &D,
    attempt: usize,
) -> Result<Response<D::Output>>
where
    D: Decoder,
{
    let started = Instant::now();

    tracing::debug!(
        method = %request.method(),
        uri = %request.uri(),
        attempt = attempt,
        "Executing HTTP request"
    );

    let response = match transport.send(request.materialize()).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(
                error = %e,
                method = %request.method(),
                uri = %request.uri(),
                attempt = attempt,
                "Request failed without a response"
            );
            return Err(e.into());
        }
    };

    let (parts, body) = response.into_parts();
    let latency = started.elapsed();

    tracing::info!(
        status = parts.status.as_u16(),
        latency_ms = latency.as_millis(),
        attempt = attempt,
        "Received HTTP response"
    );

    match classify::classify(parts.status, &body) {
        Verdict::Success => {
            let data = decoder.decode(parts.status, body)?;
            Ok(Response::new(
                data,
                parts.status,
                parts.headers,
                latency,
                attempt,
            ))
        }
        Verdict::Failure {
            classification,
            message,
        } => {
            if classification.is_transient() {
                tracing::warn!(
                    status = parts.status.as_u16(),
                    message = %message,
                    "Server error"
                );
            } else {
                tracing::error!(
                    status = parts.status.as_u16(),
                    message = %message,
                    "Client error"
                );
            }

            let rate_limit = classify::is_rate_limit(parts.status)
                .then(|| RateLimitInfo::from_headers(&parts.headers));

            Err(Error::Api(ApiError {
                classification,
                status: parts.status,
                message,
                method: request.method().clone(),
                uri: request.uri().clone(),
                headers: parts.headers,
                rate_limit,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{Discard, Json, Raw};
    use crate::request::RequestBuilder;
    use crate::transport::scripted::{ScriptedTransport, Step};
    use crate::Classification;
    use http::{Method, StatusCode};
    use url::Url;

    fn get() -> RequestDescription {
        RequestBuilder::new(
            Method::GET,
            Url::parse("https://api.statuspage.io/v1/pages").unwrap(),
        )
        .build()
        .unwrap()
    }

    #[tokio::test]
    async fn test_success_decodes() {
        let transport = ScriptedTransport::new([Step::Respond(200, r#"[{"id":"a"}]"#)]);

        let response = attempt(&transport, &get(), &Json::<serde_json::Value>::new(), 1)
            .await
            .unwrap();

        assert_eq!(response.data, serde_json::json!([{"id": "a"}]));
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.attempts, 1);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_raw_and_discard_modes() {
        let transport = ScriptedTransport::new([
            Step::Respond(200, "not json at all"),
            Step::Respond(204, ""),
        ]);

        let raw = attempt(&transport, &get(), &Raw, 1).await.unwrap();
        assert_eq!(&raw.data[..], b"not json at all");

        let discarded = attempt(&transport, &get(), &Discard, 2).await.unwrap();
        assert_eq!(discarded.status, StatusCode::NO_CONTENT);
        assert_eq!(discarded.attempts, 2);
    }

    #[tokio::test]
    async fn test_api_error_carries_request_and_message() {
        let transport =
            ScriptedTransport::new([Step::Respond(422, r#"{"message":"name is blank"}"#)]);

        let err = attempt(&transport, &get(), &Discard, 1).await.unwrap_err();
        let api = err.api_error().expect("api error");

        assert_eq!(api.classification, Classification::PermanentClient);
        assert_eq!(api.message, "name is blank");
        assert_eq!(api.method, Method::GET);
        assert!(api.rate_limit.is_none());
    }

    #[tokio::test]
    async fn test_rate_limit_info_attached() {
        let transport = ScriptedTransport::new([Step::Respond(420, "")]);

        let err = attempt(&transport, &get(), &Discard, 1).await.unwrap_err();
        let api = err.api_error().expect("api error");

        assert!(api.is_rate_limited());
        assert_eq!(api.classification, Classification::TransientServer);
        assert_eq!(api.rate_limit, Some(RateLimitInfo::default()));
    }

    #[tokio::test]
    async fn test_transport_failure_is_transient_network() {
        let transport = ScriptedTransport::new([Step::Fail]);

        let err = attempt(&transport, &get(), &Discard, 1).await.unwrap_err();
        assert_eq!(err.classification(), Some(Classification::TransientNetwork));
    }
}
