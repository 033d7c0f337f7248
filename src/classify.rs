//! Maps HTTP status codes onto semantic outcomes.
//!
//! The mapping is a single ordered table, [`STATUS_RULES`], evaluated
//! top-to-bottom; the first matching rule wins. The last rule matches every
//! status so evaluation always terminates with a verdict.

use crate::error::Classification;
use http::StatusCode;
use serde::Deserialize;

/// Non-standard status the API uses for rate limiting ("Enhance Your Calm").
pub const STATUS_ENHANCE_YOUR_CALM: u16 = 420;

/// Which statuses a rule applies to.
#[derive(Debug, Clone, Copy)]
pub enum StatusMatcher {
    /// Exactly these codes.
    Codes(&'static [u16]),
    /// An inclusive range of codes.
    Range(u16, u16),
    /// Every status.
    Any,
}

impl StatusMatcher {
    fn matches(self, status: u16) -> bool {
        match self {
            StatusMatcher::Codes(codes) => codes.contains(&status),
            StatusMatcher::Range(low, high) => (low..=high).contains(&status),
            StatusMatcher::Any => true,
        }
    }
}

/// The default message attached to a failure.
#[derive(Debug, Clone, Copy)]
pub enum DefaultMessage {
    /// A fixed, human readable message.
    Canonical(&'static str),
    /// The status line text, e.g. `503 Service Unavailable`.
    StatusText,
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct StatusRule {
    /// Statuses covered by this row.
    pub matcher: StatusMatcher,
    /// `None` marks success.
    pub classification: Option<Classification>,
    /// Message used when the body does not provide one.
    pub message: DefaultMessage,
}

const fn failure(
    matcher: StatusMatcher,
    classification: Classification,
    message: DefaultMessage,
) -> StatusRule {
    StatusRule {
        matcher,
        classification: Some(classification),
        message,
    }
}

/// The classification table.
pub const STATUS_RULES: &[StatusRule] = &[
    StatusRule {
        matcher: StatusMatcher::Range(200, 299),
        classification: None,
        message: DefaultMessage::StatusText,
    },
    failure(
        StatusMatcher::Codes(&[400]),
        Classification::PermanentClient,
        DefaultMessage::Canonical("Bad request"),
    ),
    failure(
        StatusMatcher::Codes(&[401]),
        Classification::PermanentClient,
        DefaultMessage::Canonical("Could not authenticate"),
    ),
    failure(
        StatusMatcher::Codes(&[403]),
        Classification::PermanentClient,
        DefaultMessage::Canonical("Not authorized"),
    ),
    failure(
        StatusMatcher::Codes(&[404]),
        Classification::PermanentClient,
        DefaultMessage::Canonical("Resource not found"),
    ),
    failure(
        StatusMatcher::Codes(&[422]),
        Classification::PermanentClient,
        DefaultMessage::Canonical("Unprocessable entity"),
    ),
    failure(
        StatusMatcher::Codes(&[429, STATUS_ENHANCE_YOUR_CALM]),
        Classification::TransientServer,
        DefaultMessage::Canonical("Rate limit exceeded"),
    ),
    failure(
        StatusMatcher::Codes(&[500, 502, 503, 504]),
        Classification::TransientServer,
        DefaultMessage::StatusText,
    ),
    failure(
        StatusMatcher::Any,
        Classification::PermanentClient,
        DefaultMessage::StatusText,
    ),
];

/// The outcome of classifying one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A 2xx response.
    Success,
    /// Any other response.
    Failure {
        /// Retry category.
        classification: Classification,
        /// Body-provided message, or the rule's default.
        message: String,
    },
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Classifies a response by status code and (for failures) its body.
///
/// A non-empty `message` field in a JSON error body overrides the default
/// message of the matching rule.
///
/// # Examples
///
/// ```
/// use statuspage::classify::{classify, Verdict};
/// use statuspage::Classification;
/// use http::StatusCode;
///
/// assert_eq!(classify(StatusCode::NO_CONTENT, b""), Verdict::Success);
/// assert_eq!(
///     classify(StatusCode::NOT_FOUND, b""),
///     Verdict::Failure {
///         classification: Classification::PermanentClient,
///         message: "Resource not found".to_string(),
///     }
/// );
/// ```
pub fn classify(status: StatusCode, body: &[u8]) -> Verdict {
    let code = status.as_u16();
    let Some(rule) = STATUS_RULES.iter().find(|rule| rule.matcher.matches(code)) else {
        // The table ends with a catch-all; this is only reachable if it is edited away.
        return Verdict::Failure {
            classification: Classification::PermanentClient,
            message: status_text(status),
        };
    };

    let Some(classification) = rule.classification else {
        return Verdict::Success;
    };

    let message = body_message(body).unwrap_or_else(|| match rule.message {
        DefaultMessage::Canonical(message) => message.to_string(),
        DefaultMessage::StatusText => status_text(status),
    });

    Verdict::Failure {
        classification,
        message,
    }
}

/// Returns `true` for the statuses the API uses to signal rate limiting.
pub fn is_rate_limit(status: StatusCode) -> bool {
    matches!(
        status.as_u16(),
        429 | STATUS_ENHANCE_YOUR_CALM
    )
}

fn body_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    parsed.message.filter(|message| !message.trim().is_empty())
}

fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(code: u16, body: &str) -> Verdict {
        classify(StatusCode::from_u16(code).unwrap(), body.as_bytes())
    }

    fn failure(classification: Classification, message: &str) -> Verdict {
        Verdict::Failure {
            classification,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_success_range() {
        for code in [200, 201, 204, 299] {
            assert_eq!(verdict(code, ""), Verdict::Success, "status {code}");
        }
    }

    #[test]
    fn test_canonical_messages() {
        use Classification::*;

        let cases = [
            (400, PermanentClient, "Bad request"),
            (401, PermanentClient, "Could not authenticate"),
            (403, PermanentClient, "Not authorized"),
            (404, PermanentClient, "Resource not found"),
            (422, PermanentClient, "Unprocessable entity"),
            (429, TransientServer, "Rate limit exceeded"),
            (420, TransientServer, "Rate limit exceeded"),
            (500, TransientServer, "500 Internal Server Error"),
            (502, TransientServer, "502 Bad Gateway"),
            (503, TransientServer, "503 Service Unavailable"),
            (504, TransientServer, "504 Gateway Timeout"),
            (409, PermanentClient, "409 Conflict"),
            (501, PermanentClient, "501 Not Implemented"),
        ];

        for (code, classification, message) in cases {
            assert_eq!(
                verdict(code, ""),
                failure(classification, message),
                "status {code}"
            );
        }
    }

    #[test]
    fn test_body_message_overrides_default() {
        assert_eq!(
            verdict(404, r#"{"message":"Page abc does not exist"}"#),
            failure(Classification::PermanentClient, "Page abc does not exist")
        );
        assert_eq!(
            verdict(503, r#"{"message":"maintenance"}"#),
            failure(Classification::TransientServer, "maintenance")
        );
    }

    #[test]
    fn test_empty_or_missing_body_message_is_ignored() {
        assert_eq!(
            verdict(401, r#"{"message":""}"#),
            failure(Classification::PermanentClient, "Could not authenticate")
        );
        assert_eq!(
            verdict(422, r#"{"error":"name is required"}"#),
            failure(Classification::PermanentClient, "Unprocessable entity")
        );
        assert_eq!(
            verdict(400, "<html>oops</html>"),
            failure(Classification::PermanentClient, "Bad request")
        );
    }

    #[test]
    fn test_unknown_status_text() {
        assert_eq!(
            verdict(599, ""),
            failure(Classification::PermanentClient, "599")
        );
    }

    #[test]
    fn test_rate_limit_statuses() {
        assert!(is_rate_limit(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_rate_limit(StatusCode::from_u16(420).unwrap()));
        assert!(!is_rate_limit(StatusCode::SERVICE_UNAVAILABLE));
    }
}
