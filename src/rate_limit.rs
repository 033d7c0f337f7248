//! Rate limit hints carried by 420/429 responses.
//!
//! The Statuspage API throttles per API key. When it does, the response may
//! tell the client how long to back off; [`RateLimitInfo`] captures those hints
//! so a [`RetryPolicy`](crate::RetryPolicy) configured with
//! `rate_limit_max_wait` can wait exactly as long as the server asks.

use http::HeaderMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rate limit data parsed from response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// How long to wait before retrying (`Retry-After`).
    pub retry_after: Option<Duration>,

    /// When the current window resets (`X-RateLimit-Reset` / `RateLimit-Reset`).
    pub reset_at: Option<SystemTime>,

    /// Requests remaining in the current window (`X-RateLimit-Remaining`).
    pub remaining: Option<u64>,

    /// Size of the current window (`X-RateLimit-Limit`).
    pub limit: Option<u64>,
}

impl RateLimitInfo {
    /// Extracts rate limit hints from response headers.
    ///
    /// # Examples
    ///
    /// ```
    /// use statuspage::rate_limit::RateLimitInfo;
    /// use http::HeaderMap;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("retry-after", "60".parse().unwrap());
    ///
    /// let info = RateLimitInfo::from_headers(&headers);
    /// assert_eq!(info.retry_after, Some(std::time::Duration::from_secs(60)));
    /// ```
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            retry_after: parse_retry_after(headers),
            reset_at: parse_reset(headers),
            remaining: parse_u64(headers, "x-ratelimit-remaining"),
            limit: parse_u64(headers, "x-ratelimit-limit"),
        }
    }

    /// Returns the server-requested delay, capped by `max_wait`.
    ///
    /// `Retry-After` wins over the reset timestamp. Returns `None` when the
    /// response carried no usable hint.
    pub fn delay(&self, max_wait: Duration) -> Option<Duration> {
        if let Some(retry_after) = self.retry_after {
            return Some(retry_after.min(max_wait));
        }

        let until_reset = self.reset_at?.duration_since(SystemTime::now()).ok()?;
        Some(until_reset.min(max_wait))
    }
}

/// `Retry-After` is either delay-seconds or an HTTP date.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(http::header::RETRY_AFTER)?.to_str().ok()?;

    if let Ok(seconds) = value.trim().parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let at = httpdate::parse_http_date(value).ok()?;
    Some(at.duration_since(SystemTime::now()).unwrap_or(Duration::ZERO))
}

fn parse_reset(headers: &HeaderMap) -> Option<SystemTime> {
    ["x-ratelimit-reset", "ratelimit-reset"]
        .iter()
        .find_map(|name| parse_u64(headers, name))
        .map(|timestamp| UNIX_EPOCH + Duration::from_secs(timestamp))
}

fn parse_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
