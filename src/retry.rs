//! Retry policies and the engine that runs them.
//!
//! A [`RetryPolicy`] bundles everything that governs repeated attempts: the
//! attempt budget, a [`DelayStrategy`], a [`RetryPredicate`], an optional
//! observer, and optional cancellation (a [`CancellationToken`] and/or a
//! deadline). [`RetryPolicy::run`] drives one call through the states
//!
//! ```text
//! Idle -> Attempting -> Evaluating -> Succeeded
//!                           |  \----> Failed
//!                           v
//!                       Delaying -> Attempting ...
//! ```
//!
//! Attempts are strictly sequential. Both the attempt itself and the delay
//! race against cancellation, and a cancelled run surfaces the most recent
//! real error rather than a synthetic one.

use crate::{Error, Response, Result};
use rand::Rng;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Attempt budget of [`RetryPolicy::default`].
pub const DEFAULT_MAX_ATTEMPTS: usize = 4;

/// Base delay of the default exponential backoff.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);

/// How long to wait between attempts.
///
/// # Examples
///
/// ```
/// use statuspage::DelayStrategy;
/// use std::time::Duration;
///
/// // 100ms, 200ms, 400ms, ... never more than 2s
/// let backoff = DelayStrategy::Exponential {
///     base: Duration::from_millis(100),
///     max: Some(Duration::from_secs(2)),
///     jitter: false,
/// };
/// assert_eq!(backoff.delay_for_retry(3), Duration::from_millis(400));
/// assert_eq!(backoff.delay_for_retry(10), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayStrategy {
    /// The same delay before every retry.
    Fixed(Duration),

    /// `base * 2^(n-1)` before retry `n`, optionally capped.
    Exponential {
        /// Delay before the first retry.
        base: Duration,
        /// Upper bound for any single delay.
        max: Option<Duration>,
        /// Scale each delay by a random factor in `[0.5, 1.0]`.
        jitter: bool,
    },
}

impl Default for DelayStrategy {
    fn default() -> Self {
        DelayStrategy::Exponential {
            base: DEFAULT_BASE_DELAY,
            max: None,
            jitter: false,
        }
    }
}

impl DelayStrategy {
    /// Returns the delay before retry `retry` (1-based: `1` is the first retry).
    pub fn delay_for_retry(&self, retry: usize) -> Duration {
        match *self {
            DelayStrategy::Fixed(delay) => delay,
            DelayStrategy::Exponential { base, max, jitter } => {
                let exponent = retry.saturating_sub(1).min(31) as u32;
                let mut delay = base.saturating_mul(1u32 << exponent);
                if let Some(max) = max {
                    delay = delay.min(max);
                }

                if jitter {
                    let factor: f64 = rand::thread_rng().gen_range(0.5..=1.0);
                    Duration::try_from_secs_f64(delay.as_secs_f64() * factor).unwrap_or(delay)
                } else {
                    delay
                }
            }
        }
    }
}

/// Decides whether a failed attempt should be retried.
///
/// Any `Fn(&Error, usize) -> bool` closure is a predicate.
///
/// # Examples
///
/// ```
/// use statuspage::{Error, RetryPredicate};
///
/// struct RetryOnRateLimit;
///
/// impl RetryPredicate for RetryOnRateLimit {
///     fn should_retry(&self, error: &Error, _attempt: usize) -> bool {
///         error.api_error().is_some_and(|e| e.is_rate_limited())
///     }
/// }
/// ```
pub trait RetryPredicate: Send + Sync {
    /// Returns `true` if the call should be attempted again.
    ///
    /// `attempt` is the 1-based number of the attempt that just failed.
    fn should_retry(&self, error: &Error, attempt: usize) -> bool;
}

impl<F> RetryPredicate for F
where
    F: Fn(&Error, usize) -> bool + Send + Sync,
{
    fn should_retry(&self, error: &Error, attempt: usize) -> bool {
        self(error, attempt)
    }
}

/// Retries transient network and server failures, including rate limits.
///
/// This is the default predicate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryOnTransient;

impl RetryPredicate for RetryOnTransient {
    fn should_retry(&self, error: &Error, _attempt: usize) -> bool {
        error.is_retryable()
    }
}

/// Retries only 5xx responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryOn5xx;

impl RetryPredicate for RetryOn5xx {
    fn should_retry(&self, error: &Error, _attempt: usize) -> bool {
        error.status().is_some_and(|status| status.is_server_error())
    }
}

/// Retries only rate-limited responses (420 and 429).
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryOnRateLimit;

impl RetryPredicate for RetryOnRateLimit {
    fn should_retry(&self, error: &Error, _attempt: usize) -> bool {
        error.api_error().is_some_and(|e| e.is_rate_limited())
    }
}

/// Retries only failures where no response was received.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryOnNetworkError;

impl RetryPredicate for RetryOnNetworkError {
    fn should_retry(&self, error: &Error, _attempt: usize) -> bool {
        matches!(error, Error::Transport(_))
    }
}

/// Retries if ANY inner predicate says so.
///
/// # Examples
///
/// ```
/// use statuspage::retry::{OrPredicate, RetryOn5xx, RetryOnNetworkError};
///
/// let predicate = OrPredicate::new(vec![
///     Box::new(RetryOn5xx),
///     Box::new(RetryOnNetworkError),
/// ]);
/// ```
pub struct OrPredicate {
    predicates: Vec<Box<dyn RetryPredicate>>,
}

impl OrPredicate {
    /// Creates a new `OrPredicate` from a list of predicates.
    pub fn new(predicates: Vec<Box<dyn RetryPredicate>>) -> Self {
        Self { predicates }
    }
}

impl RetryPredicate for OrPredicate {
    fn should_retry(&self, error: &Error, attempt: usize) -> bool {
        self.predicates
            .iter()
            .any(|p| p.should_retry(error, attempt))
    }
}

/// Retries only if ALL inner predicates say so.
pub struct AndPredicate {
    predicates: Vec<Box<dyn RetryPredicate>>,
}

impl AndPredicate {
    /// Creates a new `AndPredicate` from a list of predicates.
    pub fn new(predicates: Vec<Box<dyn RetryPredicate>>) -> Self {
        Self { predicates }
    }
}

impl RetryPredicate for AndPredicate {
    fn should_retry(&self, error: &Error, attempt: usize) -> bool {
        self.predicates
            .iter()
            .all(|p| p.should_retry(error, attempt))
    }
}

/// Observer invoked before each retry delay with the zero-based retry count
/// and the error that triggered the retry.
pub type OnRetry = Arc<dyn Fn(usize, &Error) + Send + Sync>;

/// Governs whether and how a call is retried.
///
/// Cloning is cheap; the predicate and observer are shared.
///
/// # Examples
///
/// ```
/// use statuspage::{DelayStrategy, RetryPolicy};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), statuspage::Error> {
/// let policy = RetryPolicy::builder()
///     .max_attempts(5)
///     .delay(DelayStrategy::Fixed(Duration::from_millis(250)))
///     .on_retry(|n, err| eprintln!("retry #{n} after: {err}"))
///     .build()?;
///
/// assert_eq!(policy.max_attempts(), 5);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: usize,
    delay: DelayStrategy,
    predicate: Arc<dyn RetryPredicate>,
    on_retry: Option<OnRetry>,
    cancellation: Option<CancellationToken>,
    deadline: Option<Duration>,
    rate_limit_max_wait: Option<Duration>,
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("delay", &self.delay)
            .field("on_retry", &self.on_retry.is_some())
            .field("cancellation", &self.cancellation)
            .field("deadline", &self.deadline)
            .field("rate_limit_max_wait", &self.rate_limit_max_wait)
            .finish_non_exhaustive()
    }
}

impl Default for RetryPolicy {
    /// Four attempts, exponential backoff from 100ms with no cap, retrying
    /// transient failures only.
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DelayStrategy::default(),
            predicate: Arc::new(RetryOnTransient),
            on_retry: None,
            cancellation: None,
            deadline: None,
            rate_limit_max_wait: None,
        }
    }
}

enum State<T> {
    Idle,
    Attempting,
    Evaluating(Result<Response<T>>),
    Delaying(Duration, Error),
    Succeeded(Response<T>),
    Failed(Error),
}

impl RetryPolicy {
    /// Creates a new builder starting from the default policy.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// A policy that performs exactly one attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Maximum number of attempts, including the first.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// The delay strategy.
    pub fn delay(&self) -> DelayStrategy {
        self.delay
    }

    /// Returns a copy of this policy bound to `token`.
    ///
    /// Useful to cancel a single call while sharing one configured policy.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancellation: Some(token),
            ..self.clone()
        }
    }

    /// Runs `op` until it succeeds, the budget is spent, the predicate
    /// declines, or the call is cancelled.
    ///
    /// `op` receives the 1-based attempt number and must build a fresh
    /// attempt each time it is called.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<Response<T>>
    where
        F: FnMut(usize) -> Fut,
        Fut: Future<Output = Result<Response<T>>>,
    {
        let started = Instant::now();
        let deadline = self.deadline.and_then(|d| started.checked_add(d));
        let mut attempt = 0;
        let mut last_error: Option<Error> = None;
        let mut state = State::Idle;

        loop {
            state = match state {
                State::Idle => State::Attempting,

                State::Attempting => {
                    if self.is_cancelled(deadline) {
                        State::Failed(last_error.take().unwrap_or(Error::Cancelled))
                    } else {
                        attempt += 1;
                        tokio::select! {
                            biased;
                            _ = self.cancelled(deadline) => {
                                tracing::debug!(attempt = attempt, "Request cancelled in flight");
                                State::Failed(last_error.take().unwrap_or(Error::Cancelled))
                            }
                            result = op(attempt) => State::Evaluating(result),
                        }
                    }
                }

                State::Evaluating(Ok(response)) => State::Succeeded(response),

                State::Evaluating(Err(error)) => {
                    if attempt >= self.max_attempts {
                        if self.max_attempts > 1 {
                            tracing::warn!(
                                error = %error,
                                attempts = attempt,
                                "Retries exhausted"
                            );
                        }
                        State::Failed(error)
                    } else if !self.predicate.should_retry(&error, attempt) {
                        State::Failed(error)
                    } else if self.is_cancelled(deadline) {
                        State::Failed(error)
                    } else {
                        if let Some(on_retry) = &self.on_retry {
                            on_retry(attempt - 1, &error);
                        }
                        let delay = self.delay_after(attempt, &error);
                        tracing::info!(
                            error = %error,
                            delay_ms = delay.as_millis(),
                            attempt = attempt,
                            "Retrying request after delay"
                        );
                        State::Delaying(delay, error)
                    }
                }

                State::Delaying(delay, error) => {
                    tokio::select! {
                        biased;
                        _ = self.cancelled(deadline) => {
                            tracing::debug!(attempt = attempt, "Request cancelled during backoff");
                            State::Failed(error)
                        }
                        _ = tokio::time::sleep(delay) => {
                            last_error = Some(error);
                            State::Attempting
                        }
                    }
                }

                State::Succeeded(mut response) => {
                    response.attempts = attempt;
                    response.latency = started.elapsed();
                    return Ok(response);
                }

                State::Failed(error) => return Err(error),
            };
        }
    }

    /// Prefers a server-provided rate limit hint when configured to.
    fn delay_after(&self, attempt: usize, error: &Error) -> Duration {
        if let Some(max_wait) = self.rate_limit_max_wait {
            if let Some(delay) = error.rate_limit_delay(max_wait) {
                return delay;
            }
        }
        self.delay.delay_for_retry(attempt)
    }

    fn is_cancelled(&self, deadline: Option<Instant>) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
            || deadline.is_some_and(|at| Instant::now() >= at)
    }

    /// Resolves once the call is cancelled; never resolves otherwise.
    async fn cancelled(&self, deadline: Option<Instant>) {
        match (&self.cancellation, deadline) {
            (Some(token), Some(at)) => {
                tokio::select! {
                    _ = token.cancelled() => {}
                    _ = tokio::time::sleep_until(at) => {}
                }
            }
            (Some(token), None) => token.cancelled().await,
            (None, Some(at)) => tokio::time::sleep_until(at).await,
            (None, None) => std::future::pending::<()>().await,
        }
    }
}

/// Builder for [`RetryPolicy`].
#[derive(Default)]
pub struct RetryPolicyBuilder {
    policy: RetryPolicy,
}

impl RetryPolicyBuilder {
    /// Sets the maximum number of attempts (first attempt included). Must be at least 1.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.policy.max_attempts = attempts;
        self
    }

    /// Sets the delay strategy.
    pub fn delay(mut self, delay: DelayStrategy) -> Self {
        self.policy.delay = delay;
        self
    }

    /// Waits `delay` before every retry.
    pub fn fixed_delay(self, delay: Duration) -> Self {
        self.delay(DelayStrategy::Fixed(delay))
    }

    /// Exponential backoff from `base`, capped at `max`, without jitter.
    pub fn exponential_backoff(self, base: Duration, max: Duration) -> Self {
        self.delay(DelayStrategy::Exponential {
            base,
            max: Some(max),
            jitter: false,
        })
    }

    /// Sets the retry predicate.
    pub fn predicate(mut self, predicate: impl RetryPredicate + 'static) -> Self {
        self.policy.predicate = Arc::new(predicate);
        self
    }

    /// Sets the observer invoked before each retry delay.
    pub fn on_retry<F>(mut self, on_retry: F) -> Self
    where
        F: Fn(usize, &Error) + Send + Sync + 'static,
    {
        self.policy.on_retry = Some(Arc::new(on_retry));
        self
    }

    /// Binds the policy to a cancellation token.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.policy.cancellation = Some(token);
        self
    }

    /// Gives up once `deadline` has elapsed since the first attempt started.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.policy.deadline = Some(deadline);
        self
    }

    /// Honors `Retry-After`/`X-RateLimit-Reset` on rate-limited responses,
    /// waiting at most `max_wait` instead of the strategy delay.
    pub fn rate_limit_max_wait(mut self, max_wait: Duration) -> Self {
        self.policy.rate_limit_max_wait = Some(max_wait);
        self
    }

    /// Validates and builds the policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `max_attempts` is zero or an
    /// exponential cap is smaller than its base delay.
    pub fn build(self) -> Result<RetryPolicy> {
        if self.policy.max_attempts == 0 {
            return Err(Error::Configuration(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        if let DelayStrategy::Exponential {
            base,
            max: Some(max),
            ..
        } = self.policy.delay
        {
            if max < base {
                return Err(Error::Configuration(format!(
                    "max delay {:?} is smaller than base delay {:?}",
                    max, base
                )));
            }
        }

        Ok(self.policy)
    }
}
