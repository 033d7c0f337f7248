//! Shows the ways a retry policy can be configured.
//!
//! This example shows how to:
//! - Install a client-wide policy
//! - Override it for a single call
//! - Compose predicates and observe retries
//! - Cancel a call that is backing off
//!
//! Set `STATUSPAGE_API_KEY`, then run with: `cargo run --example retry_policies`

use http::Method;
use statuspage::retry::{AndPredicate, RetryOnTransient};
use statuspage::{CancellationToken, Client, Error, Json, RetryPolicy};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("statuspage=debug")
        .init();

    let api_key = std::env::var("STATUSPAGE_API_KEY")?;

    // Client-wide: up to 5 attempts, 250ms doubling to at most 4s.
    let policy = RetryPolicy::builder()
        .max_attempts(5)
        .exponential_backoff(Duration::from_millis(250), Duration::from_secs(4))
        .on_retry(|retry, err| println!("retry #{} after: {}", retry, err))
        .rate_limit_max_wait(Duration::from_secs(30))
        .build()?;

    let client = Client::builder()
        .api_key(api_key)
        .retry_policy(policy)
        .build()?;

    let pages = client.pages().list().await?;
    println!("{} page(s), {} attempt(s)", pages.len(), pages.attempts);

    // Per call: give up after the first failure.
    let request = client.request(Method::GET, "pages")?.build()?;
    let once = client
        .execute(
            &request,
            Json::<Vec<serde_json::Value>>::new(),
            Some(&RetryPolicy::no_retry()),
        )
        .await?;
    println!("single attempt: {}", once.status);

    // Retry transient failures, but only for the first two retries.
    let bounded = RetryPolicy::builder()
        .max_attempts(10)
        .fixed_delay(Duration::from_millis(500))
        .predicate(AndPredicate::new(vec![
            Box::new(RetryOnTransient),
            Box::new(|_: &Error, attempt: usize| attempt <= 2),
        ]))
        .build()?;
    let bounded_result = client
        .execute(&request, Json::<Vec<serde_json::Value>>::new(), Some(&bounded))
        .await;
    println!("bounded: {:?}", bounded_result.map(|r| r.attempts));

    // Cancellation: stop waiting as soon as the token fires.
    let token = CancellationToken::new();
    let cancellable = bounded.with_cancellation(token.clone());
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        token.cancel();
    });
    match client
        .execute(&request, Json::<Vec<serde_json::Value>>::new(), Some(&cancellable))
        .await
    {
        Ok(response) => println!("finished before cancellation: {}", response.status),
        Err(Error::Cancelled) => println!("cancelled before any attempt completed"),
        Err(e) => println!("cancelled after failure: {}", e),
    }

    Ok(())
}
