//! Example demonstrating error handling.
//!
//! This example shows how to:
//! - Tell permanent failures from transient ones
//! - Read the API's message and the failed request line
//! - Inspect rate limit hints
//! - Deal with bodies that do not decode
//!
//! Set `STATUSPAGE_API_KEY`, then run with: `cargo run --example error_handling`

use statuspage::models::Page;
use statuspage::{Classification, Client, Error, Json};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("statuspage=info")
        .init();

    let api_key = std::env::var("STATUSPAGE_API_KEY")?;
    let client = Client::builder().api_key(api_key).default_retry().build()?;

    println!("=== Example 1: A resource that does not exist ===");
    match client.pages().get("does-not-exist").await {
        Ok(page) => println!("Found: {}", page.name),
        Err(Error::Api(err)) => {
            println!("  {} {}: {}", err.method, err.uri, err.message);
            println!("  Classification: {:?}", err.classification);
            if err.is_rate_limited() {
                if let Some(info) = &err.rate_limit {
                    println!("  Rate limited, retry after {:?}", info.retry_after);
                }
            }
        }
        Err(e) => println!("  Other error: {}", e),
    }

    println!("\n=== Example 2: Classifying any error ===");
    let mut unauthenticated = client.clone();
    unauthenticated.set_api_key("invalid")?;
    if let Err(e) = unauthenticated.pages().list().await {
        match e.classification() {
            Some(Classification::TransientNetwork) => println!("  Network trouble: {}", e),
            Some(Classification::TransientServer) => println!("  Server trouble: {}", e),
            Some(Classification::PermanentClient) => println!("  Fix the request: {}", e),
            Some(Classification::DecodeFailure) => println!("  Unexpected body: {}", e),
            None => println!("  Local error: {}", e),
        }
        println!("  Retryable: {}", e.is_retryable());
    }

    println!("\n=== Example 3: Decoding failures keep the raw body ===");
    let request = client.request(http::Method::GET, "pages")?.build()?;
    match client.execute(&request, Json::<Vec<Page>>::new(), None).await {
        Ok(response) => println!("  Decoded {} page(s)", response.data.len()),
        Err(Error::Decode { raw_body, source, .. }) => {
            println!("  Decode failed: {}", source);
            println!("  Raw body: {}", String::from_utf8_lossy(&raw_body));
        }
        Err(e) => println!("  Error: {}", e),
    }

    Ok(())
}
