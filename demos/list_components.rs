//! Lists the components of a page and their current status.
//!
//! Set `STATUSPAGE_API_KEY` and `STATUSPAGE_PAGE_ID`, then run with:
//! `cargo run --example list_components`

use statuspage::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("statuspage=info")
        .init();

    let api_key = std::env::var("STATUSPAGE_API_KEY")?;
    let page_id = std::env::var("STATUSPAGE_PAGE_ID")?;

    let client = Client::builder().api_key(api_key).default_retry().build()?;

    let components = client.components().list(&page_id).await?;
    println!(
        "{} components ({:?}, {} attempt(s))",
        components.len(),
        components.latency,
        components.attempts
    );

    for component in components.iter() {
        let status = component
            .status
            .map(|s| format!("{:?}", s))
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<30} {}", component.name, status);
    }

    let unresolved = client.incidents().list_unresolved(&page_id).await?;
    println!("\n{} unresolved incident(s)", unresolved.len());
    for incident in unresolved.iter() {
        println!("  {} [{:?}]", incident.name, incident.status);
    }

    Ok(())
}
