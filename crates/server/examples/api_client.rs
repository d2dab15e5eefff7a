//! Walks through the ticket cluster API against a running server.

use reqwest::Client;
use serde_json::json;

const SERVER_URL: &str = "http://localhost:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    // Example 1: Health check
    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 2: Classify a single ticket
    println!("2. Classify Ticket:");
    let resp = client
        .post(format!("{SERVER_URL}/cluster"))
        .json(&json!({
            "subject": "Charged twice this month",
            "body": "My invoice shows a duplicate charge, please refund it.",
            "priority": 1
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 3: Batch classification
    println!("3. Classify Batch:");
    let resp = client
        .post(format!("{SERVER_URL}/cluster/batch"))
        .json(&json!([
            {"subject": "App crashes on login", "body": "Error 500 after the update"},
            {"subject": "Password reset", "body": "The reset link never arrives"},
            {"subject": "Refund", "body": "Cancelled plan but still billed"}
        ]))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 4: Cluster catalog
    println!("4. Cluster Catalog:");
    let resp = client.get(format!("{SERVER_URL}/clusters")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 5: Cluster detail
    println!("5. Cluster Detail:");
    let resp = client.get(format!("{SERVER_URL}/clusters/0")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);

    Ok(())
}
