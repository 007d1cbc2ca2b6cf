//! Simple SDK Example
//!
//! Creates a short link, hosts a page and publishes a repost.
//!
//! # Usage
//!
//! ```bash
//! PUBHUB_API_KEY=pk_test_... cargo run --example simple
//! ```

use futures::TryStreamExt;
use pubhub_sdk::{CreateShortLink, PublishOptions, PublishTarget, PubhubClient, VideoSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Pubhub SDK - Simple Example");
    println!("===========================\n");

    let client = PubhubClient::from_env()?;

    // 1. Short link
    println!("1. Creating a short link...");
    let link = client
        .short_links()
        .create(CreateShortLink::new("https://example.com/menu").title("Menu"))
        .await?;
    println!("   ✓ {} -> {}\n", link.short_url.unwrap_or_default(), link.destination_url);

    // 2. Hosted page
    println!("2. Hosting a page...");
    let page = client
        .html_hosting()
        .create_from_html("Landing", "<h1>Hello from Pubhub</h1>")
        .await?;
    println!("   ✓ Page {} at {}\n", page.id, page.url.unwrap_or_default());

    // 3. Workspaces
    println!("3. Workspaces:");
    let workspaces: Vec<_> = client.workspaces().list_all(20).try_collect().await?;
    for workspace in &workspaces {
        println!("   - {} ({})", workspace.name, workspace.id);
    }
    println!();

    // 4. Repost into the first workspace
    if let Some(workspace) = workspaces.first() {
        println!("4. Publishing a repost...");
        let source = VideoSource::detect("https://youtube.com/shorts/abc123XYZ")?;
        let task = client
            .tasks()
            .publish(
                PublishTarget::Workspace(workspace.id.clone()),
                source,
                PublishOptions::default().caption("Reposted with Pubhub"),
            )
            .await?;
        println!("   ✓ Task {} is {}", task.id, task.status);
    }

    Ok(())
}
