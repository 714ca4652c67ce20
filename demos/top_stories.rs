//! Example printing the current front page along with a user profile
//!
//! This example shows:
//! - Creating a client with a custom concurrency level
//! - Fetching the top stories in one batch
//! - Handling a partially failed batch
//! - Fetching a user profile

use hnfetch::stories::StoryKind;
use hnfetch::Client;
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Type alias for simplifying error handling
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Show the client's request logs
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    // Fetch up to 20 items at a time
    let client = Client::new().with_concurrency(20)?;

    let batch = client.stories(StoryKind::Top, Some(30)).await?;
    for story in batch.records() {
        println!(
            "{:>5} {} ({})",
            story.score().unwrap_or_default(),
            story.title().unwrap_or("[untitled]"),
            story.by().unwrap_or("[deleted]"),
        );
    }

    // The records are still usable when some fetches failed
    if let Some(err) = batch.error() {
        eprintln!("some stories could not be fetched: {err}");
    }

    let user = client.user("pg").await?;
    println!("{} has {} karma", user.id(), user.karma());

    Ok(())
}
