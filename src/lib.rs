#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]
//! # hnfetch
//!
//! hnfetch is a convenient wrapper library around the Hacker News read-only API.
//!
//! This library can fetch:
//! - [`Item`]s: stories, comments, jobs, polls and poll options
//! - [`User`]s
//! - the story lists (top, new, best, ask, show, job)
//!
//! Many items can be fetched at once with [`Client::items`], which keeps at
//! most [`Client::concurrency`] requests in flight. The same engine works
//! for any [`Fetch`] implementation through [`BatchFetcher`].
//!
//! ## Example: Printing the current top stories.
//!
//! ```rust,no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use hnfetch::stories::StoryKind;
//! use hnfetch::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new().with_concurrency(20)?;
//!     let batch = client.stories(StoryKind::Top, Some(30)).await?;
//!
//!     for story in batch.records() {
//!         println!("{:>5} {}", story.score().unwrap_or(0), story.title().unwrap_or(""));
//!     }
//!     if let Some(err) = batch.error() {
//!         eprintln!("some stories could not be fetched: {err}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`Item`]: crate::item::Item
//! [`User`]: crate::user::User
//! [`Fetch`]: crate::batch::Fetch
//! [`BatchFetcher`]: crate::batch::BatchFetcher

/// Bounded-concurrency fetching of many records at once.
pub mod batch;

/// Client module contains [`Client`] for requesting data.
pub mod client;

/// Contains [`Error`]s that can be thrown by the libary.
///
/// [`Error`]: crate::error::Error
pub mod error;

pub(crate) mod models;

/// Crate-wide [`Result`](std::result::Result) alias.
pub mod result;

pub use batch::{fetch_batch, BatchFetcher, BatchResult, Fetch};
pub use client::Client;
pub use models::*;
