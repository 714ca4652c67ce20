use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while talking to the API.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be sent or the connection failed.
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// The client's base URL cannot have paths appended to it.
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// The server answered with something other than `200 OK`.
    #[error("received non-200 response status: {0}")]
    UnexpectedStatus(StatusCode),

    /// The response body did not match the expected JSON layout.
    #[error("error decoding JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API returned `null` for the requested resource.
    #[error("{0} does not exist")]
    NotFound(String),

    /// A batch size or concurrency level of zero was supplied.
    #[error("concurrency must be at least 1")]
    InvalidConcurrency,

    /// The batch was cancelled before this fetch could start.
    #[error("batch fetch cancelled")]
    Cancelled,

    /// A fetch task panicked or was aborted.
    #[error("{0}")]
    Task(#[from] tokio::task::JoinError),
}
