use std::{num::NonZeroUsize, sync::Arc};

use crate::{
    batch::{BatchFetcher, BatchResult, Fetch},
    error::Error,
    models::{item::Item, stories::StoryKind, user::User},
    result::Result,
};
use async_trait::async_trait;
use reqwest::{header::USER_AGENT, Client as ReqwestClient, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::{ParseError, Url};

/// Root of version 0 of the API.
pub const BASE_URL_V0: &str = "https://hacker-news.firebaseio.com/v0";

/// How many items [`Client::items`] fetches at once unless told otherwise.
pub const DEFAULT_CONCURRENCY: usize = 10;

const DEFAULT_PERMITS: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CONCURRENCY) {
    Some(n) => n,
    None => panic!("DEFAULT_CONCURRENCY must be non-zero"),
};

const AGENT: &str = concat!("hnfetch/", env!("CARGO_PKG_VERSION"));

/// Handle for making requests against the API.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: ReqwestClient,
    base_url: Arc<str>,
    concurrency: NonZeroUsize,
}

impl Client {
    /// Creates a client for the public API.
    pub fn new() -> Client {
        Client::with_base_url(BASE_URL_V0)
    }

    /// Creates a client that talks to `base_url` instead of the public API.
    ///
    /// `base_url` is the root that `item/<id>.json` and friends are
    /// resolved against; a trailing `/` is ignored.
    pub fn with_base_url(base_url: impl Into<String>) -> Client {
        let base_url: String = base_url.into();
        Client {
            http: ReqwestClient::new(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
            concurrency: DEFAULT_PERMITS,
        }
    }

    /// Returns a copy of this client that fetches `concurrency` items at once
    /// in batch operations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConcurrency`] if `concurrency` is zero.
    pub fn with_concurrency(&self, concurrency: usize) -> Result<Client> {
        let concurrency = NonZeroUsize::new(concurrency).ok_or(Error::InvalidConcurrency)?;
        Ok(Client {
            concurrency,
            ..self.clone()
        })
    }

    /// Returns the root URL requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns how many items batch operations fetch at once.
    pub fn concurrency(&self) -> usize {
        self.concurrency.get()
    }

    /// Builds `<base_url>/<segments..>.json`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ParseError::RelativeUrlWithCannotBeABaseBase)?;
            path.pop_if_empty();
            if let Some((last, parents)) = segments.split_last() {
                path.extend(parents);
                path.push(&format!("{last}.json"));
            }
        }
        Ok(url)
    }

    pub(crate) async fn fetch_json<T>(&self, segments: &[&str]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let response = {
            let builder = self.http.get(url.clone()).header(USER_AGENT, AGENT);
            log::debug!("request for {} dispatched", url);
            builder.send().await?
        };

        log::trace!("response: {:#?}", &response);
        log::debug!("response status: {}", &response.status());

        match response.status() {
            StatusCode::OK => {
                let body = response.bytes().await?;
                serde_json::from_slice(&body).map_err(Into::into)
            }
            code => Err(Error::UnexpectedStatus(code)),
        }
    }

    /// Fetches a resource the API answers with `null` when it does not exist.
    async fn fetch_resource<T>(&self, kind: &str, key: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let resource: Option<T> = self.fetch_json(&[kind, key]).await?;
        resource.ok_or_else(|| Error::NotFound(format!("{kind}/{key}")))
    }

    /// Fetches a single item.
    ///
    /// # Errors
    ///
    /// Fails if the request fails, the server does not answer `200 OK`,
    /// the body cannot be decoded, or the item does not exist.
    pub async fn item(&self, id: u32) -> Result<Item> {
        self.fetch_resource("item", &id.to_string()).await
    }

    /// Fetches a user profile. Usernames are case-sensitive and are
    /// percent-encoded into the request path.
    ///
    /// # Errors
    ///
    /// Fails if the request fails, the server does not answer `200 OK`,
    /// the body cannot be decoded, or the user does not exist.
    pub async fn user(&self, username: &str) -> Result<User> {
        self.fetch_resource("user", username).await
    }

    /// Fetches many items, at most [`Client::concurrency`] at a time.
    ///
    /// Items come back in the order their requests finished. If any fetch
    /// fails, the first failure is kept in [`BatchResult::error`] and the
    /// records hold whatever succeeded.
    pub async fn items(&self, ids: &[u32]) -> BatchResult<Item> {
        self.batch().fetch(ids).await
    }

    /// Like [`Client::items`], but stops starting new requests once `cancel`
    /// fires. Requests already in flight are awaited before returning.
    pub async fn items_with_cancel(
        &self,
        ids: &[u32],
        cancel: &CancellationToken,
    ) -> BatchResult<Item> {
        self.batch().fetch_with_cancel(ids, cancel).await
    }

    fn batch(&self) -> BatchFetcher<Client> {
        BatchFetcher::with_permits(Arc::new(self.clone()), self.concurrency)
    }

    /// Fetches the ids on one of the story lists.
    ///
    /// # Errors
    ///
    /// Fails if the request fails, the server does not answer `200 OK`,
    /// or the body is not a list of ids.
    pub async fn story_ids(&self, kind: StoryKind) -> Result<Vec<u32>> {
        self.fetch_json(&[kind.endpoint()]).await
    }

    /// Fetches the ids of the current top stories.
    ///
    /// # Errors
    ///
    /// See [`Client::story_ids`].
    pub async fn top_story_ids(&self) -> Result<Vec<u32>> {
        self.story_ids(StoryKind::Top).await
    }

    /// Fetches the ids of the newest stories.
    ///
    /// # Errors
    ///
    /// See [`Client::story_ids`].
    pub async fn new_story_ids(&self) -> Result<Vec<u32>> {
        self.story_ids(StoryKind::New).await
    }

    /// Fetches the ids of the best stories.
    ///
    /// # Errors
    ///
    /// See [`Client::story_ids`].
    pub async fn best_story_ids(&self) -> Result<Vec<u32>> {
        self.story_ids(StoryKind::Best).await
    }

    /// Fetches the ids of the latest Ask HN stories.
    ///
    /// # Errors
    ///
    /// See [`Client::story_ids`].
    pub async fn ask_story_ids(&self) -> Result<Vec<u32>> {
        self.story_ids(StoryKind::Ask).await
    }

    /// Fetches the ids of the latest Show HN stories.
    ///
    /// # Errors
    ///
    /// See [`Client::story_ids`].
    pub async fn show_story_ids(&self) -> Result<Vec<u32>> {
        self.story_ids(StoryKind::Show).await
    }

    /// Fetches the ids of the latest job postings.
    ///
    /// # Errors
    ///
    /// See [`Client::story_ids`].
    pub async fn job_story_ids(&self) -> Result<Vec<u32>> {
        self.story_ids(StoryKind::Job).await
    }

    /// Fetches the largest item id handed out so far.
    ///
    /// # Errors
    ///
    /// Fails if the request fails, the server does not answer `200 OK`,
    /// or the body is not an id.
    pub async fn max_item_id(&self) -> Result<u32> {
        self.fetch_json(&["maxitem"]).await
    }

    /// Fetches a story list and then the stories on it.
    ///
    /// With `limit`, only the first `limit` ids of the list are fetched.
    ///
    /// # Errors
    ///
    /// Fails if the story list itself cannot be fetched. Failures of
    /// individual stories are reported through [`BatchResult::error`].
    pub async fn stories(
        &self,
        kind: StoryKind,
        limit: Option<usize>,
    ) -> Result<BatchResult<Item>> {
        let mut ids = self.story_ids(kind).await?;
        if let Some(limit) = limit {
            ids.truncate(limit);
        }
        log::info!("fetching {} {} items", ids.len(), kind.endpoint());
        Ok(self.items(&ids).await)
    }
}

#[async_trait]
impl Fetch for Client {
    type Record = Item;

    async fn fetch(&self, id: u32) -> Result<Item> {
        self.item(id).await
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Client, BASE_URL_V0, DEFAULT_CONCURRENCY};
    use crate::error::Error;

    #[test]
    fn defaults() {
        let client = Client::default();
        assert_eq!(client.base_url(), BASE_URL_V0);
        assert_eq!(client.concurrency(), DEFAULT_CONCURRENCY);
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = Client::with_base_url("http://localhost:1234/v0/");
        assert_eq!(client.base_url(), "http://localhost:1234/v0");
    }

    #[test]
    fn concurrency_is_per_copy() {
        let client = Client::new();
        let wide = client.with_concurrency(100).unwrap();
        assert_eq!(wide.concurrency(), 100);
        assert_eq!(client.concurrency(), DEFAULT_CONCURRENCY);
        assert_eq!(wide.base_url(), client.base_url());
    }

    #[test]
    fn endpoint_encodes_segments() {
        let client = Client::with_base_url("http://localhost:1234/v0");
        let url = client.endpoint(&["user", "a/b?c#d e"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:1234/v0/user/a%2Fb%3Fc%23d%20e.json"
        );

        let client = Client::with_base_url("http://localhost:1234");
        let url = client.endpoint(&["maxitem"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/maxitem.json");
    }

    #[test]
    fn unusable_base_url_is_an_error() {
        let client = Client::with_base_url("not a url");
        assert!(matches!(client.endpoint(&["maxitem"]), Err(Error::BaseUrl(_))));

        let client = Client::with_base_url("mailto:someone@example.com");
        assert!(matches!(client.endpoint(&["maxitem"]), Err(Error::BaseUrl(_))));
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        assert!(matches!(
            Client::new().with_concurrency(0),
            Err(Error::InvalidConcurrency)
        ));
    }
}
