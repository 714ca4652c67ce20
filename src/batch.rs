use std::{num::NonZeroUsize, sync::Arc};

use async_trait::async_trait;
use tokio::{sync::Semaphore, task::JoinSet};
use tokio_util::sync::CancellationToken;

use crate::{error::Error, result::Result};

/// A single-record fetch that the batch engine can fan out.
///
/// Implementations must tolerate being called concurrently from many tasks;
/// each call performs one independent request.
#[async_trait]
pub trait Fetch: Send + Sync + 'static {
    /// What a successful fetch yields.
    type Record: Send + 'static;

    /// Fetches the record identified by `id`.
    async fn fetch(&self, id: u32) -> Result<Self::Record>;
}

/// The outcome of a batch fetch.
///
/// Records are kept in the order their fetches finished, not in the order
/// the ids were given. At most one error is kept: the first one observed.
/// When an error is present the records are a partial result.
#[derive(Debug)]
pub struct BatchResult<T> {
    records: Vec<T>,
    error: Option<Error>,
}

impl<T> BatchResult<T> {
    fn with_capacity(capacity: usize) -> Self {
        BatchResult {
            records: Vec::with_capacity(capacity),
            error: None,
        }
    }

    fn record(&mut self, outcome: Result<T>) {
        match outcome {
            Ok(record) => self.records.push(record),
            Err(err) if self.error.is_none() => self.error = Some(err),
            Err(err) => log::debug!("dropping subsequent batch error: {err}"),
        }
    }

    /// Returns the successfully fetched records, in completion order.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Returns the first error observed, if any fetch failed.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Returns `true` if every fetch succeeded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Splits the result into the fetched records and the first error.
    pub fn into_parts(self) -> (Vec<T>, Option<Error>) {
        (self.records, self.error)
    }

    /// Converts into an all-or-nothing [`Result`], discarding partial
    /// records when any fetch failed.
    ///
    /// # Errors
    ///
    /// Returns the first error observed during the batch.
    pub fn into_result(self) -> Result<Vec<T>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.records),
        }
    }
}

/// Fetches many records at once while capping how many requests are in
/// flight.
///
/// Every id gets its own task as soon as the batch starts. A task holds one
/// of `batch_size` permits for the duration of its fetch and gives it back
/// before reporting. A failed fetch never stops its siblings, and a batch
/// call only returns once every task has finished.
pub struct BatchFetcher<F> {
    fetcher: Arc<F>,
    batch_size: NonZeroUsize,
}

impl<F: Fetch> BatchFetcher<F> {
    /// Creates a batch fetcher allowing `batch_size` concurrent fetches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConcurrency`] if `batch_size` is zero.
    pub fn new(fetcher: Arc<F>, batch_size: usize) -> Result<Self> {
        let batch_size = NonZeroUsize::new(batch_size).ok_or(Error::InvalidConcurrency)?;
        Ok(Self::with_permits(fetcher, batch_size))
    }

    pub(crate) fn with_permits(fetcher: Arc<F>, batch_size: NonZeroUsize) -> Self {
        BatchFetcher {
            fetcher,
            batch_size,
        }
    }

    /// Returns the maximum number of concurrent fetches.
    pub fn batch_size(&self) -> usize {
        self.batch_size.get()
    }

    /// Fetches every id in `ids`. Duplicate ids are fetched once each.
    pub async fn fetch(&self, ids: &[u32]) -> BatchResult<F::Record> {
        self.fetch_with_cancel(ids, &CancellationToken::new()).await
    }

    /// Like [`BatchFetcher::fetch`], but stops starting new fetches once
    /// `cancel` fires.
    ///
    /// Tasks still waiting for a permit finish with [`Error::Cancelled`]
    /// without making a request. Fetches already running are awaited, so no
    /// work outlives the call.
    pub async fn fetch_with_cancel(
        &self,
        ids: &[u32],
        cancel: &CancellationToken,
    ) -> BatchResult<F::Record> {
        let mut batch = BatchResult::with_capacity(ids.len());
        if ids.is_empty() {
            return batch;
        }

        let permits = Arc::new(Semaphore::new(self.batch_size.get()));
        let mut tasks = JoinSet::new();
        log::debug!(
            "dispatching {} fetches with {} permits",
            ids.len(),
            self.batch_size
        );

        for &id in ids {
            let fetcher = Arc::clone(&self.fetcher);
            let permits = Arc::clone(&permits);
            let cancel = cancel.clone();
            tasks.spawn(async move {
                let permit = tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(Error::Cancelled),
                    // a closed pool hands out no more permits
                    permit = permits.acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => return Err(Error::Cancelled),
                    },
                };
                log::trace!("fetching {id}");
                let outcome = fetcher.fetch(id).await;
                drop(permit);
                outcome
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(err) => Err(Error::Task(err)),
            };
            batch.record(outcome);
        }

        log::debug!(
            "batch finished with {} records{}",
            batch.records.len(),
            if batch.is_ok() { "" } else { " and an error" }
        );
        batch
    }
}

/// Fetches `ids` through `fetcher` with at most `batch_size` requests in
/// flight.
///
/// # Errors
///
/// Returns [`Error::InvalidConcurrency`] if `batch_size` is zero. Fetch
/// failures are reported through [`BatchResult::error`] instead.
pub async fn fetch_batch<F: Fetch>(
    fetcher: Arc<F>,
    ids: &[u32],
    batch_size: usize,
) -> Result<BatchResult<F::Record>> {
    Ok(BatchFetcher::new(fetcher, batch_size)?.fetch(ids).await)
}
