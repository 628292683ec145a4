//! Snapshot source abstraction.
//!
//! A snapshot source fetches the full current listing of one resource type. It
//! is supplied by the caller (typically a version-specific REST adapter); the
//! watcher never performs network I/O itself.

use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::AppResult;

/// Fetches the current listing of a resource collection.
///
/// `O` is the resource's list-filter type and `L` the collection it returns.
/// The token passed in is cancelled when the watch stops; sources may use it to
/// abort in-flight requests, though the poller stops waiting on them either way.
///
/// Any closure `Fn(CancellationToken, O) -> impl Future<Output = AppResult<L>>`
/// is a source:
///
/// ```rust,ignore
/// use slurm_watch::api::{JobList, ListJobsOptions};
/// use slurm_watch::watch::JobPoller;
///
/// let poller = JobPoller::new(move |_cancel, opts: ListJobsOptions| {
///     let client = client.clone();
///     async move { client.list_jobs(&opts).await }
/// });
/// ```
#[async_trait]
pub trait SnapshotSource<O, L>: Send + Sync + 'static
where
    O: Send + 'static,
    L: Send + 'static,
{
    /// List the collection using the given filter.
    async fn list(&self, cancel: CancellationToken, options: O) -> AppResult<L>;
}

#[async_trait]
impl<F, Fut, O, L> SnapshotSource<O, L> for F
where
    F: Fn(CancellationToken, O) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<L>> + Send + 'static,
    O: Send + 'static,
    L: Send + 'static,
{
    async fn list(&self, cancel: CancellationToken, options: O) -> AppResult<L> {
        (self)(cancel, options).await
    }
}
