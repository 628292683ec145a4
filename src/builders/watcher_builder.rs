//! Builders to construct watchers from configuration.

use crate::api::{
    JobList, ListJobsOptions, ListNodesOptions, ListPartitionsOptions, NodeList, PartitionList,
};
use crate::config::WatchConfig;
use crate::core::{SnapshotSource, Spawn, WatchError};
use crate::watch::{JobPoller, NodePoller, PartitionPoller};

/// One configured poller per resource kind.
#[derive(Debug, Clone)]
pub struct Watchers<S> {
    /// Job poller.
    pub jobs: JobPoller<S>,
    /// Node poller.
    pub nodes: NodePoller<S>,
    /// Partition poller.
    pub partitions: PartitionPoller<S>,
}

/// Build the three pollers from watch configuration, sharing one spawner.
///
/// # Errors
///
/// Returns [`WatchError::InvalidConfig`] when any poller configuration is
/// invalid; nothing is built in that case.
pub fn build_watchers<S, J, N, P>(
    cfg: &WatchConfig,
    jobs: J,
    nodes: N,
    partitions: P,
    spawner: S,
) -> Result<Watchers<S>, WatchError>
where
    S: Spawn + Clone,
    J: SnapshotSource<ListJobsOptions, JobList>,
    N: SnapshotSource<ListNodesOptions, NodeList>,
    P: SnapshotSource<ListPartitionsOptions, PartitionList>,
{
    cfg.validate().map_err(WatchError::InvalidConfig)?;

    Ok(Watchers {
        jobs: JobPoller::new(jobs)
            .with_config(cfg.jobs.clone())
            .with_spawner(spawner.clone()),
        nodes: NodePoller::new(nodes)
            .with_config(cfg.nodes.clone())
            .with_spawner(spawner.clone()),
        partitions: PartitionPoller::new(partitions)
            .with_config(cfg.partitions.clone())
            .with_spawner(spawner),
    })
}
