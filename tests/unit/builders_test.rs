//! Tests for builder modules

use std::time::Duration;

use slurm_watch::api::{
    JobList, ListJobsOptions, ListNodesOptions, ListPartitionsOptions, NodeList, PartitionList,
};
use slurm_watch::builders::build_watchers;
use slurm_watch::config::{ColdStart, PollerConfig, WatchConfig};
use slurm_watch::core::WatchError;
use slurm_watch::runtime::TokioSpawner;
use slurm_watch::CancellationToken;

fn jobs(_cancel: CancellationToken, _opts: ListJobsOptions) -> std::future::Ready<anyhow::Result<JobList>> {
    std::future::ready(Ok(JobList::default()))
}

fn nodes(_cancel: CancellationToken, _opts: ListNodesOptions) -> std::future::Ready<anyhow::Result<NodeList>> {
    std::future::ready(Ok(NodeList::default()))
}

fn partitions(
    _cancel: CancellationToken,
    _opts: ListPartitionsOptions,
) -> std::future::Ready<anyhow::Result<PartitionList>> {
    std::future::ready(Ok(PartitionList::default()))
}

#[test]
fn test_build_watchers_applies_config() {
    let cfg = WatchConfig {
        jobs: PollerConfig::new().with_poll_interval(Duration::from_secs(2)),
        nodes: PollerConfig::new().with_buffer_size(8),
        partitions: PollerConfig::new().with_cold_start(ColdStart::Baseline),
    };

    let watchers = build_watchers(&cfg, jobs, nodes, partitions, TokioSpawner::default()).unwrap();
    assert_eq!(watchers.jobs.config().poll_interval, Duration::from_secs(2));
    assert_eq!(watchers.nodes.config().buffer_size, 8);
    assert_eq!(watchers.partitions.config().cold_start, ColdStart::Baseline);
}

#[test]
fn test_build_watchers_rejects_invalid_config() {
    let cfg = WatchConfig {
        nodes: PollerConfig::new().with_buffer_size(0),
        ..WatchConfig::default()
    };
    let err = build_watchers(&cfg, jobs, nodes, partitions, TokioSpawner::default()).unwrap_err();
    assert!(matches!(err, WatchError::InvalidConfig(_)));
}

#[tokio::test]
async fn test_built_watchers_start_sessions() {
    let watchers =
        build_watchers(&WatchConfig::default(), jobs, nodes, partitions, TokioSpawner::default()).unwrap();
    let cancel = CancellationToken::new();
    let mut stream = watchers
        .nodes
        .watch(cancel.clone(), Default::default())
        .unwrap();
    cancel.cancel();
    assert!(stream.recv().await.is_none());
}
