//! Scheduler resource records and the watch option and event types built on them.
//!
//! These mirror the subset of the REST API surface the watchers need: the
//! records returned by listing endpoints, the filters those endpoints accept,
//! and the per-session watch options and events.

pub mod job;
pub mod node;
pub mod partition;

pub use job::{
    Job, JobEvent, JobEventType, JobList, JobTransition, ListJobsOptions, WatchJobsOptions,
    JOB_STATE_COMPLETED, TERMINAL_JOB_STATES,
};
pub use node::{
    ListNodesOptions, Node, NodeEvent, NodeEventType, NodeList, NodeTransition, WatchNodesOptions,
};
pub use partition::{
    ListPartitionsOptions, Partition, PartitionEvent, PartitionEventType, PartitionList,
    WatchPartitionsOptions,
};
