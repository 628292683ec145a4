//! Partition records, listing filters, watch options and events.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A partition as returned by the scheduler's listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Partition {
    /// Partition name.
    pub name: String,
    /// Partition state (`UP`, `DOWN`, `DRAIN`, `INACTIVE`).
    pub state: String,
    /// Total nodes.
    pub total_nodes: u32,
    /// Nodes available for scheduling.
    pub available_nodes: u32,
    /// Total CPUs.
    pub total_cpus: u32,
    /// Idle CPUs.
    pub idle_cpus: u32,
    /// Maximum job time in minutes.
    pub max_time: u32,
    /// Default job time in minutes.
    pub default_time: u32,
    /// Maximum memory per job in MB.
    pub max_memory: u64,
    /// Default memory per job in MB.
    pub default_memory: u64,
    /// Users allowed to submit.
    pub allowed_users: Vec<String>,
    /// Users denied submission.
    pub denied_users: Vec<String>,
    /// Scheduling priority tier.
    pub priority: i64,
    /// Member nodes.
    pub nodes: Vec<String>,
}

impl Partition {
    /// Minimal partition with a name and state.
    pub fn new(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
            ..Self::default()
        }
    }
}

/// A page of partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionList {
    /// Partitions in this page.
    pub partitions: Vec<Partition>,
    /// Total number of partitions matching the filter.
    pub total: usize,
}

impl From<Vec<Partition>> for PartitionList {
    fn from(partitions: Vec<Partition>) -> Self {
        Self {
            total: partitions.len(),
            partitions,
        }
    }
}

/// Filter accepted by the partition listing operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListPartitionsOptions {
    /// Only partitions in one of these states.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<String>,
    /// Page size; 0 means no limit.
    pub limit: usize,
    /// Page offset.
    pub offset: usize,
}

/// Options for one partition watch session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchPartitionsOptions {
    /// Only these partitions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub partition_names: Vec<String>,
    /// Only partitions in one of these states (case-insensitive).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<String>,
    /// Do not report partitions appearing for the first time.
    pub exclude_new: bool,
    /// Only these event types; empty means all.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_types: Vec<PartitionEventType>,
    /// End the session after this many events; 0 means no limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_events: Option<usize>,
}

/// Kind of partition event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitionEventType {
    /// A partition appeared in the listing.
    #[serde(rename = "partition_new")]
    New,
    /// A partition's state changed.
    #[serde(rename = "partition_state_change")]
    StateChange,
    /// A partition disappeared from the listing.
    #[serde(rename = "partition_removed")]
    Removed,
}

impl PartitionEventType {
    /// Wire name of the event type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "partition_new",
            Self::StateChange => "partition_state_change",
            Self::Removed => "partition_removed",
        }
    }
}

impl fmt::Display for PartitionEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change observed on one partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionEvent {
    /// Event type tag.
    pub event_type: PartitionEventType,
    /// Partition name.
    pub partition_name: String,
    /// State before the change; absent for new partitions.
    pub previous_state: Option<String>,
    /// State after the change; absent for removed partitions.
    pub new_state: Option<String>,
    /// Milliseconds since the epoch when the change was observed.
    pub event_time_ms: u128,
    /// The partition as last observed.
    pub partition: Partition,
}
