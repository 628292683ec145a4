//! Node records, listing filters, watch options and events.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A compute node as returned by the scheduler's listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    /// Node name.
    pub name: String,
    /// Node state (`IDLE`, `ALLOCATED`, `MIXED`, `DOWN`, `IDLE+DRAIN`, ...).
    pub state: String,
    /// Total CPUs.
    pub cpus: u32,
    /// Memory in MB.
    pub memory: u64,
    /// Partitions the node belongs to.
    pub partitions: Vec<String>,
    /// Feature tags.
    pub features: Vec<String>,
    /// Reason set by an administrator, e.g. for a drain.
    pub reason: String,
    /// CPU architecture.
    pub architecture: String,
    /// CPU load average.
    pub cpu_load: f64,
    /// Allocated CPUs.
    pub alloc_cpus: u32,
    /// Allocated memory in MB.
    pub alloc_memory: u64,
    /// Free memory in MB.
    pub free_memory: u64,
}

impl Node {
    /// Minimal node with a name and state.
    pub fn new(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
            ..Self::default()
        }
    }

    /// Set the partitions.
    #[must_use]
    pub fn with_partitions<I, S>(mut self, partitions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partitions = partitions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the feature tags.
    #[must_use]
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }
}

/// A page of nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeList {
    /// Nodes in this page.
    pub nodes: Vec<Node>,
    /// Total number of nodes matching the filter.
    pub total: usize,
}

impl From<Vec<Node>> for NodeList {
    fn from(nodes: Vec<Node>) -> Self {
        Self {
            total: nodes.len(),
            nodes,
        }
    }
}

/// Filter accepted by the node listing operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListNodesOptions {
    /// Only nodes in one of these states.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<String>,
    /// Only nodes in this partition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    /// Only nodes carrying all of these features.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    /// Page size; 0 means no limit.
    pub limit: usize,
    /// Page offset.
    pub offset: usize,
}

/// Options for one node watch session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchNodesOptions {
    /// Only these nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub node_names: Vec<String>,
    /// Only nodes in one of these states (case-insensitive).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<String>,
    /// Only nodes in this partition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    /// Only nodes carrying all of these features.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    /// Do not report nodes appearing for the first time.
    pub exclude_new: bool,
    /// Only these event types; empty means all.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_types: Vec<NodeEventType>,
    /// End the session after this many events; 0 means no limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_events: Option<usize>,
}

/// Kind of node event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeEventType {
    /// A node appeared in the listing.
    #[serde(rename = "node_new")]
    New,
    /// A node's state changed.
    #[serde(rename = "node_state_change")]
    StateChange,
    /// A node disappeared from the listing.
    #[serde(rename = "node_removed")]
    Removed,
}

impl NodeEventType {
    /// Wire name of the event type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "node_new",
            Self::StateChange => "node_state_change",
            Self::Removed => "node_removed",
        }
    }
}

impl fmt::Display for NodeEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change observed on one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeEvent {
    /// Event type tag.
    pub event_type: NodeEventType,
    /// Node name.
    pub node_name: String,
    /// State before the change; absent for new nodes.
    pub previous_state: Option<String>,
    /// State after the change; absent for removed nodes.
    pub new_state: Option<String>,
    /// Partitions the node belongs to.
    pub partitions: Vec<String>,
    /// Administrative reason, if any.
    pub reason: String,
    /// Milliseconds since the epoch when the change was observed.
    pub event_time_ms: u128,
    /// The node as last observed.
    pub node: Node,
}

impl NodeEvent {
    /// Classify the transition carried by this event.
    ///
    /// Removed nodes have no new state and classify as
    /// [`NodeTransition::StateChange`].
    #[must_use]
    pub fn transition(&self) -> NodeTransition {
        self.new_state.as_deref().map_or(NodeTransition::StateChange, |new| {
            NodeTransition::classify(self.previous_state.as_deref(), new)
        })
    }
}

/// Coarse meaning of a node state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeTransition {
    /// Node is draining or drained.
    Drain,
    /// Node returned to idle from drain or down.
    Resume,
    /// Node is idle.
    Idle,
    /// Node is fully allocated.
    Allocated,
    /// Node went down.
    Down,
    /// Node is partially allocated.
    Mixed,
    /// Node reports an error.
    Error,
    /// Any other change.
    StateChange,
}

impl NodeTransition {
    /// Classify a transition from `previous` to `current`.
    ///
    /// Compound states such as `IDLE+DRAIN` are split on `+`; a drain flag
    /// anywhere takes precedence over the base state.
    #[must_use]
    pub fn classify(previous: Option<&str>, current: &str) -> Self {
        let current = current.trim().to_ascii_uppercase();
        if current.split('+').any(|flag| flag == "DRAIN" || flag == "DRAINING" || flag == "DRAINED") {
            return Self::Drain;
        }
        let base = current.split('+').next().unwrap_or_default();
        match base {
            "IDLE" => {
                let was_unavailable = previous.is_some_and(|p| {
                    let p = p.to_ascii_uppercase();
                    p.split('+').any(|flag| matches!(flag, "DRAIN" | "DRAINING" | "DRAINED" | "DOWN"))
                });
                if was_unavailable {
                    Self::Resume
                } else {
                    Self::Idle
                }
            }
            "ALLOCATED" | "ALLOC" => Self::Allocated,
            "DOWN" => Self::Down,
            "MIXED" | "MIX" => Self::Mixed,
            "ERROR" => Self::Error,
            _ => Self::StateChange,
        }
    }
}
