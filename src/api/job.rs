//! Job records, listing filters, watch options and events.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Job states from which a job cannot transition any further.
pub const TERMINAL_JOB_STATES: &[&str] = &[
    "COMPLETED",
    "FAILED",
    "CANCELLED",
    "TIMEOUT",
    "NODE_FAIL",
    "PREEMPTED",
    "OUT_OF_MEMORY",
    "BOOT_FAIL",
    "DEADLINE",
];

/// State reported for a job that disappeared from the listing.
pub const JOB_STATE_COMPLETED: &str = "COMPLETED";

/// A job as returned by the scheduler's listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    /// Job identifier.
    pub id: String,
    /// Job name.
    pub name: String,
    /// Numeric owner id.
    pub user_id: String,
    /// Owner login.
    pub user_name: String,
    /// Numeric group id.
    pub group_id: String,
    /// Lifecycle state (`PENDING`, `RUNNING`, `COMPLETED`, ...).
    pub state: String,
    /// Partition the job runs in.
    pub partition: String,
    /// Scheduling priority.
    pub priority: i64,
    /// Allocated or requested CPUs.
    pub cpus: u32,
    /// Memory in MB.
    pub memory: u64,
    /// Time limit in minutes.
    pub time_limit: u32,
    /// Nodes the job is allocated to.
    pub nodes: Vec<String>,
    /// Exit code once finished.
    pub exit_code: i32,
}

impl Job {
    /// Minimal job with an id and state.
    pub fn new(id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: state.into(),
            ..Self::default()
        }
    }

    /// Set the owning user.
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self.user_name = user_name.into();
        self
    }

    /// Set the partition.
    #[must_use]
    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = partition.into();
        self
    }
}

/// A page of jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobList {
    /// Jobs in this page.
    pub jobs: Vec<Job>,
    /// Total number of jobs matching the filter.
    pub total: usize,
}

impl From<Vec<Job>> for JobList {
    fn from(jobs: Vec<Job>) -> Self {
        Self {
            total: jobs.len(),
            jobs,
        }
    }
}

/// Filter accepted by the job listing operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListJobsOptions {
    /// Only jobs owned by this user id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Only jobs in one of these states.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<String>,
    /// Only jobs in this partition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    /// Page size; 0 means no limit.
    pub limit: usize,
    /// Page offset.
    pub offset: usize,
}

/// Options for one job watch session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchJobsOptions {
    /// Only jobs owned by this user id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Only jobs in one of these states (case-insensitive).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<String>,
    /// Only jobs in this partition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    /// Only these job ids.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub job_ids: Vec<String>,
    /// Do not report jobs appearing for the first time.
    pub exclude_new: bool,
    /// Do not report jobs reaching a terminal state or leaving the listing.
    pub exclude_completed: bool,
    /// Only these event types; empty means all.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_types: Vec<JobEventType>,
    /// End the session after this many events; 0 means no limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_events: Option<usize>,
}

/// Kind of job event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobEventType {
    /// A job appeared in the listing.
    #[serde(rename = "job_new")]
    New,
    /// A job's state changed.
    #[serde(rename = "job_state_change")]
    StateChange,
    /// A job disappeared from the listing.
    #[serde(rename = "job_completed")]
    Completed,
}

impl JobEventType {
    /// Wire name of the event type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "job_new",
            Self::StateChange => "job_state_change",
            Self::Completed => "job_completed",
        }
    }
}

impl fmt::Display for JobEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change observed on one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEvent {
    /// Event type tag.
    pub event_type: JobEventType,
    /// Job identifier.
    pub job_id: String,
    /// Owning user id.
    pub user_id: String,
    /// Owning user login.
    pub user_name: String,
    /// State before the change; absent for new jobs.
    pub previous_state: Option<String>,
    /// State after the change. Jobs that left the listing report `COMPLETED`.
    pub new_state: String,
    /// Milliseconds since the epoch when the change was observed.
    pub event_time_ms: u128,
    /// The job as last observed.
    pub job: Job,
}

impl JobEvent {
    /// Classify the transition carried by this event.
    #[must_use]
    pub fn transition(&self) -> JobTransition {
        JobTransition::classify(self.previous_state.as_deref(), &self.new_state)
    }
}

/// Coarse meaning of a job state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobTransition {
    /// Job is (again) waiting to run.
    Pending,
    /// Job moved from pending to running.
    Start,
    /// Job is running, not straight from pending.
    Running,
    /// Job completed successfully.
    End,
    /// Job ended in any other terminal state.
    Fail,
    /// Job was suspended.
    Suspend,
    /// Any other change.
    StateChange,
}

impl JobTransition {
    /// Classify a transition from `previous` to `current`.
    #[must_use]
    pub fn classify(previous: Option<&str>, current: &str) -> Self {
        let current = current.trim().to_ascii_uppercase();
        match current.as_str() {
            "PENDING" => Self::Pending,
            "RUNNING" => {
                if previous.is_some_and(|p| p.trim().eq_ignore_ascii_case("PENDING")) {
                    Self::Start
                } else {
                    Self::Running
                }
            }
            JOB_STATE_COMPLETED => Self::End,
            "SUSPENDED" => Self::Suspend,
            s if TERMINAL_JOB_STATES.iter().any(|t| *t == s) => Self::Fail,
            _ => Self::StateChange,
        }
    }
}
