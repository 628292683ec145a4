//! Resource bindings for jobs, nodes and partitions.
//!
//! Each binding is a zero-sized descriptor implementing
//! [`WatchedResource`](crate::core::WatchedResource), with a poller alias:
//!
//! ```rust,ignore
//! use slurm_watch::api::{JobList, ListJobsOptions, WatchJobsOptions};
//! use slurm_watch::watch::JobPoller;
//! use slurm_watch::CancellationToken;
//!
//! let poller = JobPoller::new(|_cancel, opts: ListJobsOptions| async move {
//!     client.list_jobs(opts).await
//! });
//! let mut events = poller.watch(CancellationToken::new(), WatchJobsOptions::default())?;
//! while let Some(event) = events.recv().await {
//!     println!("{} {} -> {}", event.job_id, event.event_type, event.new_state);
//! }
//! ```

pub mod filter;
pub mod job;
pub mod node;
pub mod partition;

pub use job::{JobPoller, Jobs};
pub use node::{NodePoller, Nodes};
pub use partition::{PartitionPoller, Partitions};
