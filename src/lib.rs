//! # Slurm Watch
//!
//! Polling-based change-event watchers for a Slurm REST client.
//!
//! The scheduler's REST API has no push or subscribe endpoints, so this crate
//! emulates watching: a background task repeatedly lists a resource collection
//! (jobs, nodes, partitions) through a caller-supplied snapshot source, diffs
//! each listing against the previous one, and delivers typed events on a
//! bounded, ordered stream.
//!
//! ## Key Features
//!
//! - **Pure diff engine**: deterministic, key-ordered comparison of two snapshots
//! - **One task per session**: cancellation through a [`CancellationToken`]
//!   stops polling within one interval and closes the stream exactly once
//! - **Backpressure, not loss**: a full buffer delays the next tick instead of
//!   dropping events
//! - **Fail-soft ticks**: a failed listing skips the tick and keeps the baseline
//! - **Version-agnostic**: the snapshot source is any async function, so the
//!   same watchers run against every API version adapter
//!
//! ## Watching jobs
//!
//! ```rust,ignore
//! use std::time::Duration;
//!
//! use slurm_watch::api::{ListJobsOptions, WatchJobsOptions};
//! use slurm_watch::watch::JobPoller;
//! use slurm_watch::CancellationToken;
//!
//! let poller = JobPoller::new(move |_cancel, opts: ListJobsOptions| {
//!     let client = client.clone();
//!     async move { client.list_jobs(opts).await }
//! })
//! .with_poll_interval(Duration::from_secs(2))
//! .with_buffer_size(256);
//!
//! let cancel = CancellationToken::new();
//! let mut events = poller.watch(
//!     cancel.clone(),
//!     WatchJobsOptions {
//!         user_id: Some("1000".into()),
//!         exclude_new: true,
//!         ..WatchJobsOptions::default()
//!     },
//! )?;
//!
//! while let Some(event) = events.recv().await {
//!     tracing::info!(job = %event.job_id, kind = %event.event_type, state = %event.new_state);
//! }
//! ```
//!
//! ## Configuration
//!
//! Poller settings load from JSON or `SLURM_WATCH_*` environment variables via
//! [`config::WatchConfig`], and [`builders::watcher_builder::build_watchers`]
//! turns them into ready pollers.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Resource records, watch options and event types.
pub mod api;
/// Builders to construct watchers from configuration.
pub mod builders;
/// Configuration models for pollers.
pub mod config;
/// Diff engine, generic poller and the seams around it.
pub mod core;
/// Runtime adapters for spawning poll tasks.
pub mod runtime;
/// Shared utilities.
pub mod util;
/// Job, node and partition watchers.
pub mod watch;

pub use tokio_util::sync::CancellationToken;
