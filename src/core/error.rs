//! Error types for watch operations.

use thiserror::Error;

/// Errors produced when starting a watch.
///
/// Failures of the snapshot source during a running watch are not errors at
/// this level: the affected tick is skipped and the watch carries on.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Poller configuration rejected before any background task was started.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Configuration could not be parsed from its source (JSON, environment).
    #[error("config parse error: {0}")]
    Config(String),
    /// The background poll task could not be spawned.
    #[error("spawn failed: {0}")]
    Spawn(String),
}

/// Application-facing result using anyhow, returned by snapshot sources.
pub type AppResult<T> = Result<T, anyhow::Error>;
