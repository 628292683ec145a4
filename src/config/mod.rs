//! Configuration models for pollers and watch sessions.

pub mod poller;

pub use poller::{
    ColdStart, PollerConfig, WatchConfig, DEFAULT_BUFFER_SIZE, DEFAULT_POLL_INTERVAL, ENV_PREFIX,
};
