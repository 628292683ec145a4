//! Builders to construct watchers from configuration.

pub mod watcher_builder;

pub use watcher_builder::{build_watchers, Watchers};
