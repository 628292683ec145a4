//! Core watch engine: snapshot diffing, the generic poller and its seams.

pub mod diff;
pub mod error;
pub mod poller;
pub mod resource;
pub mod source;
pub mod spawn;
pub mod stream;

pub use diff::{diff, Change, ChangeKind, Snapshot, SnapshotEntry};
pub use error::{AppResult, WatchError};
pub use poller::Poller;
pub use resource::{admit, Suppression, WatchedResource};
pub use source::SnapshotSource;
pub use spawn::Spawn;
pub use stream::{EventStream, WatchState};
