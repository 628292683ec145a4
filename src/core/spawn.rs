//! Runtime-agnostic task spawning.

use std::future::Future;

use super::WatchError;

/// Abstraction for spawning the background poll task on a runtime.
pub trait Spawn {
    /// Spawn a detached task.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Spawn`] when no runtime is available.
    fn spawn<F>(&self, fut: F) -> Result<(), WatchError>
    where
        F: Future<Output = ()> + Send + 'static;
}
