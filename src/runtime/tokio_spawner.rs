//! Tokio runtime spawner implementation.

use std::future::Future;

use tokio::runtime::Handle;

use crate::core::{Spawn, WatchError};

/// Tokio-based spawner for poll tasks.
///
/// The default spawner resolves the runtime at spawn time, so `watch` must then
/// be called from within a tokio runtime. [`TokioSpawner::new`] pins a specific
/// runtime instead.
#[derive(Debug, Clone, Default)]
pub struct TokioSpawner {
    handle: Option<Handle>,
}

impl TokioSpawner {
    /// Create a spawner bound to a specific runtime handle.
    #[must_use]
    pub const fn new(handle: Handle) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// Create a spawner bound to the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Spawn`] when called outside a tokio runtime.
    pub fn current() -> Result<Self, WatchError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| WatchError::Spawn(e.to_string()))
    }
}

impl Spawn for TokioSpawner {
    fn spawn<F>(&self, fut: F) -> Result<(), WatchError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = match &self.handle {
            Some(handle) => handle.clone(),
            None => Handle::try_current().map_err(|e| WatchError::Spawn(e.to_string()))?,
        };
        handle.spawn(fut);
        Ok(())
    }
}
