//! Consumer side of a watch session.

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::ReceiverStream;
use uuid::Uuid;

/// Lifecycle of one watch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchState {
    /// Task spawned, first tick not reached yet.
    Created,
    /// Ticking.
    Running,
    /// Stopped by cancellation of the watch token.
    Cancelled,
    /// Stopped after delivering the configured maximum number of events.
    Exhausted,
    /// Stopped because the consumer closed or dropped the stream.
    Detached,
}

impl WatchState {
    /// Whether the session has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Exhausted | Self::Detached)
    }
}

/// Ordered stream of events produced by one watch session.
///
/// The stream ends (`recv` returns `None`) when the session stops; that is the
/// only termination signal. Events are delivered in the order they were
/// produced: key order within a tick, tick order across ticks.
pub struct EventStream<E> {
    rx: mpsc::Receiver<E>,
    state: watch::Receiver<WatchState>,
    skipped: Arc<AtomicU64>,
    session_id: Uuid,
}

impl<E> EventStream<E> {
    pub(crate) const fn new(
        rx: mpsc::Receiver<E>,
        state: watch::Receiver<WatchState>,
        skipped: Arc<AtomicU64>,
        session_id: Uuid,
    ) -> Self {
        Self {
            rx,
            state,
            skipped,
            session_id,
        }
    }

    /// Receive the next event, or `None` once the session has stopped and all
    /// buffered events were drained.
    pub async fn recv(&mut self) -> Option<E> {
        self.rx.recv().await
    }

    /// Receive a buffered event without waiting.
    pub fn try_recv(&mut self) -> Result<E, TryRecvError> {
        self.rx.try_recv()
    }

    /// Current lifecycle state of the session.
    #[must_use]
    pub fn state(&self) -> WatchState {
        *self.state.borrow()
    }

    /// Wait until the session reaches a terminal state and return it.
    pub async fn stopped(&mut self) -> WatchState {
        match self.state.wait_for(|s| s.is_terminal()).await {
            Ok(state) => *state,
            // Sender gone without a terminal state: the task was dropped.
            Err(_) => WatchState::Cancelled,
        }
    }

    /// Ticks skipped so far because the snapshot source failed.
    #[must_use]
    pub fn skipped_ticks(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Identifier of the session, as recorded in its log spans.
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Stop accepting events. Buffered events can still be received; the
    /// session notices at its next wait point and ends as
    /// [`WatchState::Detached`].
    pub fn close(&mut self) {
        self.rx.close();
    }

    /// Convert into a plain `tokio-stream` receiver stream.
    #[must_use]
    pub fn into_stream(self) -> ReceiverStream<E> {
        ReceiverStream::new(self.rx)
    }
}

impl<E> Stream for EventStream<E> {
    type Item = E;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<E>> {
        self.rx.poll_recv(cx)
    }
}

impl<E> std::fmt::Debug for EventStream<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("session_id", &self.session_id)
            .field("state", &self.state())
            .field("skipped_ticks", &self.skipped_ticks())
            .finish_non_exhaustive()
    }
}
