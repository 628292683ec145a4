//! Generic polling watcher.
//!
//! A [`Poller`] turns a [`SnapshotSource`] into a stream of change events. Each
//! call to [`Poller::watch`] spawns exactly one background task which:
//!
//! 1. waits for the next tick (or cancellation),
//! 2. fetches a listing through the source, skipping the tick if that fails,
//! 3. diffs it against the baseline of the previous successful tick,
//! 4. filters the changes through the session's options,
//! 5. delivers the surviving events in key order, waiting for channel space
//!    rather than dropping,
//! 6. replaces the baseline once the tick's events are delivered.
//!
//! The baseline lives inside the task and is never shared, so no locking is
//! involved. Every suspension point also watches the cancellation token, and the
//! event channel closes exactly once when the task ends.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, Instrument};
use uuid::Uuid;

use super::diff::{diff, Snapshot};
use super::resource::{admit, Suppression, WatchedResource};
use super::source::SnapshotSource;
use super::spawn::Spawn;
use super::stream::{EventStream, WatchState};
use super::WatchError;
use crate::config::{ColdStart, PollerConfig};
use crate::runtime::TokioSpawner;
use crate::util::clock::now_ms;

type DynSource<R> = dyn SnapshotSource<
    <R as WatchedResource>::ListOptions,
    <R as WatchedResource>::List,
>;

/// Polling watcher for one resource kind.
///
/// Configure with the `with_*` methods before calling [`watch`](Self::watch);
/// each session takes a copy of the configuration when it starts, so later
/// changes only affect later sessions.
pub struct Poller<R: WatchedResource, S = TokioSpawner> {
    source: Arc<DynSource<R>>,
    config: PollerConfig,
    spawner: S,
}

impl<R: WatchedResource> Poller<R, TokioSpawner> {
    /// Create a poller with the default configuration, spawning on the ambient
    /// tokio runtime.
    pub fn new<Src>(source: Src) -> Self
    where
        Src: SnapshotSource<R::ListOptions, R::List>,
    {
        Self {
            source: Arc::new(source),
            config: PollerConfig::default(),
            spawner: TokioSpawner::default(),
        }
    }
}

impl<R: WatchedResource, S: Spawn> Poller<R, S> {
    /// Set the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.config = self.config.with_poll_interval(interval);
        self
    }

    /// Set the event buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.config = self.config.with_buffer_size(size);
        self
    }

    /// Set the cold-start policy.
    #[must_use]
    pub fn with_cold_start(mut self, cold_start: ColdStart) -> Self {
        self.config = self.config.with_cold_start(cold_start);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn with_config(mut self, config: PollerConfig) -> Self {
        self.config = config;
        self
    }

    /// Spawn sessions through a different spawner.
    pub fn with_spawner<S2: Spawn>(self, spawner: S2) -> Poller<R, S2> {
        Poller {
            source: self.source,
            config: self.config,
            spawner,
        }
    }

    /// Current configuration.
    pub const fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Start a watch session.
    ///
    /// Returns immediately with the event stream; polling happens in a
    /// background task until `cancel` is cancelled. Cancelling is the only way
    /// to stop an unbounded session.
    ///
    /// # Errors
    ///
    /// [`WatchError::InvalidConfig`] when the poll interval or buffer size is
    /// zero, [`WatchError::Spawn`] when no runtime is available. In both cases no
    /// task is started.
    pub fn watch(
        &self,
        cancel: CancellationToken,
        options: R::Options,
    ) -> Result<EventStream<R::Event>, WatchError> {
        self.config.validate().map_err(WatchError::InvalidConfig)?;

        let (tx, rx) = mpsc::channel(self.config.buffer_size);
        let (state_tx, state_rx) = watch::channel(WatchState::Created);
        let skipped = Arc::new(AtomicU64::new(0));
        let session_id = Uuid::new_v4();

        let session = Session::<R> {
            source: Arc::clone(&self.source),
            config: self.config.clone(),
            suppression: R::suppression(&options),
            options,
            cancel,
            tx,
            state: state_tx,
            skipped: Arc::clone(&skipped),
            baseline: None,
            delivered: 0,
        };

        let span = tracing::debug_span!("watch", kind = R::KIND, session = %session_id);
        self.spawner.spawn(session.run().instrument(span))?;
        debug!(
            kind = R::KIND,
            session = %session_id,
            interval = ?self.config.poll_interval,
            buffer = self.config.buffer_size,
            "watch started"
        );

        Ok(EventStream::new(rx, state_rx, skipped, session_id))
    }
}

impl<R: WatchedResource, S: Clone> Clone for Poller<R, S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            config: self.config.clone(),
            spawner: self.spawner.clone(),
        }
    }
}

impl<R: WatchedResource, S> std::fmt::Debug for Poller<R, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("kind", &R::KIND)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Result of one tick.
enum Tick {
    Continue,
    Stop(WatchState),
}

/// State owned by one background poll task.
struct Session<R: WatchedResource> {
    source: Arc<DynSource<R>>,
    config: PollerConfig,
    options: R::Options,
    suppression: Suppression,
    cancel: CancellationToken,
    tx: mpsc::Sender<R::Event>,
    state: watch::Sender<WatchState>,
    skipped: Arc<AtomicU64>,
    baseline: Option<Snapshot<R::Key, R::Item>>,
    delivered: usize,
}

impl<R: WatchedResource> Session<R> {
    async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let end = loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => break WatchState::Cancelled,
                () = self.tx.closed() => break WatchState::Detached,
                _ = ticker.tick() => {}
            }

            self.state.send_if_modified(|state| {
                let first = *state == WatchState::Created;
                if first {
                    *state = WatchState::Running;
                }
                first
            });

            if let Tick::Stop(state) = self.tick().await {
                break state;
            }
        };

        debug!(state = ?end, delivered = self.delivered, "watch stopped");
        self.state.send_replace(end);
        // Dropping `self` drops the sender, which closes the stream.
    }

    async fn tick(&mut self) -> Tick {
        let list_options = R::list_options(&self.options);
        let fetched = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return Tick::Stop(WatchState::Cancelled),
            () = self.tx.closed() => return Tick::Stop(WatchState::Detached),
            result = self.source.list(self.cancel.child_token(), list_options) => result,
        };

        // Fail-soft: a failed listing skips the tick and keeps the baseline.
        let Ok(list) = fetched else {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            return Tick::Continue;
        };

        let current = Snapshot::from_items(R::items(list), R::key, R::state);
        let changes = match (&self.baseline, self.config.cold_start) {
            (Some(baseline), _) => diff(baseline, &current),
            (None, ColdStart::Baseline) => Vec::new(),
            (None, ColdStart::EmitNew) => diff(&Snapshot::new(), &current),
        };
        trace!(resources = current.len(), changes = changes.len(), "tick");

        let event_time_ms = now_ms();
        for change in changes {
            if !admit::<R>(&self.options, &self.suppression, &change) {
                continue;
            }

            let event = R::event(change, event_time_ms);
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => return Tick::Stop(WatchState::Cancelled),
                sent = self.tx.send(event) => {
                    if sent.is_err() {
                        return Tick::Stop(WatchState::Detached);
                    }
                }
            }

            self.delivered += 1;
            if self
                .suppression
                .max_events
                .is_some_and(|max| self.delivered >= max)
            {
                self.baseline = Some(current);
                return Tick::Stop(WatchState::Exhausted);
            }
        }

        self.baseline = Some(current);
        Tick::Continue
    }
}
