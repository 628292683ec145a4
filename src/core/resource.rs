//! Resource binding for the generic poller.

use std::fmt;

use super::diff::{Change, ChangeKind};

/// Binds the generic [`Poller`](super::Poller) to one kind of cluster resource.
///
/// Implementors are stateless descriptors: every method is an associated
/// function so a poll task can carry the binding without sharing any instance.
pub trait WatchedResource: Send + Sync + 'static {
    /// Stable identity of one resource (job id, node name, partition name).
    type Key: Ord + Clone + fmt::Display + Send + Sync + 'static;
    /// One record of the listing.
    type Item: Clone + Send + Sync + 'static;
    /// Collection returned by the snapshot source.
    type List: Send + 'static;
    /// Filter type accepted by the snapshot source.
    type ListOptions: Send + 'static;
    /// Per-session watch options.
    type Options: Clone + Send + Sync + 'static;
    /// Event delivered to the consumer.
    type Event: Send + 'static;

    /// Short resource name used in logs.
    const KIND: &'static str;

    /// Narrow watch options into the source's list filter.
    fn list_options(options: &Self::Options) -> Self::ListOptions;

    /// Unpack the collection into its records.
    fn items(list: Self::List) -> Vec<Self::Item>;

    /// Stable identity of a record.
    fn key(item: &Self::Item) -> Self::Key;

    /// Comparable state of a record.
    fn state(item: &Self::Item) -> String;

    /// Whether `state` is a state the resource cannot leave.
    fn is_terminal(state: &str) -> bool;

    /// State implied when a record disappears from the listing.
    fn removed_state(_previous: &str) -> Option<String> {
        None
    }

    /// Whether a record passes the identity/state/partition allowlists.
    fn admits(options: &Self::Options, item: &Self::Item) -> bool;

    /// Suppression rules derived from the options.
    fn suppression(options: &Self::Options) -> Suppression;

    /// Event type tag for a change classification.
    fn event_type(kind: ChangeKind) -> &'static str;

    /// Build the typed event for a change that survived suppression.
    fn event(change: Change<Self::Key, Self::Item>, event_time_ms: u128) -> Self::Event;
}

/// Post-diff suppression rules for one watch session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suppression {
    /// Drop `New` records.
    pub exclude_new: bool,
    /// Drop `Changed`/`Removed` records whose new state is terminal.
    pub exclude_completed: bool,
    /// Deliver only these event types; empty means all.
    pub event_types: Vec<&'static str>,
    /// End the watch after this many delivered events. Bindings map a zero
    /// limit to `None`.
    pub max_events: Option<usize>,
}

impl Suppression {
    /// Whether an event of type `event_type` may be delivered.
    #[must_use]
    pub fn admits_event_type(&self, event_type: &str) -> bool {
        self.event_types.is_empty() || self.event_types.iter().any(|t| *t == event_type)
    }
}

/// Decide whether a change survives the session's filters, in order:
/// allowlists, then `exclude_new`, then `exclude_completed`, then event types.
///
/// A `Changed` record passes the allowlists when either its previous or its
/// current record does, so a resource leaving a watched state is still reported.
pub fn admit<R: WatchedResource>(
    options: &R::Options,
    suppression: &Suppression,
    change: &Change<R::Key, R::Item>,
) -> bool {
    let allowed = change
        .current
        .iter()
        .chain(change.previous.iter())
        .any(|entry| R::admits(options, &entry.item));
    if !allowed {
        return false;
    }

    match change.kind {
        ChangeKind::New if suppression.exclude_new => return false,
        ChangeKind::Changed | ChangeKind::Removed if suppression.exclude_completed => {
            let new_state = change.new_state().map(str::to_owned).or_else(|| {
                change
                    .previous_state()
                    .and_then(R::removed_state)
            });
            if new_state.as_deref().is_some_and(R::is_terminal) {
                return false;
            }
        }
        _ => {}
    }

    suppression.admits_event_type(R::event_type(change.kind))
}
