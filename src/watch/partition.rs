//! Partition watcher binding.

use crate::api::{
    ListPartitionsOptions, Partition, PartitionEvent, PartitionEventType, PartitionList,
    WatchPartitionsOptions,
};
use crate::core::{Change, ChangeKind, Poller, Suppression, WatchedResource};
use crate::runtime::TokioSpawner;

use super::filter::{name_allowed, normalize_state, state_allowed};

/// Binds the poller to partitions, keyed by partition name.
#[derive(Debug, Clone, Copy, Default)]
pub struct Partitions;

/// Poller producing [`PartitionEvent`]s.
pub type PartitionPoller<S = TokioSpawner> = Poller<Partitions, S>;

impl WatchedResource for Partitions {
    type Key = String;
    type Item = Partition;
    type List = PartitionList;
    type ListOptions = ListPartitionsOptions;
    type Options = WatchPartitionsOptions;
    type Event = PartitionEvent;

    const KIND: &'static str = "partition";

    fn list_options(options: &WatchPartitionsOptions) -> ListPartitionsOptions {
        ListPartitionsOptions {
            states: options.states.clone(),
            limit: 0,
            offset: 0,
        }
    }

    fn items(list: PartitionList) -> Vec<Partition> {
        list.partitions
    }

    fn key(partition: &Partition) -> String {
        partition.name.clone()
    }

    fn state(partition: &Partition) -> String {
        normalize_state(&partition.state)
    }

    fn is_terminal(_state: &str) -> bool {
        false
    }

    fn admits(options: &WatchPartitionsOptions, partition: &Partition) -> bool {
        name_allowed(&options.partition_names, &partition.name)
            && state_allowed(&options.states, &partition.state)
    }

    fn suppression(options: &WatchPartitionsOptions) -> Suppression {
        Suppression {
            exclude_new: options.exclude_new,
            exclude_completed: false,
            event_types: options.event_types.iter().map(|t| t.as_str()).collect(),
            max_events: options.max_events.filter(|&max| max > 0),
        }
    }

    fn event_type(kind: ChangeKind) -> &'static str {
        partition_event_type(kind).as_str()
    }

    fn event(change: Change<String, Partition>, event_time_ms: u128) -> PartitionEvent {
        let event_type = partition_event_type(change.kind);
        let previous_state = change.previous_state().map(str::to_owned);
        let new_state = change.new_state().map(str::to_owned);
        let partition = change
            .current
            .or(change.previous)
            .map(|entry| entry.item)
            .unwrap_or_else(|| Partition::new(change.key.clone(), String::new()));

        PartitionEvent {
            event_type,
            partition_name: change.key,
            previous_state,
            new_state,
            event_time_ms,
            partition,
        }
    }
}

const fn partition_event_type(kind: ChangeKind) -> PartitionEventType {
    match kind {
        ChangeKind::New => PartitionEventType::New,
        ChangeKind::Changed => PartitionEventType::StateChange,
        ChangeKind::Removed => PartitionEventType::Removed,
    }
}
