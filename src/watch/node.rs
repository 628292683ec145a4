//! Node watcher binding.

use crate::api::{ListNodesOptions, Node, NodeEvent, NodeEventType, NodeList, WatchNodesOptions};
use crate::core::{Change, ChangeKind, Poller, Suppression, WatchedResource};
use crate::runtime::TokioSpawner;

use super::filter::{has_all, name_allowed, normalize_state, state_allowed};

/// Binds the poller to compute nodes, keyed by node name.
///
/// Nodes have no terminal state; a node leaving the listing is reported as
/// `node_removed` with no new state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nodes;

/// Poller producing [`NodeEvent`]s.
pub type NodePoller<S = TokioSpawner> = Poller<Nodes, S>;

impl WatchedResource for Nodes {
    type Key = String;
    type Item = Node;
    type List = NodeList;
    type ListOptions = ListNodesOptions;
    type Options = WatchNodesOptions;
    type Event = NodeEvent;

    const KIND: &'static str = "node";

    fn list_options(options: &WatchNodesOptions) -> ListNodesOptions {
        ListNodesOptions {
            states: options.states.clone(),
            partition: options.partition.clone(),
            features: options.features.clone(),
            limit: 0,
            offset: 0,
        }
    }

    fn items(list: NodeList) -> Vec<Node> {
        list.nodes
    }

    fn key(node: &Node) -> String {
        node.name.clone()
    }

    fn state(node: &Node) -> String {
        normalize_state(&node.state)
    }

    fn is_terminal(_state: &str) -> bool {
        false
    }

    fn admits(options: &WatchNodesOptions, node: &Node) -> bool {
        name_allowed(&options.node_names, &node.name)
            && options
                .partition
                .as_ref()
                .is_none_or(|p| node.partitions.contains(p))
            && has_all(&options.features, &node.features)
            && state_allowed(&options.states, &node.state)
    }

    fn suppression(options: &WatchNodesOptions) -> Suppression {
        Suppression {
            exclude_new: options.exclude_new,
            exclude_completed: false,
            event_types: options.event_types.iter().map(|t| t.as_str()).collect(),
            max_events: options.max_events.filter(|&max| max > 0),
        }
    }

    fn event_type(kind: ChangeKind) -> &'static str {
        node_event_type(kind).as_str()
    }

    fn event(change: Change<String, Node>, event_time_ms: u128) -> NodeEvent {
        let event_type = node_event_type(change.kind);
        let previous_state = change.previous_state().map(str::to_owned);
        let new_state = change.new_state().map(str::to_owned);
        let node = change
            .current
            .or(change.previous)
            .map(|entry| entry.item)
            .unwrap_or_else(|| Node::new(change.key.clone(), String::new()));

        NodeEvent {
            event_type,
            node_name: change.key,
            previous_state,
            new_state,
            partitions: node.partitions.clone(),
            reason: node.reason.clone(),
            event_time_ms,
            node,
        }
    }
}

const fn node_event_type(kind: ChangeKind) -> NodeEventType {
    match kind {
        ChangeKind::New => NodeEventType::New,
        ChangeKind::Changed => NodeEventType::StateChange,
        ChangeKind::Removed => NodeEventType::Removed,
    }
}
