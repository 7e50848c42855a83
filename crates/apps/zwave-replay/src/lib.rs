//! Replays captured driver notifications through the node state dispatcher.
//!
//! This stands in for the live driver: each captured record is handed to a
//! [`NotificationDispatcher`] exactly as the driver callback would, and the
//! derived events are collected from a broadcast subscription.

pub mod capture;

use serde::Serialize;
use zwave_state::event::drain_events;
use zwave_state::{
    BroadcastEmitter, DispatcherConfig, Event, NodeInfo, NodeKey, NodeRegistry, NodeState,
    Notification, NotificationDispatcher, Value,
};

pub use capture::{read_capture, write_capture, CaptureFormat};

/// Outcome of a replay run.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Records handled by a node.
    pub dispatched: usize,
    /// Records refused because their node was unknown.
    pub rejected: usize,
    /// Events in emission order.
    pub events: Vec<Event>,
    /// Events dropped because the subscriber fell behind `event_capacity`.
    pub lost: u64,
}

/// Dispatches every notification in order and returns the resulting nodes.
pub fn replay<I>(notifications: I, config: DispatcherConfig) -> (NodeRegistry, ReplayReport)
where
    I: IntoIterator<Item = Notification>,
{
    let mut dispatcher: NotificationDispatcher<(), BroadcastEmitter> =
        NotificationDispatcher::broadcast(config);
    let mut events = dispatcher.subscribe();
    let mut report = ReplayReport::default();

    for notification in notifications {
        match dispatcher.dispatch(notification) {
            Ok(()) => report.dispatched += 1,
            Err(err) => {
                log::warn!("skipping record: {err}");
                report.rejected += 1;
            }
        }
        report.lost += drain_events(&mut events, &mut report.events);
    }

    let (registry, _) = dispatcher.into_parts();
    (registry, report)
}

/// Serialisable view of one node after a replay.
#[derive(Debug, Serialize)]
pub struct NodeSnapshot<'a> {
    pub node: NodeKey,
    pub state: NodeState,
    pub info: &'a NodeInfo,
    pub values: Vec<&'a Value>,
}

pub fn snapshot(registry: &NodeRegistry) -> Vec<NodeSnapshot<'_>> {
    registry
        .iter()
        .map(|node| NodeSnapshot {
            node: node.key(),
            state: node.state(),
            info: node.info(),
            values: node.values().values().collect(),
        })
        .collect()
}
