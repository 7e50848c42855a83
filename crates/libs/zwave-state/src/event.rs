//! Node lifecycle events and the sinks they are pushed into.

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use crate::config::MAX_EVENT_CAPACITY;
use crate::node::NodeKey;

/// The node an event originated from. Resolve it through the registry for
/// the live node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeEvent {
    pub node: NodeKey,
}

impl NodeEvent {
    pub fn new(node: NodeKey) -> Self {
        Self { node }
    }
}

/// High-level event derived from a driver notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "event")]
pub enum Event {
    /// Node finished its first round of queries.
    NodeAvailable(NodeEvent),
    /// Node reported queries complete again after becoming available.
    NodeChanged(NodeEvent),
    /// Node left the network.
    NodeUnavailable(NodeEvent),
}

impl Event {
    pub fn node(&self) -> NodeKey {
        match self {
            Self::NodeAvailable(e) | Self::NodeChanged(e) | Self::NodeUnavailable(e) => e.node,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::NodeAvailable(_) => "NodeAvailable",
            Self::NodeChanged(_) => "NodeChanged",
            Self::NodeUnavailable(_) => "NodeUnavailable",
        }
    }
}

/// Sink for derived events. Emission is fire-and-forget.
pub trait EventEmitter {
    fn emit(&mut self, event: Event);
}

impl EventEmitter for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

impl<E: EventEmitter + ?Sized> EventEmitter for &mut E {
    fn emit(&mut self, event: Event) {
        (**self).emit(event);
    }
}

impl<E: EventEmitter + ?Sized> EventEmitter for Box<E> {
    fn emit(&mut self, event: Event) {
        (**self).emit(event);
    }
}

/// Fans events out to any number of application subscribers.
#[derive(Debug, Clone)]
pub struct BroadcastEmitter {
    sender: broadcast::Sender<Event>,
}

impl BroadcastEmitter {
    /// Capacity is clamped to `1..=MAX_EVENT_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_EVENT_CAPACITY));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventEmitter for BroadcastEmitter {
    fn emit(&mut self, event: Event) {
        if self.sender.send(event).is_err() {
            log::trace!("no subscribers for {} {}", event.kind(), event.node());
        }
    }
}

/// Moves every event already queued on `rx` into `out` without waiting.
/// Returns how many events were lost to lag.
pub fn drain_events(rx: &mut broadcast::Receiver<Event>, out: &mut Vec<Event>) -> u64 {
    let mut lost = 0;
    loop {
        match rx.try_recv() {
            Ok(event) => out.push(event),
            Err(TryRecvError::Lagged(missed)) => {
                log::warn!("event subscriber lagged, {missed} events lost");
                lost += missed;
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return lost,
        }
    }
}
