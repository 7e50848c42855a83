//! Node identity, metadata and the notification-driven lifecycle.

use std::fmt;

use serde::{Deserialize, Serialize};
use zwave_codes::{notification_type_name, NotificationType};

use crate::event::{Event, EventEmitter, NodeEvent};
use crate::notification::Notification;
use crate::store::ValueStore;

/// Network-wide address of a node: the controller's home id plus node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey {
    pub home_id: u32,
    pub node_id: u8,
}

impl NodeKey {
    pub const fn new(home_id: u32, node_id: u8) -> Self {
        Self { home_id, node_id }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}:0x{:02x}", self.home_id, self.node_id)
    }
}

/// Identity record for a node, populated by the driver side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeInfo {
    pub home_id: u32,
    pub node_id: u8,
    pub basic_type: u8,
    pub generic_type: u8,
    pub specific_type: u8,
    pub node_type: String,
    pub manufacturer_name: String,
    pub manufacturer_id: String,
    pub product_name: String,
    pub product_type: String,
    pub product_id: String,
    pub node_name: String,
    pub location: String,
}

impl NodeInfo {
    /// A record carrying only the node's address.
    pub fn bare(key: NodeKey) -> Self {
        Self { home_id: key.home_id, node_id: key.node_id, ..Self::default() }
    }

    pub fn key(&self) -> NodeKey {
        NodeKey::new(self.home_id, self.node_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProductId {
    pub manufacturer_id: String,
    pub product_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProductDescription {
    pub manufacturer_name: String,
    pub product_name: String,
    pub product_type: String,
}

/// Lifecycle state. A node becomes `Ready` once, on its first
/// queries-complete notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    #[default]
    Init,
    Ready,
}

/// One device on the network.
///
/// `D` is the application's device handle. The node stores it and hands it
/// back but never looks inside; use a cheap handle such as an `Arc` or an id
/// when the device itself is owned elsewhere.
#[derive(Debug)]
pub struct Node<D = ()> {
    info: NodeInfo,
    state: NodeState,
    values: ValueStore,
    device: Option<D>,
}

impl<D> Node<D> {
    pub fn new(info: NodeInfo) -> Self {
        Self { info, state: NodeState::Init, values: ValueStore::new(), device: None }
    }

    pub fn home_id(&self) -> u32 {
        self.info.home_id
    }

    pub fn node_id(&self) -> u8 {
        self.info.node_id
    }

    pub fn key(&self) -> NodeKey {
        self.info.key()
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == NodeState::Ready
    }

    pub fn info(&self) -> &NodeInfo {
        &self.info
    }

    pub fn values(&self) -> &ValueStore {
        &self.values
    }

    pub fn device(&self) -> Option<&D> {
        self.device.as_ref()
    }

    /// Attaches a device handle, returning the one previously attached.
    pub fn set_device(&mut self, device: D) -> Option<D> {
        self.device.replace(device)
    }

    /// Detaches the device handle.
    pub fn take_device(&mut self) -> Option<D> {
        self.device.take()
    }

    pub fn product_id(&self) -> ProductId {
        ProductId {
            manufacturer_id: self.info.manufacturer_id.clone(),
            product_id: self.info.product_id.clone(),
        }
    }

    pub fn product_description(&self) -> ProductDescription {
        ProductDescription {
            manufacturer_name: self.info.manufacturer_name.clone(),
            product_name: self.info.product_name.clone(),
            product_type: self.info.product_type.clone(),
        }
    }

    pub fn node_name(&self) -> &str {
        &self.info.node_name
    }

    /// Replaces the identity record with a freshly populated one. The node's
    /// address never changes, even when called directly with a record for
    /// another node; the dispatcher filters those out before getting here.
    pub fn refresh_info(&mut self, mut info: NodeInfo) {
        if info.key() != self.key() {
            log::debug!("{}: ignoring address {} in refreshed node record", self.key(), info.key());
            info.home_id = self.info.home_id;
            info.node_id = self.info.node_id;
        }
        self.info = info;
    }

    /// Applies one notification already routed to this node.
    ///
    /// Performs at most one mutation and emits at most one event. Types with
    /// no meaning for node state are ignored.
    pub fn notify<E>(&mut self, emitter: &mut E, notification: &mut Notification)
    where
        E: EventEmitter + ?Sized,
    {
        let Some(kind) = notification.notification_type() else {
            log::trace!(
                "{}: ignoring {}",
                self.key(),
                notification_type_name(notification.raw_notification_type())
            );
            return;
        };

        match kind {
            NotificationType::NodeRemoved => {
                emitter.emit(Event::NodeUnavailable(NodeEvent::new(self.key())));
            }

            NotificationType::ValueRemoved => {
                let (command_class_id, instance_id, index) = notification.value_id().triple();
                self.values.remove(command_class_id, instance_id, index);
            }

            NotificationType::EssentialNodeQueriesComplete
            | NotificationType::NodeQueriesComplete => {
                let event = match self.state {
                    NodeState::Init => {
                        self.state = NodeState::Ready;
                        log::info!("{} is ready ({})", self.key(), kind);
                        Event::NodeAvailable(NodeEvent::new(self.key()))
                    }
                    NodeState::Ready => Event::NodeChanged(NodeEvent::new(self.key())),
                };
                emitter.emit(event);
            }

            NotificationType::ValueAdded
            | NotificationType::ValueChanged
            | NotificationType::ValueRefreshed => {
                let value_id = notification.value_id();
                self.values.take(value_id, notification.value_slot());
            }

            NotificationType::NodeNaming | NotificationType::NodeProtocolInfo => {
                log::debug!("{}: {}", kind, self);
            }

            _ => {
                log::trace!("{}: ignoring {}", self.key(), kind);
            }
        }
    }
}

impl<D> fmt::Display for Node<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = &self.info;
        write!(
            f,
            "Node[homeId=0x{:08x}, nodeId={:03}, basicType={:02x}, genericType={:02x}, \
             specificType={:02x}, nodeType='{}', manufacturerName='{}', productName='{}', \
             location='{}', manufacturerId={}, productType={}, productId={}]",
            info.home_id,
            info.node_id,
            info.basic_type,
            info.generic_type,
            info.specific_type,
            info.node_type,
            info.manufacturer_name,
            info.product_name,
            info.location,
            info.manufacturer_id,
            info.product_type,
            info.product_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ValueId, ValuePayload};

    const KEY: NodeKey = NodeKey::new(0x0184_5a3c, 5);

    fn dimmer_info() -> NodeInfo {
        NodeInfo {
            basic_type: 0x04,
            generic_type: 0x11,
            specific_type: 0x01,
            node_type: "Multilevel Power Switch".into(),
            manufacturer_name: "Aeotec".into(),
            manufacturer_id: "0x0086".into(),
            product_name: "Smart Dimmer 6".into(),
            product_type: "0x0103".into(),
            product_id: "0x0063".into(),
            node_name: "hall dimmer".into(),
            location: "hall".into(),
            ..NodeInfo::bare(KEY)
        }
    }

    #[test]
    fn accessors_read_through_identity_record() {
        let node: Node = Node::new(dimmer_info());
        assert_eq!(node.home_id(), 0x0184_5a3c);
        assert_eq!(node.node_id(), 5);
        assert_eq!(node.node_name(), "hall dimmer");
        assert_eq!(
            node.product_id(),
            ProductId { manufacturer_id: "0x0086".into(), product_id: "0x0063".into() }
        );
        assert_eq!(node.product_description().product_type, "0x0103");
        assert_eq!(node.state(), NodeState::Init);
    }

    #[test]
    fn display_lists_identity_fields() {
        let node: Node = Node::new(dimmer_info());
        assert_eq!(
            node.to_string(),
            "Node[homeId=0x01845a3c, nodeId=005, basicType=04, genericType=11, specificType=01, \
             nodeType='Multilevel Power Switch', manufacturerName='Aeotec', \
             productName='Smart Dimmer 6', location='hall', manufacturerId=0x0086, \
             productType=0x0103, productId=0x0063]"
        );
    }

    #[test]
    fn device_handle_is_stored_not_inspected() {
        let mut node: Node<&'static str> = Node::new(NodeInfo::bare(KEY));
        assert!(node.device().is_none());
        assert_eq!(node.set_device("lamp"), None);
        assert_eq!(node.set_device("dimmer"), Some("lamp"));
        assert_eq!(node.device(), Some(&"dimmer"));
        assert_eq!(node.take_device(), Some("dimmer"));
        assert!(node.device().is_none());
    }

    #[test]
    fn refresh_keeps_address() {
        let mut node: Node = Node::new(NodeInfo::bare(KEY));
        let mut fresh = dimmer_info();
        fresh.node_id = 99;
        node.refresh_info(fresh);
        assert_eq!(node.key(), KEY);
        assert_eq!(node.product_description().manufacturer_name, "Aeotec");
    }

    #[test]
    fn notify_ignores_unknown_and_diagnostic_types() {
        let mut node: Node = Node::new(NodeInfo::bare(KEY));
        let mut events: Vec<Event> = Vec::new();

        let mut unknown = Notification::from_raw(KEY, 0xEE, 0);
        node.notify(&mut events, &mut unknown);
        let mut naming = Notification::new(KEY, NotificationType::NodeNaming);
        node.notify(&mut events, &mut naming);
        let mut polling = Notification::new(KEY, NotificationType::PollingEnabled);
        node.notify(&mut events, &mut polling);

        assert!(events.is_empty());
        assert_eq!(node.state(), NodeState::Init);
        assert!(node.values().is_empty());
    }

    #[test]
    fn essential_queries_complete_also_admits() {
        let mut node: Node = Node::new(NodeInfo::bare(KEY));
        let mut events: Vec<Event> = Vec::new();

        let mut essential = Notification::new(KEY, NotificationType::EssentialNodeQueriesComplete);
        node.notify(&mut events, &mut essential);
        let mut full = Notification::new(KEY, NotificationType::NodeQueriesComplete);
        node.notify(&mut events, &mut full);

        assert_eq!(
            events,
            vec![Event::NodeAvailable(NodeEvent::new(KEY)), Event::NodeChanged(NodeEvent::new(KEY))]
        );
    }

    #[test]
    fn value_refresh_moves_payload_out_of_notification() {
        let mut node: Node = Node::new(NodeInfo::bare(KEY));
        let mut events: Vec<Event> = Vec::new();
        let id = ValueId::new(0x26, 1, 0);

        let mut added = Notification::new(KEY, NotificationType::ValueAdded)
            .with_value(id, ValuePayload::Byte(0));
        node.notify(&mut events, &mut added);
        assert!(added.value().is_none());

        let mut refreshed = Notification::new(KEY, NotificationType::ValueRefreshed)
            .with_value(id, ValuePayload::Byte(99));
        node.notify(&mut events, &mut refreshed);
        assert_eq!(refreshed.release(), Some(ValuePayload::Byte(0)));

        let stored = node.values().get(0x26, 1, 0).map(|v| &v.payload);
        assert_eq!(stored, Some(&ValuePayload::Byte(99)));
        assert!(events.is_empty());
    }
}
