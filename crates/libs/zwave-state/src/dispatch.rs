//! Routing of driver notifications to the nodes they concern.

use zwave_codes::NotificationType;

use crate::config::DispatcherConfig;
use crate::error::DispatchError;
use crate::event::{BroadcastEmitter, Event, EventEmitter};
use crate::node::{Node, NodeInfo, NodeKey};
use crate::notification::Notification;
use crate::registry::NodeRegistry;

/// Resolves each notification to its node by `(home id, node id)` and runs
/// the node's handler, pushing derived events into `E`.
///
/// Processing is run-to-completion and unsynchronised; callers delivering
/// from several threads must serialise access to the dispatcher.
#[derive(Debug)]
pub struct NotificationDispatcher<D = (), E = Vec<Event>> {
    registry: NodeRegistry<D>,
    emitter: E,
    config: DispatcherConfig,
}

impl<D, E: EventEmitter> NotificationDispatcher<D, E> {
    pub fn new(emitter: E) -> Self {
        Self::with_config(emitter, DispatcherConfig::default())
    }

    pub fn with_config(emitter: E, config: DispatcherConfig) -> Self {
        Self { registry: NodeRegistry::new(), emitter, config }
    }

    /// Handles one notification and releases it.
    ///
    /// `NODE_NEW` and `NODE_ADDED` always admit an unseen node, seeded from
    /// the record's node info when present. Any other notification for an
    /// unseen node admits it only when [`DispatcherConfig::auto_create_nodes`]
    /// is set and fails with [`DispatchError::NodeNotFound`] otherwise. Node
    /// info on `NODE_NAMING` and `NODE_PROTOCOL_INFO` refreshes the identity
    /// record; on any other type it is dropped.
    pub fn dispatch(&mut self, mut notification: Notification) -> Result<(), DispatchError> {
        let key = notification.key();
        let kind = notification.notification_type();
        log::debug!("{notification}");

        let mut fresh_info = notification.take_node_info().filter(|info| {
            let matches = info.key() == key;
            if !matches {
                log::warn!("{key}: discarding node record addressed to {}", info.key());
            }
            matches
        });

        if !self.registry.contains(key) {
            let admits = matches!(
                kind,
                Some(NotificationType::NodeNew) | Some(NotificationType::NodeAdded)
            );
            if !(admits || self.config.auto_create_nodes) {
                return Err(DispatchError::node_not_found(key));
            }
            let seed = if admits { fresh_info.take() } else { None };
            self.registry.ensure(seed.unwrap_or_else(|| NodeInfo::bare(key)));
        }

        let node = self.registry.get_mut(key)?;
        if let Some(info) = fresh_info {
            match kind {
                Some(NotificationType::NodeNaming) | Some(NotificationType::NodeProtocolInfo) => {
                    node.refresh_info(info);
                }
                _ => log::debug!("{key}: node record ignored on {notification}"),
            }
        }
        node.notify(&mut self.emitter, &mut notification);

        if kind == Some(NotificationType::NodeRemoved) && self.config.evict_removed_nodes {
            self.registry.remove(key);
        }

        if let Some(prior) = notification.release() {
            log::trace!("{key}: disposing {:?} payload", prior.value_type());
        }
        Ok(())
    }

    pub fn registry(&self) -> &NodeRegistry<D> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut NodeRegistry<D> {
        &mut self.registry
    }

    pub fn node(&self, key: NodeKey) -> Result<&Node<D>, DispatchError> {
        self.registry.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Result<&mut Node<D>, DispatchError> {
        self.registry.get_mut(key)
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut E {
        &mut self.emitter
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn into_parts(self) -> (NodeRegistry<D>, E) {
        (self.registry, self.emitter)
    }
}

impl<D> NotificationDispatcher<D, BroadcastEmitter> {
    /// Dispatcher fanning events out over a broadcast channel sized by
    /// [`DispatcherConfig::event_capacity`].
    pub fn broadcast(config: DispatcherConfig) -> Self {
        let emitter = BroadcastEmitter::new(config.event_capacity);
        Self::with_config(emitter, config)
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.emitter.subscribe()
    }
}
