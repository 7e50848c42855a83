//! Ownership of every known node, keyed by address.

use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;

use crate::error::DispatchError;
use crate::node::{Node, NodeInfo, NodeKey};

/// Holds at most one [`Node`] per [`NodeKey`].
#[derive(Debug)]
pub struct NodeRegistry<D = ()> {
    nodes: BTreeMap<NodeKey, Node<D>>,
}

impl<D> NodeRegistry<D> {
    pub fn new() -> Self {
        Self { nodes: BTreeMap::new() }
    }

    pub fn get(&self, key: NodeKey) -> Result<&Node<D>, DispatchError> {
        self.nodes.get(&key).ok_or_else(|| DispatchError::node_not_found(key))
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Result<&mut Node<D>, DispatchError> {
        self.nodes.get_mut(&key).ok_or_else(|| DispatchError::node_not_found(key))
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(&key)
    }

    /// Returns the node for `info`'s address, creating it in `Init` from
    /// `info` if it does not exist yet. An existing node is left untouched.
    pub fn ensure(&mut self, info: NodeInfo) -> &mut Node<D> {
        match self.nodes.entry(info.key()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                log::info!("node {} added", entry.key());
                entry.insert(Node::new(info))
            }
        }
    }

    /// Drops the node, handing it back so the caller can release its device.
    pub fn remove(&mut self, key: NodeKey) -> Option<Node<D>> {
        let removed = self.nodes.remove(&key);
        if removed.is_some() {
            log::info!("node {key} removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in address order.
    pub fn iter(&self) -> btree_map::Values<'_, NodeKey, Node<D>> {
        self.nodes.values()
    }

    pub fn nodes_in_home(&self, home_id: u32) -> impl Iterator<Item = &Node<D>> + '_ {
        self.nodes
            .range(NodeKey::new(home_id, u8::MIN)..=NodeKey::new(home_id, u8::MAX))
            .map(|(_, node)| node)
    }
}

impl<D> Default for NodeRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}
