use crate::node::NodeKey;

/// Errors from routing a notification to its node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("node not found: 0x{home_id:08x}:0x{node_id:02x}")]
    NodeNotFound { home_id: u32, node_id: u8 },
}

impl DispatchError {
    pub fn node_not_found(key: NodeKey) -> Self {
        Self::NodeNotFound { home_id: key.home_id, node_id: key.node_id }
    }
}

/// Errors from loading a [`DispatcherConfig`](crate::config::DispatcherConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
