use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Largest broadcast buffer a config may request.
pub const MAX_EVENT_CAPACITY: usize = 65_536;

/// Behaviour of the notification dispatcher.
///
/// ```toml
/// auto_create_nodes = true
/// evict_removed_nodes = true
/// event_capacity = 256
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatcherConfig {
    /// Create a node on the first notification for an unseen address, not
    /// only on `NODE_NEW`/`NODE_ADDED`.
    pub auto_create_nodes: bool,
    /// Drop a node from the registry once its `NODE_REMOVED` has been handled.
    pub evict_removed_nodes: bool,
    /// Buffer size for broadcast event subscribers, `1..=MAX_EVENT_CAPACITY`.
    pub event_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self { auto_create_nodes: true, evict_removed_nodes: true, event_capacity: 256 }
    }
}

impl DispatcherConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_EVENT_CAPACITY).contains(&self.event_capacity) {
            return Err(ConfigError::Invalid(format!(
                "event_capacity must be in 1..={MAX_EVENT_CAPACITY}, got {}",
                self.event_capacity
            )));
        }
        Ok(())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}
