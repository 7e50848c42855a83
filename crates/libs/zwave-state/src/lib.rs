//! # zwave-state
//!
//! Live per-node state for a Z-Wave network, rebuilt from the driver's
//! asynchronous notification stream.
//!
//! The driver layer hands over self-contained [`Notification`] records. A
//! [`NotificationDispatcher`] routes each one by `(home id, node id)` to its
//! [`Node`], whose handler updates the node's lifecycle state and its
//! [`ValueStore`] and pushes at most one [`Event`] into an [`EventEmitter`].
//!
//! Every operation is total. Duplicate or reordered notifications never
//! corrupt the store: inserts update in place, removals of absent values are
//! no-ops, and emptied containers are pruned.
//!
//! ```rust
//! use zwave_codes::NotificationType;
//! use zwave_state::{Event, NodeKey, Notification, NotificationDispatcher, ValueId, ValuePayload};
//!
//! let key = NodeKey::new(0x0184_5a3c, 5);
//! let mut dispatcher: NotificationDispatcher = NotificationDispatcher::new(Vec::new());
//!
//! dispatcher
//!     .dispatch(
//!         Notification::new(key, NotificationType::ValueAdded)
//!             .with_value(ValueId::new(0x25, 1, 0), ValuePayload::Bool(true)),
//!     )
//!     .unwrap();
//! dispatcher.dispatch(Notification::new(key, NotificationType::NodeQueriesComplete)).unwrap();
//!
//! let node = dispatcher.node(key).unwrap();
//! assert!(node.is_ready());
//! assert_eq!(node.values().len(), 1);
//! assert!(matches!(dispatcher.emitter()[0], Event::NodeAvailable(_)));
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod node;
pub mod notification;
pub mod registry;
pub mod store;
pub mod value;

pub use config::DispatcherConfig;
pub use dispatch::NotificationDispatcher;
pub use error::{ConfigError, DispatchError};
pub use event::{BroadcastEmitter, Event, EventEmitter, NodeEvent};
pub use node::{Node, NodeInfo, NodeKey, NodeState, ProductDescription, ProductId};
pub use notification::Notification;
pub use registry::NodeRegistry;
pub use store::{ValueClass, ValueInstance, ValueStore};
pub use value::{Value, ValueId, ValuePayload};
