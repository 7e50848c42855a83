//! Notification type and notification code tables.
//!
//! Numbering follows the driver's `Notification::NotificationType` and
//! `Notification::NotificationCode` enumerations; records carry the raw byte
//! and are decoded here only when needed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodeError;

/// Kind of asynchronous notification delivered by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum NotificationType {
    // Values (0x00-0x04)
    ValueAdded = 0,
    ValueRemoved = 1,
    ValueChanged = 2,
    ValueRefreshed = 3,
    Group = 4,

    // Node lifecycle (0x05-0x0A)
    NodeNew = 5,
    NodeAdded = 6,
    NodeRemoved = 7,
    NodeProtocolInfo = 8,
    NodeNaming = 9,
    NodeEvent = 10,

    // Polling, scenes and buttons (0x0B-0x11)
    PollingDisabled = 11,
    PollingEnabled = 12,
    SceneEvent = 13,
    CreateButton = 14,
    DeleteButton = 15,
    ButtonOn = 16,
    ButtonOff = 17,

    // Driver (0x12-0x14)
    DriverReady = 18,
    DriverFailed = 19,
    DriverReset = 20,

    // Query progress (0x15-0x19)
    EssentialNodeQueriesComplete = 21,
    NodeQueriesComplete = 22,
    AwakeNodesQueried = 23,
    AllNodesQueriedSomeDead = 24,
    AllNodesQueried = 25,

    // Misc (0x1A-0x1D)
    Notification = 26,
    DriverRemoved = 27,
    ControllerCommand = 28,
    NodeReset = 29,
}

impl NotificationType {
    /// Every known notification type, in code order.
    pub const ALL: [NotificationType; 30] = [
        Self::ValueAdded,
        Self::ValueRemoved,
        Self::ValueChanged,
        Self::ValueRefreshed,
        Self::Group,
        Self::NodeNew,
        Self::NodeAdded,
        Self::NodeRemoved,
        Self::NodeProtocolInfo,
        Self::NodeNaming,
        Self::NodeEvent,
        Self::PollingDisabled,
        Self::PollingEnabled,
        Self::SceneEvent,
        Self::CreateButton,
        Self::DeleteButton,
        Self::ButtonOn,
        Self::ButtonOff,
        Self::DriverReady,
        Self::DriverFailed,
        Self::DriverReset,
        Self::EssentialNodeQueriesComplete,
        Self::NodeQueriesComplete,
        Self::AwakeNodesQueried,
        Self::AllNodesQueriedSomeDead,
        Self::AllNodesQueried,
        Self::Notification,
        Self::DriverRemoved,
        Self::ControllerCommand,
        Self::NodeReset,
    ];

    /// Convert from the raw code carried by a notification record.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Diagnostic name, e.g. `VALUE_ADDED`.
    pub fn name(self) -> &'static str {
        match self {
            Self::ValueAdded => "VALUE_ADDED",
            Self::ValueRemoved => "VALUE_REMOVED",
            Self::ValueChanged => "VALUE_CHANGED",
            Self::ValueRefreshed => "VALUE_REFRESHED",
            Self::Group => "GROUP",
            Self::NodeNew => "NODE_NEW",
            Self::NodeAdded => "NODE_ADDED",
            Self::NodeRemoved => "NODE_REMOVED",
            Self::NodeProtocolInfo => "NODE_PROTOCOL_INFO",
            Self::NodeNaming => "NODE_NAMING",
            Self::NodeEvent => "NODE_EVENT",
            Self::PollingDisabled => "POLLING_DISABLED",
            Self::PollingEnabled => "POLLING_ENABLED",
            Self::SceneEvent => "SCENE_EVENT",
            Self::CreateButton => "CREATE_BUTTON",
            Self::DeleteButton => "DELETE_BUTTON",
            Self::ButtonOn => "BUTTON_ON",
            Self::ButtonOff => "BUTTON_OFF",
            Self::DriverReady => "DRIVER_READY",
            Self::DriverFailed => "DRIVER_FAILED",
            Self::DriverReset => "DRIVER_RESET",
            Self::EssentialNodeQueriesComplete => "ESSENTIAL_NODE_QUERIES_COMPLETE",
            Self::NodeQueriesComplete => "NODE_QUERIES_COMPLETE",
            Self::AwakeNodesQueried => "AWAKE_NODES_QUERIED",
            Self::AllNodesQueriedSomeDead => "ALL_NODES_QUERIED_SOME_DEAD",
            Self::AllNodesQueried => "ALL_NODES_QUERIED",
            Self::Notification => "NOTIFICATION",
            Self::DriverRemoved => "DRIVER_REMOVED",
            Self::ControllerCommand => "CONTROLLER_COMMAND",
            Self::NodeReset => "NODE_RESET",
        }
    }

    /// `true` for the value add/change/refresh family that carries a payload.
    pub fn carries_value(self) -> bool {
        matches!(self, Self::ValueAdded | Self::ValueChanged | Self::ValueRefreshed)
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NotificationType {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CodeError::unknown("notification type", s))
    }
}

/// Secondary code attached to `NOTIFICATION` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum NotificationCode {
    MsgComplete = 0,
    Timeout = 1,
    NoOperation = 2,
    Awake = 3,
    Sleep = 4,
    Dead = 5,
    Alive = 6,
}

impl NotificationCode {
    pub const ALL: [NotificationCode; 7] = [
        Self::MsgComplete,
        Self::Timeout,
        Self::NoOperation,
        Self::Awake,
        Self::Sleep,
        Self::Dead,
        Self::Alive,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MsgComplete => "MSG_COMPLETE",
            Self::Timeout => "TIMEOUT",
            Self::NoOperation => "NO_OPERATION",
            Self::Awake => "AWAKE",
            Self::Sleep => "SLEEP",
            Self::Dead => "DEAD",
            Self::Alive => "ALIVE",
        }
    }
}

impl fmt::Display for NotificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NotificationCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CodeError::unknown("notification code", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_codes() {
        for (i, t) in NotificationType::ALL.iter().enumerate() {
            assert_eq!(usize::from(t.code()), i, "{t} out of place");
        }
        for (i, c) in NotificationCode::ALL.iter().enumerate() {
            assert_eq!(usize::from(c.code()), i, "{c} out of place");
        }
    }

    #[test]
    fn queries_complete_codes() {
        assert_eq!(
            NotificationType::from_code(21),
            Some(NotificationType::EssentialNodeQueriesComplete)
        );
        assert_eq!(NotificationType::from_code(22), Some(NotificationType::NodeQueriesComplete));
        assert_eq!(NotificationType::from_code(30), None);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("value_changed".parse(), Ok(NotificationType::ValueChanged));
        assert_eq!(" DEAD ".parse(), Ok(NotificationCode::Dead));
        assert!("VALUE_EXPLODED".parse::<NotificationType>().is_err());
    }

    #[test]
    fn serde_uses_diagnostic_names() {
        let json = serde_json::to_string(&NotificationType::NodeProtocolInfo).expect("encode");
        assert_eq!(json, "\"NODE_PROTOCOL_INFO\"");
        let back: NotificationType = serde_json::from_str(&json).expect("decode");
        assert_eq!(back, NotificationType::NodeProtocolInfo);
    }

    #[test]
    fn only_value_family_carries_value() {
        let carrying: Vec<_> =
            NotificationType::ALL.iter().copied().filter(|t| t.carries_value()).collect();
        assert_eq!(
            carrying,
            vec![
                NotificationType::ValueAdded,
                NotificationType::ValueChanged,
                NotificationType::ValueRefreshed
            ]
        );
    }
}
