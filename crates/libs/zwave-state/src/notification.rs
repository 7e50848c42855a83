//! The self-contained notification record handed over by the driver layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use zwave_codes::{
    notification_code_name, notification_type_name, value_type_name, NotificationCode,
    NotificationType,
};

use crate::node::{NodeInfo, NodeKey};
use crate::value::{ValueId, ValuePayload};

/// One driver notification.
///
/// The record owns its value payload until a node absorbs it. It is released
/// when dropped, or explicitly through [`Notification::release`] to recover
/// a payload that is still in it.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    home_id: u32,
    node_id: u8,
    notification_type: u8,
    #[serde(default)]
    notification_code: u8,
    #[serde(default)]
    value_id: ValueId,
    #[serde(default)]
    value: Option<ValuePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_info: Option<NodeInfo>,
}

impl Notification {
    pub fn new(key: NodeKey, notification_type: NotificationType) -> Self {
        Self::from_raw(key, notification_type.code(), 0)
    }

    /// Builds a record from undecoded codes, as received from the driver.
    pub fn from_raw(key: NodeKey, notification_type: u8, notification_code: u8) -> Self {
        Self {
            home_id: key.home_id,
            node_id: key.node_id,
            notification_type,
            notification_code,
            value_id: ValueId::default(),
            value: None,
            node_info: None,
        }
    }

    pub fn with_code(mut self, code: NotificationCode) -> Self {
        self.notification_code = code.code();
        self
    }

    pub fn with_value_id(mut self, value_id: ValueId) -> Self {
        self.value_id = value_id;
        self
    }

    /// Attaches a value id and payload. The value id's type tag is taken from
    /// the payload.
    pub fn with_value(mut self, value_id: ValueId, payload: ValuePayload) -> Self {
        self.value_id = value_id.with_type(payload.value_type());
        self.value = Some(payload);
        self
    }

    pub fn with_node_info(mut self, info: NodeInfo) -> Self {
        self.node_info = Some(info);
        self
    }

    pub fn key(&self) -> NodeKey {
        NodeKey::new(self.home_id, self.node_id)
    }

    pub fn home_id(&self) -> u32 {
        self.home_id
    }

    pub fn node_id(&self) -> u8 {
        self.node_id
    }

    /// Decoded type, `None` for codes this crate does not know.
    pub fn notification_type(&self) -> Option<NotificationType> {
        NotificationType::from_code(self.notification_type)
    }

    pub fn raw_notification_type(&self) -> u8 {
        self.notification_type
    }

    pub fn notification_code(&self) -> Option<NotificationCode> {
        NotificationCode::from_code(self.notification_code)
    }

    pub fn raw_notification_code(&self) -> u8 {
        self.notification_code
    }

    /// Snapshot of the value id.
    pub fn value_id(&self) -> ValueId {
        self.value_id
    }

    /// The payload still held by this record, if any.
    pub fn value(&self) -> Option<&ValuePayload> {
        self.value.as_ref()
    }

    pub fn node_info(&self) -> Option<&NodeInfo> {
        self.node_info.as_ref()
    }

    pub(crate) fn take_node_info(&mut self) -> Option<NodeInfo> {
        self.node_info.take()
    }

    /// The payload slot a value store moves from and hands prior payloads
    /// back through.
    pub(crate) fn value_slot(&mut self) -> &mut Option<ValuePayload> {
        &mut self.value
    }

    /// Releases the record, returning whatever payload it still owns: the
    /// original one if nothing absorbed it, or the replaced payload after an
    /// in-place update.
    pub fn release(mut self) -> Option<ValuePayload> {
        self.value.take()
    }
}

impl Drop for Notification {
    fn drop(&mut self) {
        log::trace!("released {}", self);
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Notification[node=0x{:08x}:0x{:02x}, notificationType={}/{}, valueType={}, \
             valueId=0x{:08x}]",
            self.home_id,
            self.node_id,
            notification_type_name(self.notification_type),
            notification_code_name(self.notification_code),
            value_type_name(self.value_id.value_type),
            self.value_id.id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zwave_codes::ValueType;

    const KEY: NodeKey = NodeKey::new(0xd4f2_0c11, 0x0c);

    #[test]
    fn display_names_codes() {
        let nt = Notification::new(KEY, NotificationType::ValueChanged)
            .with_value(ValueId::new(0x25, 1, 0).with_id(0x0301_2500), ValuePayload::Bool(true));
        assert_eq!(
            nt.to_string(),
            "Notification[node=0xd4f20c11:0x0c, notificationType=VALUE_CHANGED/MSG_COMPLETE, \
             valueType=BOOL, valueId=0x03012500]"
        );
    }

    #[test]
    fn display_tolerates_unknown_codes() {
        let nt = Notification::from_raw(KEY, 0x40, 0x09);
        assert_eq!(nt.notification_type(), None);
        assert_eq!(nt.notification_code(), None);
        assert!(nt.to_string().contains("notificationType=UNKNOWN[0x40]/UNKNOWN[0x09]"));
    }

    #[test]
    fn views_do_not_consume_payload() {
        let nt = Notification::new(KEY, NotificationType::ValueAdded)
            .with_value(ValueId::new(0x31, 1, 1), ValuePayload::Decimal("3.2".into()));
        assert_eq!(nt.value_id().value_type(), Some(ValueType::Decimal));
        assert_eq!(nt.value(), Some(&ValuePayload::Decimal("3.2".into())));
        assert_eq!(nt.value(), Some(&ValuePayload::Decimal("3.2".into())));
        assert_eq!(nt.release(), Some(ValuePayload::Decimal("3.2".into())));
    }

    #[test]
    fn deserializes_minimal_record() {
        let nt: Notification =
            serde_json::from_str(r#"{"home_id": 1, "node_id": 2, "notification_type": 7}"#)
                .expect("decode");
        assert_eq!(nt.key(), NodeKey::new(1, 2));
        assert_eq!(nt.notification_type(), Some(NotificationType::NodeRemoved));
        assert!(nt.value().is_none());
        assert!(nt.node_info().is_none());
    }
}
