//! Value identity and payload types.

use serde::{Deserialize, Serialize};
use zwave_codes::ValueType;

/// Location and type tag of a device value as reported by the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueId {
    pub command_class_id: u8,
    pub instance: u8,
    pub index: u8,
    /// Raw value type code, decoded with [`ValueId::value_type`].
    #[serde(default)]
    pub value_type: u8,
    /// Driver-assigned opaque identifier.
    #[serde(default)]
    pub id: u64,
}

impl ValueId {
    pub fn new(command_class_id: u8, instance: u8, index: u8) -> Self {
        Self { command_class_id, instance, index, value_type: 0, id: 0 }
    }

    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type.code();
        self
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// `(command_class_id, instance, index)`, the key a value is stored under.
    pub fn triple(&self) -> (u8, u8, u8) {
        (self.command_class_id, self.instance, self.index)
    }

    pub fn value_type(&self) -> Option<ValueType> {
        ValueType::from_code(self.value_type)
    }
}

/// Type-tagged value contents.
///
/// Payloads move from a notification into the store; they are never shared
/// between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ValuePayload {
    Bool(bool),
    Byte(u8),
    /// Decimal kept in its reported textual form so precision is preserved.
    Decimal(String),
    Int(i32),
    List { selection: i32, items: Vec<String> },
    Schedule(Vec<u8>),
    Short(i16),
    String(String),
    Button(bool),
    Raw(Vec<u8>),
}

impl ValuePayload {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Byte(_) => ValueType::Byte,
            Self::Decimal(_) => ValueType::Decimal,
            Self::Int(_) => ValueType::Int,
            Self::List { .. } => ValueType::List,
            Self::Schedule(_) => ValueType::Schedule,
            Self::Short(_) => ValueType::Short,
            Self::String(_) => ValueType::String,
            Self::Button(_) => ValueType::Button,
            Self::Raw(_) => ValueType::Raw,
        }
    }
}

/// A stored value: the payload plus the id that located it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Value {
    pub value_id: ValueId,
    pub payload: ValuePayload,
}

impl Value {
    pub fn new(value_id: ValueId, payload: ValuePayload) -> Self {
        Self { value_id, payload }
    }

    pub fn triple(&self) -> (u8, u8, u8) {
        self.value_id.triple()
    }
}
