//! # zwave-codes
//!
//! Decoding tables for the raw numeric codes carried by Z-Wave driver
//! notifications: notification types, notification codes and value types.
//!
//! Every lookup is a pure function of the code. Codes outside the tables are
//! never an error: the `*_name` helpers render them as `UNKNOWN[0x..]` so a
//! newer driver cannot break diagnostics.
//!
//! ```rust
//! use zwave_codes::{notification_type_name, NotificationType};
//!
//! assert_eq!(NotificationType::from_code(0), Some(NotificationType::ValueAdded));
//! assert_eq!(notification_type_name(22), "NODE_QUERIES_COMPLETE");
//! assert_eq!(notification_type_name(0xF0), "UNKNOWN[0xf0]");
//! ```

pub mod error;
pub mod notification;
pub mod value_type;

use std::borrow::Cow;

pub use error::CodeError;
pub use notification::{NotificationCode, NotificationType};
pub use value_type::ValueType;

/// Name of a raw notification type code.
pub fn notification_type_name(code: u8) -> Cow<'static, str> {
    NotificationType::from_code(code).map_or_else(|| unknown(code), |t| Cow::Borrowed(t.name()))
}

/// Name of a raw notification code.
pub fn notification_code_name(code: u8) -> Cow<'static, str> {
    NotificationCode::from_code(code).map_or_else(|| unknown(code), |c| Cow::Borrowed(c.name()))
}

/// Name of a raw value type code.
pub fn value_type_name(code: u8) -> Cow<'static, str> {
    ValueType::from_code(code).map_or_else(|| unknown(code), |v| Cow::Borrowed(v.name()))
}

fn unknown(code: u8) -> Cow<'static, str> {
    Cow::Owned(format!("UNKNOWN[0x{code:02x}]"))
}
