use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodeError;

/// Storage type of a device value, as tagged in a value id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ValueType {
    Bool = 0,
    Byte = 1,
    Decimal = 2,
    Int = 3,
    List = 4,
    Schedule = 5,
    Short = 6,
    String = 7,
    Button = 8,
    Raw = 9,
}

impl ValueType {
    pub const ALL: [ValueType; 10] = [
        Self::Bool,
        Self::Byte,
        Self::Decimal,
        Self::Int,
        Self::List,
        Self::Schedule,
        Self::Short,
        Self::String,
        Self::Button,
        Self::Raw,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "BOOL",
            Self::Byte => "BYTE",
            Self::Decimal => "DECIMAL",
            Self::Int => "INT",
            Self::List => "LIST",
            Self::Schedule => "SCHEDULE",
            Self::Short => "SHORT",
            Self::String => "STRING",
            Self::Button => "BUTTON",
            Self::Raw => "RAW",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueType {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CodeError::unknown("value type", s))
    }
}
