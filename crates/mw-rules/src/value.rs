//! Game rule values.

use std::fmt;

use mw_plugin_api::GameRuleValue;
use serde::{Deserialize, Serialize};

/// The type of a rule value, used for validation and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Bool => "boolean",
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "string",
        })
    }
}

/// A configured rule value.
///
/// Deserializes untagged, so config files write plain `true`, `3` or `"x"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Text(String),
}

impl RuleValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            RuleValue::Bool(_) => ValueKind::Bool,
            RuleValue::Int(_) => ValueKind::Int,
            RuleValue::Float(_) => ValueKind::Float,
            RuleValue::Text(_) => ValueKind::Text,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RuleValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Parse command input as a value of `kind`.
    pub fn parse(kind: ValueKind, input: &str) -> Option<Self> {
        match kind {
            ValueKind::Bool => match input.to_lowercase().as_str() {
                "true" => Some(RuleValue::Bool(true)),
                "false" => Some(RuleValue::Bool(false)),
                _ => None,
            },
            ValueKind::Int => input.parse().ok().map(RuleValue::Int),
            ValueKind::Float => input.parse().ok().map(RuleValue::Float),
            ValueKind::Text => Some(RuleValue::Text(input.to_string())),
        }
    }

    /// Client-side representation. Text values have none.
    pub fn to_wire(&self) -> Option<GameRuleValue> {
        match self {
            RuleValue::Bool(v) => Some(GameRuleValue::Bool(*v)),
            RuleValue::Int(v) => Some(GameRuleValue::Int(*v)),
            RuleValue::Float(v) => Some(GameRuleValue::Float(*v)),
            RuleValue::Text(_) => None,
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Bool(v) => write!(f, "{v}"),
            RuleValue::Int(v) => write!(f, "{v}"),
            RuleValue::Float(v) => write!(f, "{v}"),
            RuleValue::Text(v) => f.write_str(v),
        }
    }
}
