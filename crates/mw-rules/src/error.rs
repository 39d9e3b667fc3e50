//! Rule store and dispatcher errors.

use thiserror::Error;

use crate::value::ValueKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("unknown game rule: {0}")]
    UnknownRule(String),

    #[error("game rule {rule} expects a {expected} value, got {got}")]
    WrongValueKind {
        rule: &'static str,
        expected: ValueKind,
        got: ValueKind,
    },

    #[error("invalid value for {rule}: {input}")]
    InvalidValue { rule: &'static str, input: String },

    #[error("no inventory snapshot for {0}")]
    SnapshotNotFound(String),
}

impl RuleError {
    /// Whether this is a validation failure (bad name or value) as opposed to a
    /// missing snapshot.
    pub fn is_validation(&self) -> bool {
        !matches!(self, RuleError::SnapshotNotFound(_))
    }
}
