//! Domain errors for todos and categories.

use thiserror::Error;

/// Why a todo or category command was rejected.
///
/// Every variant leaves the owning store unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Input failed a domain rule (text length, empty name or tag, inconsistent patch)
    #[error("{message}")]
    Validation {
        /// Human-readable description of the rule that failed
        message: String,
    },

    /// A priority, status or other enumerated label was not recognized
    #[error("invalid {field}: '{value}'")]
    InvalidEnumValue {
        /// Name of the field being parsed
        field: &'static str,
        /// The rejected label
        value: String,
    },

    /// No record with this id exists
    #[error("{resource} {id} not found")]
    NotFound {
        /// Kind of record (`todo`, `category`)
        resource: &'static str,
        /// Requested id
        id: String,
    },

    /// The record exists but belongs to another owner
    #[error("{resource} {id} belongs to another user")]
    Ownership {
        /// Kind of record (`todo`, `category`)
        resource: &'static str,
        /// Requested id
        id: String,
    },
}

impl TodoError {
    /// Shorthand for a [`TodoError::Validation`]
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`TodoError::InvalidEnumValue`]
    #[must_use]
    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidEnumValue {
            field,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_record() {
        let err = TodoError::NotFound {
            resource: "todo",
            id: "42".to_string(),
        };
        assert_eq!(err.to_string(), "todo 42 not found");

        let err = TodoError::invalid_value("priority", "urgent");
        assert_eq!(err.to_string(), "invalid priority: 'urgent'");
    }
}
