//! Validation error types

use std::fmt;

/// Validation error for inbound payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// String doesn't match required format (e.g., email address)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::InvalidFormat { field, .. } => field,
        }
    }

    /// Machine-readable error kind, reported alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "value_error.missing",
            Self::InvalidFormat { .. } => "value_error.format",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::InvalidFormat {
            field: "email",
            reason: "missing '@'",
        };
        assert_eq!(err.to_string(), "email: missing '@'");
        assert_eq!(err.field(), "email");
    }

    #[test]
    fn empty_kind() {
        let err = ValidationError::Empty { field: "email" };
        assert_eq!(err.kind(), "value_error.missing");
        assert_eq!(err.to_string(), "email cannot be empty");
    }
}
