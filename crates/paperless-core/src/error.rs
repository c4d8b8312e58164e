//! Error types module
//!
//! Errors raised by the pieces of the core crate that can fail without any
//! network involvement: configuration loading and custom field encoding.

use crate::models::CustomFieldType;

/// Custom field encode/decode errors
#[derive(Debug, thiserror::Error)]
pub enum CustomFieldError {
    #[error("Unknown custom field: {0}")]
    UnknownField(u32),

    #[error("Custom field {field} is of type {expected}, got a {actual} value")]
    TypeMismatch {
        field: u32,
        expected: CustomFieldType,
        actual: CustomFieldType,
    },

    #[error("Invalid value for custom field {field} ({data_type}): {value}")]
    InvalidValue {
        field: u32,
        data_type: CustomFieldType,
        value: serde_json::Value,
    },
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message() {
        let err = CustomFieldError::TypeMismatch {
            field: 3,
            expected: CustomFieldType::Date,
            actual: CustomFieldType::Boolean,
        };
        assert_eq!(
            err.to_string(),
            "Custom field 3 is of type date, got a boolean value"
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::Missing("PAPERLESS_BASE_URL");
        assert_eq!(err.to_string(), "Missing configuration: PAPERLESS_BASE_URL");
    }
}
