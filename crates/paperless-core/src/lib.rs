//! Paperless Core Library
//!
//! This crate provides the wire models, the custom field registry and codec,
//! server version handling and configuration shared by the Paperless API
//! client and the CLI.

pub mod config;
pub mod custom_fields;
pub mod error;
pub mod models;
pub mod version;

// Re-export commonly used types
pub use config::{Auth, PaperlessConfig};
pub use custom_fields::{CustomFieldData, CustomFieldRegistry, SelectOption, TypedCustomField};
pub use error::{ConfigError, CustomFieldError};
pub use version::ServerVersion;
