use bytes::Bytes;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::custom_field::CustomFieldValue;
use crate::custom_fields::TypedCustomField;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: u32,
    pub correspondent: Option<u32>,
    pub document_type: Option<u32>,
    pub storage_path: Option<u32>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<u32>,
    /// Newer servers send a plain date here; it is read as midnight UTC.
    #[serde(deserialize_with = "deserialize_created")]
    pub created: DateTime<FixedOffset>,
    pub modified: DateTime<FixedOffset>,
    pub added: DateTime<FixedOffset>,
    pub archive_serial_number: Option<u32>,
    #[serde(default)]
    pub original_file_name: Option<String>,
    #[serde(default)]
    pub archived_file_name: Option<String>,
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldValue>,
}

fn deserialize_created<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(timestamp);
    }

    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc().fixed_offset())
        .map_err(serde::de::Error::custom)
}

/// A document whose custom field values have been resolved through the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedDocument {
    pub document: Document,
    pub custom_fields: Vec<TypedCustomField>,
}

/// A document to upload, plus the metadata Paperless should apply on import.
///
/// Unset metadata is not sent so the server's own defaults and matching rules apply.
#[derive(Debug, Clone, Default)]
pub struct DocumentCreation {
    pub content: Bytes,
    pub file_name: String,
    pub title: Option<String>,
    pub created: Option<DateTime<FixedOffset>>,
    pub correspondent_id: Option<u32>,
    pub document_type_id: Option<u32>,
    pub storage_path_id: Option<u32>,
    pub tag_ids: Vec<u32>,
    pub archive_serial_number: Option<u32>,
}

impl DocumentCreation {
    pub fn new(content: impl Into<Bytes>, file_name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            file_name: file_name.into(),
            ..Default::default()
        }
    }
}

/// Final outcome of a document upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentCreationResult {
    /// The server is too old to report an import task; the upload was accepted
    /// but its outcome is unknown to the client.
    ImportStarted,
    /// The import task finished and produced this document.
    DocumentCreated { id: u32 },
    /// The import task failed, e.g. because the file is a duplicate.
    ImportFailed { reason: String },
}

/// Partial update sent with PATCH. Only set fields are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correspondent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_serial_number: Option<u32>,
    /// Raw values; use the document client's typed update to have these encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomFieldValue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub namespace: String,
    pub prefix: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub original_checksum: String,
    pub original_size: u64,
    pub original_mime_type: String,
    pub media_filename: String,
    pub has_archive_version: bool,
    #[serde(default)]
    pub original_metadata: Vec<MetadataEntry>,
    #[serde(default)]
    pub archive_checksum: Option<String>,
    #[serde(default)]
    pub archive_media_filename: Option<String>,
    pub original_filename: String,
    #[serde(default)]
    pub archive_size: Option<u64>,
    #[serde(default)]
    pub archive_metadata: Option<Vec<MetadataEntry>>,
    #[serde(default)]
    pub lang: Option<String>,
}

/// Downloaded file body with the headers that describe it.
#[derive(Debug, Clone)]
pub struct DocumentContent {
    pub content: Bytes,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}
