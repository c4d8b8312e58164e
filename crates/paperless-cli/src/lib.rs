use std::path::{Path, PathBuf};

use paperless_core::models::{DocumentContent, DocumentCreationResult, TypedDocument};
use paperless_core::{CustomFieldData, SelectOption};
use serde_json::{json, Map, Value};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Human readable rendering of a custom field value.
pub fn format_custom_field(data: &CustomFieldData) -> String {
    match data {
        CustomFieldData::String(text) | CustomFieldData::Url(text) => text.clone(),
        CustomFieldData::Date(date) => date.format("%Y-%m-%d").to_string(),
        CustomFieldData::Boolean(flag) => flag.to_string(),
        CustomFieldData::Integer(number) => number.to_string(),
        CustomFieldData::Float(number) => number.to_string(),
        CustomFieldData::Monetary { currency, amount } => match currency {
            Some(currency) => format!("{} {}", amount, currency),
            None => amount.to_string(),
        },
        CustomFieldData::DocumentLink(ids) => ids
            .iter()
            .map(|id| format!("#{}", id))
            .collect::<Vec<_>>()
            .join(", "),
        CustomFieldData::Select(SelectOption::Index(index)) => format!("option {}", index),
        CustomFieldData::Select(SelectOption::Id(id)) => id.clone(),
    }
}

/// JSON view of a typed document: the raw document with custom fields keyed by name.
pub fn typed_document_json(typed: &TypedDocument) -> serde_json::Result<Value> {
    let mut document = serde_json::to_value(&typed.document)?;

    let fields: Map<String, Value> = typed
        .custom_fields
        .iter()
        .map(|field| {
            let value = field
                .value
                .as_ref()
                .map(|data| Value::String(format_custom_field(data)))
                .unwrap_or(Value::Null);
            (field.name.clone(), value)
        })
        .collect();

    if let Value::Object(map) = &mut document {
        map.insert("custom_fields".to_string(), Value::Object(fields));
    }
    Ok(document)
}

pub fn creation_result_json(result: &DocumentCreationResult) -> Value {
    match result {
        DocumentCreationResult::ImportStarted => json!({ "status": "import_started" }),
        DocumentCreationResult::DocumentCreated { id } => {
            json!({ "status": "document_created", "id": id })
        }
        DocumentCreationResult::ImportFailed { reason } => {
            json!({ "status": "import_failed", "reason": reason })
        }
    }
}

/// Where a downloaded file is written: the explicit output, or the server's file
/// name (falling back to `document-<id>`) in the current directory.
pub fn download_target(output: Option<PathBuf>, content: &DocumentContent, id: u32) -> PathBuf {
    output.unwrap_or_else(|| {
        content
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).file_name())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("document-{}", id)))
    })
}

/// Write a downloaded file, returning the number of bytes written.
pub async fn write_download(path: &Path, content: &DocumentContent) -> std::io::Result<usize> {
    tokio::fs::write(path, &content.content).await?;
    Ok(content.content.len())
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn content(file_name: Option<&str>) -> DocumentContent {
        DocumentContent {
            content: b"%PDF-1.7".to_vec().into(),
            content_type: Some("application/pdf".to_string()),
            file_name: file_name.map(str::to_string),
        }
    }

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("Grüße aus Köln", 8), "Grüße...");
    }

    #[test]
    fn format_custom_field_values() {
        assert_eq!(
            format_custom_field(&CustomFieldData::Date(
                NaiveDate::from_ymd_opt(2024, 1, 19).unwrap()
            )),
            "2024-01-19"
        );
        assert_eq!(
            format_custom_field(&CustomFieldData::Monetary {
                currency: Some("EUR".to_string()),
                amount: "12.34".parse().unwrap(),
            }),
            "12.34 EUR"
        );
        assert_eq!(
            format_custom_field(&CustomFieldData::DocumentLink(vec![3, 8])),
            "#3, #8"
        );
    }

    #[test]
    fn creation_result_rendering() {
        assert_eq!(
            creation_result_json(&DocumentCreationResult::DocumentCreated { id: 42 }),
            json!({ "status": "document_created", "id": 42 })
        );
    }

    #[test]
    fn download_target_prefers_output() {
        let explicit = download_target(Some(PathBuf::from("out.pdf")), &content(None), 5);
        assert_eq!(explicit, PathBuf::from("out.pdf"));

        let named = download_target(None, &content(Some("../invoice.pdf")), 5);
        assert_eq!(named, PathBuf::from("invoice.pdf"));

        let fallback = download_target(None, &content(None), 5);
        assert_eq!(fallback, PathBuf::from("document-5"));
    }

    #[tokio::test]
    async fn write_download_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.pdf");

        let written = write_download(&path, &content(None)).await.unwrap();

        assert_eq!(written, 8);
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7");
    }
}
