//! Shared helpers for tests running against a mockito server.

#![allow(dead_code)]

use std::time::Duration;

use paperless_api_client::PaperlessClient;
use paperless_core::{Auth, PaperlessConfig};
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";

pub fn config(server: &mockito::ServerGuard) -> PaperlessConfig {
    PaperlessConfig::new(server.url(), Auth::Token(TOKEN.to_string()))
        .with_task_poll_delay(Duration::from_millis(5))
}

pub fn client(server: &mockito::ServerGuard) -> PaperlessClient {
    PaperlessClient::new(config(server)).expect("valid test config")
}

pub fn page(results: Value, next: Option<String>) -> String {
    json!({
        "count": results.as_array().map(Vec::len).unwrap_or(0),
        "next": next,
        "previous": null,
        "results": results,
    })
    .to_string()
}

pub fn tag(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "slug": name.to_lowercase(),
        "name": name,
        "color": "#a6cee3",
        "text_color": "#000000",
        "match": "",
        "matching_algorithm": 6,
        "is_insensitive": true,
        "is_inbox_tag": false,
        "document_count": 0
    })
}

pub fn correspondent(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "slug": name.to_lowercase(),
        "name": name,
        "match": "",
        "matching_algorithm": 1,
        "is_insensitive": true,
        "document_count": 2,
        "last_correspondence": null
    })
}

pub fn document(id: u32, custom_fields: Value) -> Value {
    json!({
        "id": id,
        "correspondent": null,
        "document_type": null,
        "storage_path": null,
        "title": format!("Document {}", id),
        "content": "lorem ipsum",
        "tags": [],
        "created": "2024-01-19T10:00:00+01:00",
        "modified": "2024-01-19T10:05:00+01:00",
        "added": "2024-01-19T10:04:00+01:00",
        "archive_serial_number": null,
        "original_file_name": format!("doc-{}.pdf", id),
        "archived_file_name": null,
        "custom_fields": custom_fields
    })
}

pub fn task(task_id: &str, status: &str, related_document: Value, result: Value) -> Value {
    json!({
        "id": 1,
        "task_id": task_id,
        "task_file_name": "Lorem Ipsum.txt",
        "date_created": "2024-01-19T10:04:00+01:00",
        "date_done": null,
        "type": "file",
        "status": status,
        "result": result,
        "acknowledged": false,
        "related_document": related_document
    })
}
