//! Relative API paths. All of them are joined onto the configured base URL.

use paperless_core::models::DocumentFilter;
use uuid::Uuid;

pub const CORRESPONDENTS: &str = "api/correspondents/";
pub const TAGS: &str = "api/tags/";
pub const DOCUMENTS: &str = "api/documents/";
pub const POST_DOCUMENT: &str = "api/documents/post_document/";
pub const CUSTOM_FIELDS: &str = "api/custom_fields/";
pub const TASKS: &str = "api/tasks/";

pub fn entity(collection: &str, id: u32) -> String {
    format!("{}{}/", collection, id)
}

pub fn task(task_id: Uuid) -> String {
    format!("{}?task_id={}", TASKS, task_id)
}

pub fn document_metadata(id: u32) -> String {
    format!("{}{}/metadata/", DOCUMENTS, id)
}

pub fn document_download(id: u32, original: bool) -> String {
    with_original(format!("{}{}/download/", DOCUMENTS, id), original)
}

pub fn document_preview(id: u32, original: bool) -> String {
    with_original(format!("{}{}/preview/", DOCUMENTS, id), original)
}

pub fn document_thumbnail(id: u32) -> String {
    format!("{}{}/thumb/", DOCUMENTS, id)
}

fn with_original(path: String, original: bool) -> String {
    if original {
        append_query(path, "original=true")
    } else {
        path
    }
}

/// Start path of a paged listing
pub fn listing(collection: &str, page_size: Option<u32>) -> String {
    match page_size {
        Some(size) => append_query(collection.to_string(), &format!("page_size={}", size)),
        None => collection.to_string(),
    }
}

pub fn document_listing(page_size: Option<u32>, filter: Option<&DocumentFilter>) -> String {
    let path = listing(DOCUMENTS, page_size);
    match filter {
        Some(filter) if !filter.is_empty() => append_query(path, &filter.to_query_string()),
        _ => path,
    }
}

fn append_query(mut path: String, query: &str) -> String {
    path.push(if path.contains('?') { '&' } else { '?' });
    path.push_str(query);
    path
}
