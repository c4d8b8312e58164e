use chrono::NaiveDate;

/// Typed subset of the document list filters, appended to the listing URL as
/// query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    pub title_contains: Option<String>,
    pub content_contains: Option<String>,
    pub correspondent_id: Option<u32>,
    pub document_type_id: Option<u32>,
    /// Documents must carry every one of these tags.
    pub tags_all: Vec<u32>,
    pub created_after: Option<NaiveDate>,
    pub created_before: Option<NaiveDate>,
    pub archive_serial_number: Option<u32>,
}

impl DocumentFilter {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(title) = &self.title_contains {
            params.push(("title__icontains", title.clone()));
        }
        if let Some(content) = &self.content_contains {
            params.push(("content__icontains", content.clone()));
        }
        if let Some(id) = self.correspondent_id {
            params.push(("correspondent__id", id.to_string()));
        }
        if let Some(id) = self.document_type_id {
            params.push(("document_type__id", id.to_string()));
        }
        if !self.tags_all.is_empty() {
            let ids: Vec<String> = self.tags_all.iter().map(u32::to_string).collect();
            params.push(("tags__id__all", ids.join(",")));
        }
        if let Some(date) = self.created_after {
            params.push(("created__date__gt", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.created_before {
            params.push(("created__date__lt", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(asn) = self.archive_serial_number {
            params.push(("archive_serial_number", asn.to_string()));
        }
        params
    }

    /// Percent-encoded `key=value` pairs joined by `&`, without a leading separator.
    /// Empty when no filter is set.
    pub fn to_query_string(&self) -> String {
        self.params()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn is_empty(&self) -> bool {
        self.params().is_empty()
    }
}
