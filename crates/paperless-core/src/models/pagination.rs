use serde::{Deserialize, Serialize};

/// One page of a paged list endpoint.
///
/// `next` and `previous` are absolute URLs. Only their path and query are
/// reused when following them, so a client configured with a different host
/// name than the one the server reports still walks the right pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedList<T> {
    #[serde(default)]
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    /// Absent on malformed pages; the pagination walker treats that as the end.
    pub results: Option<Vec<T>>,
}

impl<T> PaginatedList<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_page() {
        let page: PaginatedList<u32> = serde_json::from_str(
            r#"{"count":3,"next":"http://paperless/api/tags/?page=2","previous":null,"results":[1,2]}"#,
        )
        .unwrap();

        assert_eq!(page.count, 3);
        assert!(page.has_next());
        assert_eq!(page.results, Some(vec![1, 2]));
    }

    #[test]
    fn test_deserialize_page_without_results() {
        let page: PaginatedList<u32> =
            serde_json::from_str(r#"{"count":0,"next":null,"previous":null}"#).unwrap();

        assert!(page.results.is_none());
        assert!(!page.has_next());
    }
}
