//! Lazy traversal of paged list endpoints.

use futures::stream::{self, BoxStream, StreamExt};
use paperless_core::models::PaginatedList;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{ApiClient, Result};

struct Cursor<T> {
    api: ApiClient,
    cancel: CancellationToken,
    next: Option<String>,
    pending: std::vec::IntoIter<T>,
}

/// Stream every item of a paged listing, starting at `start` (a relative path that
/// may carry `page_size` and filter parameters).
///
/// Pages are fetched one at a time as the consumer asks for more items. The stream
/// ends when a page has no `next` link, when a page or its `results` are missing, or
/// when `cancel` fires; cancellation is checked before each page fetch. A request
/// error is yielded once and ends the stream.
pub fn paginate<T>(
    api: ApiClient,
    start: impl Into<String>,
    cancel: CancellationToken,
) -> BoxStream<'static, Result<T>>
where
    T: DeserializeOwned + Send + 'static,
{
    let cursor = Cursor {
        api,
        cancel,
        next: Some(start.into()),
        pending: Vec::new().into_iter(),
    };

    stream::try_unfold(cursor, |mut cursor| async move {
        loop {
            if let Some(item) = cursor.pending.next() {
                return Ok(Some((item, cursor)));
            }

            let Some(path) = cursor.next.take() else {
                return Ok(None);
            };

            if cursor.cancel.is_cancelled() {
                debug!(path = %path, "Listing cancelled");
                return Ok(None);
            }

            debug!(path = %path, "Fetching page");
            let page: Option<PaginatedList<T>> = cursor.api.get_json(&path).await?;
            let Some(PaginatedList {
                next,
                results: Some(results),
                ..
            }) = page
            else {
                return Ok(None);
            };

            cursor.next = next
                .as_deref()
                .map(|link| cursor.api.relative_path(link))
                .transpose()?;
            cursor.pending = results.into_iter();
        }
    })
    .boxed()
}
