//! Tag endpoints.

use futures::stream::BoxStream;
use paperless_core::models::{Tag, TagCreation};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{paginate, routes, ApiClient, Result};

#[derive(Clone, Debug)]
pub struct TagClient {
    api: ApiClient,
}

impl TagClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn list(
        &self,
        page_size: Option<u32>,
        cancel: CancellationToken,
    ) -> BoxStream<'static, Result<Tag>> {
        paginate(
            self.api.clone(),
            routes::listing(routes::TAGS, page_size),
            cancel,
        )
    }

    pub async fn get(&self, id: u32) -> Result<Option<Tag>> {
        self.api.get_optional(&routes::entity(routes::TAGS, id)).await
    }

    pub async fn create(&self, creation: &TagCreation) -> Result<Tag> {
        let tag: Tag = self.api.post_json(routes::TAGS, creation).await?;
        info!(id = tag.id, name = %tag.name, "Created tag");
        Ok(tag)
    }

    pub async fn delete(&self, id: u32) -> Result<()> {
        self.api.delete(&routes::entity(routes::TAGS, id)).await?;
        info!(id, "Deleted tag");
        Ok(())
    }
}
