//! Correspondent endpoints.

use futures::stream::BoxStream;
use paperless_core::models::{Correspondent, CorrespondentCreation};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{paginate, routes, ApiClient, Result};

#[derive(Clone, Debug)]
pub struct CorrespondentClient {
    api: ApiClient,
}

impl CorrespondentClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Stream all correspondents, fetching pages lazily.
    pub fn list(
        &self,
        page_size: Option<u32>,
        cancel: CancellationToken,
    ) -> BoxStream<'static, Result<Correspondent>> {
        paginate(
            self.api.clone(),
            routes::listing(routes::CORRESPONDENTS, page_size),
            cancel,
        )
    }

    pub async fn get(&self, id: u32) -> Result<Option<Correspondent>> {
        self.api
            .get_optional(&routes::entity(routes::CORRESPONDENTS, id))
            .await
    }

    pub async fn create(&self, creation: &CorrespondentCreation) -> Result<Correspondent> {
        let correspondent: Correspondent =
            self.api.post_json(routes::CORRESPONDENTS, creation).await?;
        info!(id = correspondent.id, name = %correspondent.name, "Created correspondent");
        Ok(correspondent)
    }

    pub async fn delete(&self, id: u32) -> Result<()> {
        self.api
            .delete(&routes::entity(routes::CORRESPONDENTS, id))
            .await?;
        info!(id, "Deleted correspondent");
        Ok(())
    }
}
