//! Entry point bundling the resource clients over one transport.

use std::sync::Arc;

use paperless_core::{CustomFieldRegistry, PaperlessConfig};

use crate::{
    ApiClient, CorrespondentClient, DocumentClient, Result, TagClient, TaskClient, TaskLookup,
    TaskPolling,
};

/// One connection to a Paperless server.
///
/// All resource clients share the same HTTP client, and the document client owns
/// the custom field registry. Cloning is cheap and keeps sharing both.
#[derive(Clone)]
pub struct PaperlessClient {
    api: ApiClient,
    correspondents: CorrespondentClient,
    documents: DocumentClient,
    tags: TagClient,
    tasks: Arc<TaskClient>,
}

impl PaperlessClient {
    pub fn new(config: PaperlessConfig) -> Result<Self> {
        Self::with_registry(config, CustomFieldRegistry::new())
    }

    /// Build a client that shares an existing custom field registry, e.g. with a
    /// second client for the same server.
    pub fn with_registry(config: PaperlessConfig, registry: CustomFieldRegistry) -> Result<Self> {
        config.validate()?;

        let api = ApiClient::new(&config)?;
        let tasks = Arc::new(TaskClient::new(api.clone()));
        let lookup: Arc<dyn TaskLookup> = tasks.clone();

        Ok(Self {
            correspondents: CorrespondentClient::new(api.clone()),
            documents: DocumentClient::new(
                api.clone(),
                lookup,
                registry,
                TaskPolling::from(&config),
            ),
            tags: TagClient::new(api.clone()),
            tasks,
            api,
        })
    }

    /// Build from `PAPERLESS_*` environment variables, see [`PaperlessConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(PaperlessConfig::from_env()?)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn correspondents(&self) -> &CorrespondentClient {
        &self.correspondents
    }

    pub fn documents(&self) -> &DocumentClient {
        &self.documents
    }

    pub fn tags(&self) -> &TagClient {
        &self.tags
    }

    pub fn tasks(&self) -> &TaskClient {
        &self.tasks
    }
}
