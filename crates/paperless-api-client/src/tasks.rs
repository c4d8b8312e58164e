//! Lookup of server-side import tasks.

use async_trait::async_trait;
use paperless_core::models::PaperlessTask;
use tracing::debug;
use uuid::Uuid;

use crate::{routes, ApiClient, Result};

/// One fetch of a task by its id. `None` when the server does not know the task.
///
/// The import poll loop goes through this trait, so it can be driven by an
/// in-memory implementation in tests.
#[async_trait]
pub trait TaskLookup: Send + Sync {
    async fn get_task(&self, task_id: Uuid) -> Result<Option<PaperlessTask>>;
}

#[derive(Clone, Debug)]
pub struct TaskClient {
    api: ApiClient,
}

impl TaskClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TaskLookup for TaskClient {
    async fn get_task(&self, task_id: Uuid) -> Result<Option<PaperlessTask>> {
        // The endpoint filters a list, so an unknown id is an empty list rather than a 404.
        let tasks: Vec<PaperlessTask> = self.api.get_json(&routes::task(task_id)).await?;
        debug!(task_id = %task_id, found = !tasks.is_empty(), "Fetched import task");
        Ok(tasks.into_iter().next())
    }
}
