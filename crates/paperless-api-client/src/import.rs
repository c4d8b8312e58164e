//! Waiting for a document import task to finish.

use std::time::Duration;

use paperless_core::models::{DocumentCreationResult, PaperlessTask, TaskStatus};
use paperless_core::PaperlessConfig;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::tasks::TaskLookup;
use crate::{PaperlessError, Result};

/// How the import task is polled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskPolling {
    pub delay: Duration,
    /// `None` keeps polling until the task finishes or the call is cancelled.
    pub max_attempts: Option<u32>,
}

impl Default for TaskPolling {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            max_attempts: None,
        }
    }
}

impl From<&PaperlessConfig> for TaskPolling {
    fn from(config: &PaperlessConfig) -> Self {
        Self {
            delay: config.task_poll_delay,
            max_attempts: config.max_poll_attempts,
        }
    }
}

/// Poll the import task `task_id` until it is gone or finished, then turn it into
/// the creation result.
///
/// Cancellation is checked before every fetch and every delay.
pub async fn await_import(
    task_id: Uuid,
    lookup: &dyn TaskLookup,
    polling: TaskPolling,
    cancel: &CancellationToken,
) -> Result<DocumentCreationResult> {
    let mut attempts: u32 = 0;

    let task = loop {
        if cancel.is_cancelled() {
            return Err(PaperlessError::Cancelled);
        }

        let task = lookup.get_task(task_id).await?;
        attempts += 1;

        match task {
            Some(task) if !task.status.is_completed() => {
                debug!(task_id = %task_id, status = %task.status, attempts, "Import still running");
            }
            finished => break finished,
        }

        if polling.max_attempts.is_some_and(|max| attempts >= max) {
            warn!(task_id = %task_id, attempts, "Giving up on import task");
            return Err(PaperlessError::PollLimitExceeded { task_id, attempts });
        }

        if cancel.is_cancelled() {
            return Err(PaperlessError::Cancelled);
        }
        tokio::time::sleep(polling.delay).await;
    };

    let result = resolve(task_id, task);
    match &result {
        DocumentCreationResult::DocumentCreated { id } => {
            info!(task_id = %task_id, document_id = id, attempts, "Document imported");
        }
        DocumentCreationResult::ImportFailed { reason } => {
            warn!(task_id = %task_id, reason = %reason, attempts, "Document import failed");
        }
        DocumentCreationResult::ImportStarted => {}
    }

    Ok(result)
}

fn resolve(task_id: Uuid, task: Option<PaperlessTask>) -> DocumentCreationResult {
    let Some(task) = task else {
        return DocumentCreationResult::ImportFailed {
            reason: format!("Could not find the import task by the given id {}", task_id),
        };
    };

    match (task.related_document, task.status) {
        (Some(id), _) => DocumentCreationResult::DocumentCreated { id },
        (None, TaskStatus::Success) => DocumentCreationResult::ImportFailed {
            reason: "Task status is Success, but document id was not given".to_string(),
        },
        (None, TaskStatus::Failure) => DocumentCreationResult::ImportFailed {
            reason: task.result.unwrap_or_default(),
        },
        (None, status) => unreachable!("import task {} left the poll loop as {}", task_id, status),
    }
}
