use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Started,
    Success,
    Failure,
}

impl TaskStatus {
    /// Success and Failure are terminal; the server never moves a task out of them.
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Failure)
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TaskStatus::Pending => write!(f, "Pending"),
            TaskStatus::Started => write!(f, "Started"),
            TaskStatus::Success => write!(f, "Success"),
            TaskStatus::Failure => write!(f, "Failure"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(TaskStatus::Pending),
            "STARTED" => Ok(TaskStatus::Started),
            "SUCCESS" => Ok(TaskStatus::Success),
            "FAILURE" => Ok(TaskStatus::Failure),
            _ => Err(format!("Invalid task status: {}", s)),
        }
    }
}

/// Server-side asynchronous job tracking a document import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperlessTask {
    pub id: u32,
    pub task_id: Uuid,
    #[serde(default)]
    pub task_file_name: Option<String>,
    #[serde(default)]
    pub date_created: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub date_done: Option<DateTime<FixedOffset>>,
    #[serde(default, rename = "type")]
    pub task_type: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub acknowledged: bool,
    /// Only set for finished imports. Older servers send it as a string.
    #[serde(default, deserialize_with = "deserialize_document_id")]
    pub related_document: Option<u32>,
}

fn deserialize_document_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u32),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawId::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
