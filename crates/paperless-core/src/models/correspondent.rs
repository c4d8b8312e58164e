use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::matching::MatchingAlgorithm;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correspondent {
    pub id: u32,
    pub slug: String,
    pub name: String,
    #[serde(rename = "match", default)]
    pub matching_pattern: String,
    pub matching_algorithm: MatchingAlgorithm,
    pub is_insensitive: bool,
    #[serde(default)]
    pub document_count: u32,
    #[serde(default)]
    pub last_correspondence: Option<DateTime<FixedOffset>>,
}

/// Information needed to create a new correspondent. Unset fields use server defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrespondentCreation {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub matching_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_algorithm: Option<MatchingAlgorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_insensitive: Option<bool>,
}

impl CorrespondentCreation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
