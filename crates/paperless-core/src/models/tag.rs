use serde::{Deserialize, Serialize};

use super::matching::MatchingAlgorithm;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u32,
    pub slug: String,
    pub name: String,
    /// Hex colour such as `#a6cee3`.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(rename = "match", default)]
    pub matching_pattern: String,
    pub matching_algorithm: MatchingAlgorithm,
    pub is_insensitive: bool,
    #[serde(default)]
    pub is_inbox_tag: bool,
    #[serde(default)]
    pub document_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagCreation {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub matching_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_algorithm: Option<MatchingAlgorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_insensitive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_inbox_tag: Option<bool>,
}

impl TagCreation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_tag_with_defaults() {
        let tag: Tag = serde_json::from_value(json!({
            "id": 2,
            "slug": "receipt",
            "name": "Receipt",
            "color": "#a6cee3",
            "matching_algorithm": 6,
            "is_insensitive": true
        }))
        .unwrap();

        assert_eq!(tag.color.as_deref(), Some("#a6cee3"));
        assert_eq!(tag.matching_algorithm, MatchingAlgorithm::Automatic);
        assert!(!tag.is_inbox_tag);
        assert_eq!(tag.matching_pattern, "");
    }

    #[test]
    fn test_creation_serializes_inbox_flag() {
        let creation = TagCreation {
            is_inbox_tag: Some(true),
            ..TagCreation::new("Inbox")
        };
        assert_eq!(
            serde_json::to_value(&creation).unwrap(),
            json!({ "name": "Inbox", "is_inbox_tag": true })
        );
    }
}
