use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CustomFieldType {
    String,
    Url,
    Date,
    Boolean,
    Integer,
    Float,
    Monetary,
    #[serde(rename = "documentlink")]
    DocumentLink,
    Select,
}

impl Display for CustomFieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CustomFieldType::String => write!(f, "string"),
            CustomFieldType::Url => write!(f, "url"),
            CustomFieldType::Date => write!(f, "date"),
            CustomFieldType::Boolean => write!(f, "boolean"),
            CustomFieldType::Integer => write!(f, "integer"),
            CustomFieldType::Float => write!(f, "float"),
            CustomFieldType::Monetary => write!(f, "monetary"),
            CustomFieldType::DocumentLink => write!(f, "documentlink"),
            CustomFieldType::Select => write!(f, "select"),
        }
    }
}

impl FromStr for CustomFieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(CustomFieldType::String),
            "url" => Ok(CustomFieldType::Url),
            "date" => Ok(CustomFieldType::Date),
            "boolean" => Ok(CustomFieldType::Boolean),
            "integer" => Ok(CustomFieldType::Integer),
            "float" => Ok(CustomFieldType::Float),
            "monetary" => Ok(CustomFieldType::Monetary),
            "documentlink" => Ok(CustomFieldType::DocumentLink),
            "select" => Ok(CustomFieldType::Select),
            _ => Err(format!("Invalid custom field type: {}", s)),
        }
    }
}

/// User-defined typed attribute attachable to documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: u32,
    pub name: String,
    pub data_type: CustomFieldType,
    /// Type specific settings, e.g. the option list of a select field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomFieldCreation {
    pub name: String,
    pub data_type: CustomFieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<serde_json::Value>,
}

impl CustomFieldCreation {
    pub fn new(name: impl Into<String>, data_type: CustomFieldType) -> Self {
        Self {
            name: name.into(),
            data_type,
            extra_data: None,
        }
    }

    /// A select field with the given options, in index order.
    pub fn select<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        Self {
            name: name.into(),
            data_type: CustomFieldType::Select,
            extra_data: Some(serde_json::json!({ "select_options": options })),
        }
    }
}

/// Raw wire shape of a custom field value attached to a document.
///
/// The JSON value is only interpreted through the
/// [`CustomFieldRegistry`](crate::CustomFieldRegistry), which knows each field's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldValue {
    pub field: u32,
    #[serde(default)]
    pub value: serde_json::Value,
}
