//! Registry of the custom field definitions known to the server

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::value::{CustomFieldData, TypedCustomField};
use crate::error::CustomFieldError;
use crate::models::{CustomField, CustomFieldValue};

/// Cache of custom field definitions keyed by field id.
///
/// Cloning shares the underlying map, so every client built from the same
/// facade sees fields registered by the others.
#[derive(Clone)]
pub struct CustomFieldRegistry {
    fields: Arc<RwLock<HashMap<u32, CustomField>>>,
}

impl CustomFieldRegistry {
    pub fn new() -> Self {
        Self {
            fields: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn is_populated(&self) -> bool {
        !self.fields.read().await.is_empty()
    }

    pub async fn len(&self) -> usize {
        self.fields.read().await.len()
    }

    /// Register a field, replacing any previous definition with the same id
    pub async fn insert(&self, field: CustomField) {
        self.fields.write().await.insert(field.id, field);
    }

    pub async fn extend(&self, fields: impl IntoIterator<Item = CustomField>) {
        let mut map = self.fields.write().await;
        for field in fields {
            map.insert(field.id, field);
        }
    }

    pub async fn get(&self, id: u32) -> Option<CustomField> {
        self.fields.read().await.get(&id).cloned()
    }

    /// Look a field up by its exact name
    pub async fn find_by_name(&self, name: &str) -> Option<CustomField> {
        self.fields
            .read()
            .await
            .values()
            .find(|field| field.name == name)
            .cloned()
    }

    /// All known fields, ordered by id
    pub async fn list(&self) -> Vec<CustomField> {
        let mut fields: Vec<CustomField> = self.fields.read().await.values().cloned().collect();
        fields.sort_by_key(|field| field.id);
        fields
    }

    pub async fn clear(&self) {
        self.fields.write().await.clear();
    }

    /// Resolve raw document values into typed ones, keeping their order.
    pub async fn decode(
        &self,
        values: &[CustomFieldValue],
    ) -> Result<Vec<TypedCustomField>, CustomFieldError> {
        let fields = self.fields.read().await;

        values
            .iter()
            .map(|raw| {
                let field = fields
                    .get(&raw.field)
                    .ok_or(CustomFieldError::UnknownField(raw.field))?;
                let data = CustomFieldData::decode(field, &raw.value)?;
                Ok(TypedCustomField::new(field, data))
            })
            .collect()
    }

    /// Turn typed values back into their wire form. Unset values are sent as `null`.
    pub async fn encode(
        &self,
        values: &[TypedCustomField],
    ) -> Result<Vec<CustomFieldValue>, CustomFieldError> {
        let fields = self.fields.read().await;

        values
            .iter()
            .map(|typed| {
                let field = fields
                    .get(&typed.field)
                    .ok_or(CustomFieldError::UnknownField(typed.field))?;
                let value = match &typed.value {
                    Some(data) => data.encode(field)?,
                    None => serde_json::Value::Null,
                };
                Ok(CustomFieldValue {
                    field: field.id,
                    value,
                })
            })
            .collect()
    }
}

impl Default for CustomFieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}
