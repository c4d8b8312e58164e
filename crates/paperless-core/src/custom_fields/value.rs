//! Typed custom field values and their wire encoding.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::error::CustomFieldError;
use crate::models::{CustomField, CustomFieldType};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Selected option of a select field.
///
/// Servers before 2.15 identify options by their index, newer servers by an option id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOption {
    Index(u32),
    Id(String),
}

/// A custom field value interpreted according to its field's data type.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomFieldData {
    String(String),
    Url(String),
    Date(NaiveDate),
    Boolean(bool),
    Integer(i64),
    Float(f64),
    /// `currency` is the ISO 4217 prefix the server stores in front of the amount, if any.
    Monetary {
        currency: Option<String>,
        amount: Decimal,
    },
    DocumentLink(Vec<u32>),
    Select(SelectOption),
}

impl CustomFieldData {
    pub fn data_type(&self) -> CustomFieldType {
        match self {
            CustomFieldData::String(_) => CustomFieldType::String,
            CustomFieldData::Url(_) => CustomFieldType::Url,
            CustomFieldData::Date(_) => CustomFieldType::Date,
            CustomFieldData::Boolean(_) => CustomFieldType::Boolean,
            CustomFieldData::Integer(_) => CustomFieldType::Integer,
            CustomFieldData::Float(_) => CustomFieldType::Float,
            CustomFieldData::Monetary { .. } => CustomFieldType::Monetary,
            CustomFieldData::DocumentLink(_) => CustomFieldType::DocumentLink,
            CustomFieldData::Select(_) => CustomFieldType::Select,
        }
    }

    /// Interpret a raw wire value for `field`. JSON `null` means the value is unset.
    pub fn decode(field: &CustomField, value: &Value) -> Result<Option<Self>, CustomFieldError> {
        let invalid = || CustomFieldError::InvalidValue {
            field: field.id,
            data_type: field.data_type,
            value: value.clone(),
        };

        if value.is_null() {
            return Ok(None);
        }

        let data = match (field.data_type, value) {
            (CustomFieldType::String, Value::String(text)) => CustomFieldData::String(text.clone()),
            (CustomFieldType::Url, Value::String(text)) => CustomFieldData::Url(text.clone()),
            (CustomFieldType::Date, Value::String(text)) => CustomFieldData::Date(
                NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid())?,
            ),
            (CustomFieldType::Boolean, Value::Bool(flag)) => CustomFieldData::Boolean(*flag),
            (CustomFieldType::Integer, Value::Number(number)) => {
                CustomFieldData::Integer(number.as_i64().ok_or_else(invalid)?)
            }
            (CustomFieldType::Float, Value::Number(number)) => {
                CustomFieldData::Float(number.as_f64().ok_or_else(invalid)?)
            }
            (CustomFieldType::Monetary, Value::Number(number)) => CustomFieldData::Monetary {
                currency: None,
                amount: parse_amount(&number.to_string()).ok_or_else(invalid)?,
            },
            (CustomFieldType::Monetary, Value::String(text)) if text.is_empty() => return Ok(None),
            (CustomFieldType::Monetary, Value::String(text)) => {
                let split = text
                    .find(|c: char| !c.is_ascii_alphabetic())
                    .unwrap_or(text.len());
                let (currency, amount) = text.split_at(split);
                CustomFieldData::Monetary {
                    currency: (!currency.is_empty()).then(|| currency.to_string()),
                    amount: parse_amount(amount).ok_or_else(invalid)?,
                }
            }
            (CustomFieldType::DocumentLink, Value::Array(items)) => CustomFieldData::DocumentLink(
                items
                    .iter()
                    .map(|item| item.as_u64().and_then(|id| u32::try_from(id).ok()))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(invalid)?,
            ),
            (CustomFieldType::Select, Value::Number(number)) => CustomFieldData::Select(
                SelectOption::Index(
                    number
                        .as_u64()
                        .and_then(|index| u32::try_from(index).ok())
                        .ok_or_else(invalid)?,
                ),
            ),
            (CustomFieldType::Select, Value::String(id)) => {
                CustomFieldData::Select(SelectOption::Id(id.clone()))
            }
            _ => return Err(invalid()),
        };

        Ok(Some(data))
    }

    /// Wire value of this data for `field`, which must be of the same data type.
    pub fn encode(&self, field: &CustomField) -> Result<Value, CustomFieldError> {
        if self.data_type() != field.data_type {
            return Err(CustomFieldError::TypeMismatch {
                field: field.id,
                expected: field.data_type,
                actual: self.data_type(),
            });
        }

        let value = match self {
            CustomFieldData::String(text) | CustomFieldData::Url(text) => {
                Value::String(text.clone())
            }
            CustomFieldData::Date(date) => Value::String(date.format(DATE_FORMAT).to_string()),
            CustomFieldData::Boolean(flag) => Value::Bool(*flag),
            CustomFieldData::Integer(number) => Value::from(*number),
            CustomFieldData::Float(number) => serde_json::Number::from_f64(*number)
                .map(Value::Number)
                .ok_or_else(|| CustomFieldError::InvalidValue {
                    field: field.id,
                    data_type: field.data_type,
                    value: Value::String(number.to_string()),
                })?,
            CustomFieldData::Monetary {
                currency: Some(currency),
                amount,
            } => Value::String(format!("{}{}", currency, amount)),
            CustomFieldData::Monetary {
                currency: None,
                amount,
            } => serde_json::from_str(&amount.to_string()).map_err(|_| {
                CustomFieldError::InvalidValue {
                    field: field.id,
                    data_type: field.data_type,
                    value: Value::String(amount.to_string()),
                }
            })?,
            CustomFieldData::DocumentLink(ids) => Value::from(ids.clone()),
            CustomFieldData::Select(SelectOption::Index(index)) => Value::from(*index),
            CustomFieldData::Select(SelectOption::Id(id)) => Value::String(id.clone()),
        };

        Ok(value)
    }
}

fn parse_amount(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// One decoded custom field value of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedCustomField {
    pub field: u32,
    pub name: String,
    /// `None` when the field is attached to the document without a value.
    pub value: Option<CustomFieldData>,
}

impl TypedCustomField {
    pub fn new(field: &CustomField, value: Option<CustomFieldData>) -> Self {
        Self {
            field: field.id,
            name: field.name.clone(),
            value,
        }
    }
}
