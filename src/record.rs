use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;

/// Fallback values written when a request arrives without a payload.
const FALLBACK_YEAR: i64 = 2012;
const FALLBACK_TITLE: &str = "The Amazing Spider-Man 2";

/// Incoming payload for insert requests.
///
/// Fields are kept as raw JSON values so that callers may send `year` and
/// `id` either as numbers or as numeric strings; coercion happens in
/// [`Record::from_payload`] and any mismatch becomes a validation error.
#[derive(Debug, Deserialize)]
pub struct RecordPayload {
    pub year: Value,
    pub title: Value,
    pub id: Value,
}

/// Representation of a record persisted in DynamoDB.
///
/// `id` is the partition key; writing an existing id overwrites the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub year: i64,
    pub title: String,
}

impl Record {
    /// Build a record from a decoded payload, coercing field types.
    pub fn from_payload(payload: RecordPayload) -> Result<Self, AppError> {
        Ok(Self {
            id: coerce_string("id", &payload.id)?,
            year: coerce_year(&payload.year)?,
            title: coerce_title(&payload.title)?,
        })
    }

    /// The record written when a request carries no body.
    pub fn fallback() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            year: FALLBACK_YEAR,
            title: FALLBACK_TITLE.to_string(),
        }
    }

    /// Convert the record into a DynamoDB attribute map.
    ///
    /// `year` travels as a numeric attribute, `id` and `title` as strings.
    pub fn into_item(self) -> HashMap<String, AttributeValue> {
        let mut map = HashMap::new();
        map.insert("id".into(), AttributeValue::S(self.id));
        map.insert("year".into(), AttributeValue::N(self.year.to_string()));
        map.insert("title".into(), AttributeValue::S(self.title));
        map
    }
}

fn coerce_year(value: &Value) -> Result<i64, AppError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| AppError::Validation(format!("`year` is not an integer: {n}"))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::Validation(format!("`year` is not numeric: `{s}`"))),
        other => Err(AppError::Validation(format!(
            "`year` must be a number or numeric string, got {other}"
        ))),
    }
}

fn coerce_title(value: &Value) -> Result<String, AppError> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        Value::String(_) => Err(AppError::Validation("`title` must not be empty".into())),
        other => Err(AppError::Validation(format!(
            "`title` must be a string, got {other}"
        ))),
    }
}

fn coerce_string(field: &str, value: &Value) -> Result<String, AppError> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        Value::String(_) => Err(AppError::Validation(format!(
            "`{field}` must not be empty"
        ))),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(AppError::Validation(format!(
            "`{field}` must be a string or number, got {other}"
        ))),
    }
}
