//! Submitted responses and the raw input they are built from

use super::{new_id, FieldType, Form};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::collections::HashMap;

/// A single answer: one string, or a list for checkbox fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ResponseValue {
    /// Whether this answer selects `option`
    pub fn contains(&self, option: &str) -> bool {
        match self {
            Self::Single(s) => s == option,
            Self::Multiple(values) => values.iter().any(|v| v == option),
        }
    }

    /// Text used in tables; list values are joined with ", "
    pub fn display(&self) -> String {
        match self {
            Self::Single(s) => s.clone(),
            Self::Multiple(values) => values.join(", "),
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            Self::Multiple(_) => None,
        }
    }
}

/// One submission's answers, keyed by field id in form field order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: String,
    pub form_id: String,
    pub data: IndexMap<String, ResponseValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl FormResponse {
    pub fn value(&self, field_id: &str) -> Option<&ResponseValue> {
        self.data.get(field_id)
    }
}

/// Multi-valued submission input, keyed by field id
///
/// Mirrors what an HTML form posts: a key may appear any number of times,
/// and a key that was never appended is simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    values: HashMap<String, Vec<String>>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one value under `key`, keeping earlier values
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// First value under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Every value under `key`, in append order
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<K, V> FromIterator<(K, V)> for RawInput
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut input = Self::new();
        for (k, v) in iter {
            input.append(k, v);
        }
        input
    }
}

/// Build a response for `form` from raw submission input.
///
/// Every field of the form gets an entry: checkbox fields collect all
/// values under their id (possibly none), other fields take the first
/// value or an empty string.
pub fn build_response(form: &Form, input: &RawInput) -> FormResponse {
    let data = form
        .fields
        .iter()
        .map(|field| {
            let value = match field.field_type {
                FieldType::Checkbox => ResponseValue::Multiple(input.get_all(&field.id).to_vec()),
                _ => ResponseValue::Single(input.get(&field.id).unwrap_or_default().to_string()),
            };
            (field.id.clone(), value)
        })
        .collect();

    FormResponse {
        id: new_id(),
        form_id: form.id.clone(),
        data,
        submitted_at: Some(Utc::now()),
    }
}
