//! Common types and utilities for the Compose API

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// HAL envelope used by Compose list endpoints: `{"_embedded": {...}}`
#[derive(Debug, Deserialize)]
pub struct Embedded<T> {
    #[serde(rename = "_embedded")]
    pub embedded: T,
}

/// Compose reports errors either as a flat list or keyed by field.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default, deserialize_with = "deserialize_errors")]
    pub errors: Option<ErrorPayload>,
}

#[derive(Debug, Clone)]
pub enum ErrorPayload {
    Messages(Vec<String>),
    Fields(HashMap<String, Vec<String>>),
}

#[derive(Debug, thiserror::Error)]
#[error("API error details: errors={errors:?}, field_errors={field_errors:?}")]
pub struct ApiErrorDetails {
    pub errors: Option<Vec<String>>,
    pub field_errors: Option<HashMap<String, Vec<String>>>,
}

impl From<ErrorPayload> for ApiErrorDetails {
    fn from(payload: ErrorPayload) -> Self {
        match payload {
            ErrorPayload::Messages(errors) => Self {
                errors: Some(errors),
                field_errors: None,
            },
            ErrorPayload::Fields(fields) => Self {
                errors: None,
                field_errors: Some(fields),
            },
        }
    }
}

fn deserialize_errors<'de, D>(deserializer: D) -> Result<Option<ErrorPayload>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
        Fields(HashMap<String, StringOrMany>),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::One(message) => ErrorPayload::Messages(vec![message]),
        Raw::Many(messages) => ErrorPayload::Messages(messages),
        Raw::Fields(fields) => ErrorPayload::Fields(
            fields
                .into_iter()
                .map(|(k, v)| match v {
                    StringOrMany::One(s) => (k, vec![s]),
                    StringOrMany::Many(m) => (k, m),
                })
                .collect(),
        ),
    }))
}

/// Percent-encode a single path segment; deployment ids come straight from user config.
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
