//! Request body decoding

use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

/// A webhook body as a flat key/value map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPayload(Map<String, Value>);

impl RawPayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Decode a request body according to its content type.
    ///
    /// JSON bodies must be objects. Form and multipart bodies keep the last
    /// value of a repeated key; multipart file parts are skipped. Without a
    /// recognized content type the body is tried as JSON first, then as a
    /// url-encoded form.
    pub async fn decode(content_type: Option<&str>, body: &[u8]) -> Result<Self> {
        let content_type = content_type.unwrap_or_default();
        let lowered = content_type.to_ascii_lowercase();

        if lowered.contains("application/json") {
            Self::from_json(body)
        } else if lowered.contains("application/x-www-form-urlencoded") {
            Ok(Self::from_form(body))
        } else if lowered.contains("multipart/form-data") {
            Self::from_multipart(content_type, body).await
        } else {
            Self::from_json(body).or_else(|_| Ok(Self::from_form(body)))
        }
    }

    async fn from_multipart(content_type: &str, body: &[u8]) -> Result<Self> {
        let boundary = multer::parse_boundary(content_type)
            .map_err(|e| KanbanError::invalid_payload(format!("invalid multipart content type: {e}")))?;
        let mut multipart = multer::Multipart::with_reader(body, boundary);

        let mut fields = Map::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| KanbanError::invalid_payload(format!("invalid multipart field: {e}")))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            if field.file_name().is_some() {
                trace!(field = %name, "skipping multipart file part");
                continue;
            }
            let text = field.text().await.map_err(|e| {
                KanbanError::invalid_payload(format!("invalid multipart field text: {e}"))
            })?;
            fields.insert(name, Value::String(text));
        }
        Ok(Self(fields))
    }

    fn from_json(body: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Ok(Self(fields)),
            Ok(other) => Err(KanbanError::invalid_payload(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(KanbanError::invalid_payload(format!("malformed JSON: {e}"))),
        }
    }

    fn from_form(body: &[u8]) -> Self {
        Self(
            url::form_urlencoded::parse(body)
                .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
                .collect(),
        )
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<Map<String, Value>> for RawPayload {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
