//! JSON and percent-encoding of protocol bodies.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::string::FromUtf8Error;

use rose_dto::{DtoError, DtoResult, FlatRecord, RawRecord};
use rose_model::EntityDirectory;
use rose_types::EntityId;
use serde_json::Value;

/// Encodes request bodies and decodes response bodies.
///
/// Constructed explicitly and handed to the client; there is no shared
/// process-wide instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    _private: (),
}

impl JsonCodec {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Percent encoding ─────────────────────────────────────────

    /// Percent-encodes a request body.
    pub fn encode_body(&self, text: &str) -> String {
        urlencoding::encode(text).into_owned()
    }

    /// Percent-decodes a response body. `+` decodes to a space.
    pub fn decode_body(&self, body: &str) -> Result<String, FromUtf8Error> {
        let body = if body.contains('+') {
            Cow::Owned(body.replace('+', " "))
        } else {
            Cow::Borrowed(body)
        };
        urlencoding::decode(&body).map(Cow::into_owned)
    }

    // ── Records ──────────────────────────────────────────────────

    pub fn encode_record(&self, record: &FlatRecord) -> DtoResult<String> {
        Ok(serde_json::to_string(record)?)
    }

    /// Decodes a JSON array of flat maps, validating every record.
    pub fn decode_records(
        &self,
        json: &str,
        directory: &dyn EntityDirectory,
    ) -> DtoResult<Vec<FlatRecord>> {
        let raws: Vec<RawRecord> = serde_json::from_str(json)?;
        raws.into_iter()
            .map(|raw| FlatRecord::decode(raw, directory))
            .collect()
    }

    /// Decodes a single JSON flat map.
    pub fn decode_record(
        &self,
        json: &str,
        directory: &dyn EntityDirectory,
    ) -> DtoResult<FlatRecord> {
        let raw: RawRecord = serde_json::from_str(json)?;
        FlatRecord::decode(raw, directory)
    }

    // ── Scalars ──────────────────────────────────────────────────

    /// Decodes a JSON array of ids. Elements may be strings or numbers.
    pub fn decode_ids(&self, json: &str) -> DtoResult<Vec<EntityId>> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        values
            .into_iter()
            .map(|value| {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                EntityId::parse(&text).map_err(|_| DtoError::MalformedValue {
                    key: "id".to_string(),
                    value: text,
                })
            })
            .collect()
    }

    /// Joins ids into the comma-separated path form (`3,5,8`).
    pub fn encode_ids(&self, ids: &[EntityId]) -> String {
        ids.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parses the comma-separated path form back into ids.
    pub fn decode_id_list(&self, text: &str) -> DtoResult<Vec<EntityId>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        text.split(',')
            .map(|part| {
                EntityId::parse(part).map_err(|_| DtoError::MalformedValue {
                    key: "id".to_string(),
                    value: part.to_string(),
                })
            })
            .collect()
    }

    /// Decodes a bare integer body.
    pub fn decode_count(&self, text: &str) -> DtoResult<u64> {
        text.trim().parse().map_err(|_| DtoError::MalformedValue {
            key: "count".to_string(),
            value: text.to_string(),
        })
    }

    /// Decodes a JSON object into a string-to-string map.
    pub fn decode_status(&self, json: &str) -> DtoResult<BTreeMap<String, String>> {
        let map: serde_json::Map<String, Value> = serde_json::from_str(json)?;
        Ok(map
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect())
    }
}
