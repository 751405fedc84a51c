use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record returned by the catalog API. Keys are whatever the API sends,
/// kept in the order they arrived.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogRecord(Map<String, Value>);

impl CatalogRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(Error::catalog(format!(
                "expected an object record, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The Steam application id, accepted as a positive number or a numeric string.
    /// Zero, empty and missing ids all mean "no id".
    pub fn appid(&self) -> Option<u64> {
        match self.0.get("appid")? {
            Value::Number(n) => n.as_u64().filter(|id| *id > 0),
            Value::String(s) => s.trim().parse::<u64>().ok().filter(|id| *id > 0),
            _ => None,
        }
    }

    /// Flattens `tags` from `{"Action": 120, "Indie": 80}` into `"Action,Indie"`.
    /// A missing or empty mapping becomes an empty string.
    pub fn normalize_tags(&mut self) -> Result<()> {
        let joined = match self.0.get("tags") {
            None | Some(Value::Null) => String::new(),
            Some(Value::Object(tags)) => tags.keys().cloned().collect::<Vec<_>>().join(","),
            // SteamSpy sends `[]` instead of `{}` for games without tags.
            Some(Value::Array(items)) if items.is_empty() => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(Error::catalog(format!(
                    "tags must be a mapping, got {}",
                    json_kind(other)
                )));
            }
        };
        self.0.insert("tags".to_string(), Value::String(joined));
        Ok(())
    }
}

/// Parses a listing page: a mapping from opaque keys to records.
/// An empty mapping, an empty array or `null` all mean the page is empty.
pub fn parse_listing_page(body: Value) -> Result<Vec<CatalogRecord>> {
    match body {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) if items.is_empty() => Ok(Vec::new()),
        Value::Object(entries) => entries
            .into_iter()
            .map(|(_, record)| CatalogRecord::from_value(record))
            .collect(),
        other => Err(Error::catalog(format!(
            "expected a mapping of records, got {}",
            json_kind(&other)
        ))),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
