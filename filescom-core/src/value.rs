//! Value - Attribute values held in state, config and plan
//!
//! Also hosts the conversions used when copying API responses into state:
//! timestamps are normalized to RFC 3339 text and free-form JSON is kept as
//! a dynamic value.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Attributes of a single data source or resource instance
pub type Attributes = BTreeMap<String, Value>;

/// Attribute value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    /// Not known until apply (computed attributes during planning)
    Unknown,
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// Arbitrary JSON (Terraform `dynamic`)
    Dynamic(serde_json::Value),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    /// Neither null nor unknown
    pub fn is_known(&self) -> bool {
        !self.is_null() && !self.is_unknown()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub(crate) fn type_name(&self) -> String {
        match self {
            Value::Null => "Null".to_string(),
            Value::Unknown => "Unknown".to_string(),
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Map(_) => "Map".to_string(),
            Value::Dynamic(_) => "Dynamic".to_string(),
        }
    }

    /// Render the value as the text used in ids and diagnostics
    pub fn display_text(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Int(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::Unknown => "(known after apply)".to_string(),
            other => other.to_json().to_string(),
        }
    }

    /// Convert to JSON. Unknown values have no JSON form and map to null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null | Value::Unknown => serde_json::Value::Null,
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(n) => serde_json::Value::Number((*n).into()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => {
                let obj: serde_json::Map<_, _> = map
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect();
                serde_json::Value::Object(obj)
            }
            Value::Dynamic(json) => json.clone(),
        }
    }

    /// Untyped conversion from JSON, used when no schema is at hand
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Dynamic(json.clone()),
            },
            serde_json::Value::Array(items) => Value::List(items.iter().map(Value::from_json).collect()),
            serde_json::Value::Object(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Convert an API timestamp into its state representation.
///
/// Parsable timestamps are normalized to UTC with second precision
/// (`2024-01-02T03:04:05Z`). Text that does not parse is kept as-is.
pub fn time_to_string(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::String(s) if s.is_empty() => Value::Null,
        serde_json::Value::String(s) => match parse_timestamp(s) {
            Some(t) => Value::String(t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => Value::String(s.clone()),
        },
        serde_json::Value::Null => Value::Null,
        other => Value::String(other.to_string()),
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    // Zone-less timestamps are treated as UTC
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|t| t.and_utc())
}

/// Wrap arbitrary JSON as a dynamic value
pub fn to_dynamic(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        other => Value::Dynamic(other.clone()),
    }
}

/// Convert a JSON object into attributes without schema guidance
pub fn attributes_from_json(json: &serde_json::Value) -> Attributes {
    match json {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), Value::from_json(v)))
            .collect(),
        _ => Attributes::new(),
    }
}

/// Convert attributes into a JSON object
pub fn attributes_to_json(attributes: &Attributes) -> serde_json::Value {
    serde_json::Value::Object(
        attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}
