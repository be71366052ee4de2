//! Conversion between API documents and attribute values
//!
//! `populate` copies a response object into state following the schema, and
//! `build_body` turns a plan back into the request document.

use filescom_core::schema::{AttributeType, Schema};
use filescom_core::value::{time_to_string, to_dynamic};
use filescom_core::{Attributes, Value};
use serde_json::Value as Json;

/// Copy the fields of an API response into state.
///
/// Attributes the response omits become null, except retained ones which
/// keep their known value from `prior` (the plan on create and update, the
/// previous state on read).
pub fn populate(schema: &Schema, response: &Json, prior: &Attributes) -> Attributes {
    let mut attributes = Attributes::new();
    for (name, attr) in &schema.attributes {
        let field = response.get(attr.api_name()).unwrap_or(&Json::Null);
        let mut value = json_to_value(&attr.attr_type, field);

        if attr.retained
            && value.is_null()
            && let Some(kept) = prior.get(name).filter(|v| v.is_known())
        {
            value = kept.clone();
        }
        attributes.insert(name.clone(), value);
    }
    attributes
}

/// Convert one JSON field according to its attribute type
pub fn json_to_value(attr_type: &AttributeType, json: &Json) -> Value {
    match (attr_type, json) {
        (AttributeType::Timestamp, _) => time_to_string(json),
        (AttributeType::Dynamic, _) => to_dynamic(json),
        (_, Json::Null) => Value::Null,

        (AttributeType::String, Json::String(s)) => Value::String(s.clone()),
        (AttributeType::String, Json::Number(n)) => Value::String(n.to_string()),
        (AttributeType::String, Json::Bool(b)) => Value::String(b.to_string()),
        (AttributeType::String, other) => Value::String(other.to_string()),

        (AttributeType::Int, Json::Number(n)) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                    Value::Int(f as i64)
                }
                _ => mismatch(attr_type, json),
            },
        },
        (AttributeType::Int, Json::String(s)) => match s.trim().parse::<i64>() {
            Ok(i) => Value::Int(i),
            Err(_) => mismatch(attr_type, json),
        },

        (AttributeType::Bool, Json::Bool(b)) => Value::Bool(*b),
        (AttributeType::Bool, Json::String(s)) => match s.as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => mismatch(attr_type, json),
        },

        (AttributeType::List(inner), Json::Array(items)) => Value::List(
            items
                .iter()
                .map(|item| json_to_value(inner, item))
                .filter(|v| !v.is_null())
                .collect(),
        ),
        (AttributeType::Map(inner), Json::Object(map)) => Value::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_value(inner, v)))
                .collect(),
        ),

        _ => mismatch(attr_type, json),
    }
}

fn mismatch(attr_type: &AttributeType, json: &Json) -> Value {
    log::debug!("ignoring {} value for {} attribute", json, attr_type);
    Value::Null
}

/// Convert a planned value into its JSON request form. Null and unknown
/// values have no request form.
pub fn value_to_json(attr_type: &AttributeType, value: &Value) -> Option<Json> {
    match value {
        Value::Null | Value::Unknown => None,
        Value::List(items) => {
            let inner = match attr_type {
                AttributeType::List(inner) => inner.as_ref(),
                other => other,
            };
            Some(Json::Array(
                items
                    .iter()
                    .filter_map(|v| value_to_json(inner, v))
                    .collect(),
            ))
        }
        Value::Map(map) => {
            let inner = match attr_type {
                AttributeType::Map(inner) => inner.as_ref(),
                other => other,
            };
            Some(Json::Object(
                map.iter()
                    .filter_map(|(k, v)| value_to_json(inner, v).map(|j| (k.clone(), j)))
                    .collect(),
            ))
        }
        other => Some(other.to_json()),
    }
}

/// Build a create or update request body from a plan.
///
/// Only configurable attributes with a known value are sent. `skip` names
/// attributes carried in the URL instead of the body. With `prior` set the
/// body is for an update: attributes that force replacement are left out, as
/// are retained values that did not change.
pub fn build_body(
    schema: &Schema,
    plan: &Attributes,
    prior: Option<&Attributes>,
    skip: Option<&str>,
) -> Json {
    let mut body = serde_json::Map::new();
    for (name, attr) in &schema.attributes {
        if !attr.is_configurable() || Some(name.as_str()) == skip {
            continue;
        }
        let Some(value) = plan.get(name) else {
            continue;
        };
        if let Some(prior) = prior {
            if attr.requires_replace {
                continue;
            }
            if attr.retained && prior.get(name) == Some(value) {
                continue;
            }
        }
        if let Some(json) = value_to_json(&attr.attr_type, value) {
            body.insert(attr.api_name().to_string(), json);
        }
    }
    Json::Object(body)
}
