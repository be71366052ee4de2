//! Schema - Attribute definitions for data sources and resources
//!
//! Every Files.com entity declares a schema mirroring the API fields. The
//! schema drives config validation, state population and the Terraform JSON
//! schema export.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::json;

use crate::value::{Attributes, Value};

/// Attribute type
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    Int,
    Bool,
    /// RFC 3339 timestamp carried as a string
    Timestamp,
    /// Arbitrary JSON
    Dynamic,
    List(Box<AttributeType>),
    Map(Box<AttributeType>),
}

impl AttributeType {
    pub fn list_of(inner: AttributeType) -> Self {
        AttributeType::List(Box::new(inner))
    }

    pub fn map_of(inner: AttributeType) -> Self {
        AttributeType::Map(Box::new(inner))
    }

    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (_, Value::Null | Value::Unknown) => Ok(()),
            (AttributeType::Dynamic, _) => Ok(()),
            (AttributeType::String | AttributeType::Timestamp, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Timestamp => "Timestamp".to_string(),
            AttributeType::Dynamic => "Dynamic".to_string(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
        }
    }

    /// Terraform type constraint in `providers schema -json` notation
    pub fn terraform_type(&self) -> serde_json::Value {
        match self {
            AttributeType::String | AttributeType::Timestamp => json!("string"),
            AttributeType::Int => json!("number"),
            AttributeType::Bool => json!("bool"),
            AttributeType::Dynamic => json!("dynamic"),
            AttributeType::List(inner) => json!(["list", inner.terraform_type()]),
            AttributeType::Map(inner) => json!(["map", inner.terraform_type()]),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid value '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("Attribute '{name}' is computed and cannot be set")]
    ComputedOnly { name: String },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },

    #[error("Attribute '{name}': {inner}")]
    AttributeError { name: String, inner: Box<TypeError> },
}

impl TypeError {
    /// Name of the top-level attribute the error refers to, if any
    pub fn attribute(&self) -> Option<&str> {
        match self {
            TypeError::MissingRequired { name }
            | TypeError::UnknownAttribute { name }
            | TypeError::ComputedOnly { name }
            | TypeError::AttributeError { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// How an attribute participates in config and state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
    /// Set by the user or filled in by the API
    OptionalComputed,
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub mode: AttributeMode,
    pub sensitive: bool,
    /// The API never returns this value (or only once); state keeps the
    /// last known value instead of clearing it.
    pub retained: bool,
    /// Changing this attribute destroys and recreates the resource
    pub requires_replace: bool,
    pub allowed_values: Option<Vec<String>>,
    pub description: Option<String>,
    /// API field name when it differs from the attribute name
    pub provider_name: Option<String>,
    /// Slash-delimited path; leading and trailing slashes are not significant
    pub path: bool,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            mode: AttributeMode::Optional,
            sensitive: false,
            retained: false,
            requires_replace: false,
            allowed_values: None,
            description: None,
            provider_name: None,
            path: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.mode = AttributeMode::Required;
        self
    }

    pub fn optional(mut self) -> Self {
        self.mode = AttributeMode::Optional;
        self
    }

    pub fn computed(mut self) -> Self {
        self.mode = match self.mode {
            AttributeMode::Optional | AttributeMode::OptionalComputed => {
                AttributeMode::OptionalComputed
            }
            _ => AttributeMode::Computed,
        };
        self
    }

    /// Computed-only attribute (cannot be configured)
    pub fn read_only(mut self) -> Self {
        self.mode = AttributeMode::Computed;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn retained(mut self) -> Self {
        self.retained = true;
        self
    }

    pub fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }

    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.allowed_values = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    pub fn path(mut self) -> Self {
        self.path = true;
        self
    }

    /// Canonical form of a configured value, as the API reports it back
    pub fn normalize(&self, value: &Value) -> Value {
        match value {
            Value::String(s) if self.path => Value::String(s.trim_matches('/').to_string()),
            other => other.clone(),
        }
    }

    /// Field name used on the wire
    pub fn api_name(&self) -> &str {
        self.provider_name.as_deref().unwrap_or(&self.name)
    }

    pub fn is_required(&self) -> bool {
        self.mode == AttributeMode::Required
    }

    pub fn is_computed(&self) -> bool {
        matches!(
            self.mode,
            AttributeMode::Computed | AttributeMode::OptionalComputed
        )
    }

    /// Whether the user may set this attribute in config
    pub fn is_configurable(&self) -> bool {
        self.mode != AttributeMode::Computed
    }

    /// Validate a single configured value
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        self.attr_type.validate(value)?;
        if let (Some(allowed), Value::String(s)) = (&self.allowed_values, value)
            && !allowed.iter().any(|a| a == s)
        {
            return Err(TypeError::InvalidEnumVariant {
                value: s.clone(),
                expected: allowed.clone(),
            });
        }
        Ok(())
    }

    fn to_terraform_json(&self) -> serde_json::Value {
        let mut attr = serde_json::Map::new();
        attr.insert("type".to_string(), self.attr_type.terraform_type());
        if let Some(desc) = &self.description {
            attr.insert("description".to_string(), json!(desc));
            attr.insert("description_kind".to_string(), json!("plain"));
        }
        match self.mode {
            AttributeMode::Required => {
                attr.insert("required".to_string(), json!(true));
            }
            AttributeMode::Optional => {
                attr.insert("optional".to_string(), json!(true));
            }
            AttributeMode::Computed => {
                attr.insert("computed".to_string(), json!(true));
            }
            AttributeMode::OptionalComputed => {
                attr.insert("optional".to_string(), json!(true));
                attr.insert("computed".to_string(), json!(true));
            }
        }
        if self.sensitive {
            attr.insert("sensitive".to_string(), json!(true));
        }
        serde_json::Value::Object(attr)
    }
}

/// Schema of a data source, resource or the provider itself
#[derive(Debug, Clone)]
pub struct Schema {
    pub type_name: String,
    pub version: i64,
    pub attributes: BTreeMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl Schema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            version: 0,
            attributes: BTreeMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.get(name)
    }

    /// Validate configured attributes, returning every problem found
    pub fn validate_config(&self, config: &Attributes) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        for (name, schema) in &self.attributes {
            if schema.is_required() && config.get(name).is_none_or(Value::is_null) {
                errors.push(TypeError::MissingRequired { name: name.clone() });
            }
        }

        for (name, value) in config {
            let Some(schema) = self.attributes.get(name) else {
                errors.push(TypeError::UnknownAttribute { name: name.clone() });
                continue;
            };
            if !schema.is_configurable() {
                if !value.is_null() {
                    errors.push(TypeError::ComputedOnly { name: name.clone() });
                }
                continue;
            }
            if let Err(e) = schema.validate(value) {
                errors.push(TypeError::AttributeError {
                    name: name.clone(),
                    inner: Box::new(e),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Schema block in `terraform providers schema -json` shape
    pub fn to_terraform_json(&self) -> serde_json::Value {
        let attributes: serde_json::Map<_, _> = self
            .attributes
            .iter()
            .map(|(name, attr)| (name.clone(), attr.to_terraform_json()))
            .collect();
        let mut block = serde_json::Map::new();
        block.insert("attributes".to_string(), serde_json::Value::Object(attributes));
        if let Some(desc) = &self.description {
            block.insert("description".to_string(), json!(desc));
        }
        block.insert("description_kind".to_string(), json!("plain"));
        json!({
            "version": self.version,
            "block": block,
        })
    }
}
