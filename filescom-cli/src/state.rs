//! Local state file
//!
//! Resource instances are stored in a JSON file (default:
//! filescom.state.json) keyed by `<type>.<name>`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use filescom_core::schema::Schema;
use filescom_core::value::attributes_to_json;
use filescom_core::{Attributes, Value};
use filescom_provider::populate::json_to_value;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STATE_FILE: &str = "filescom.state.json";
const STATE_VERSION: u32 = 1;

/// One managed instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceState {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub attributes: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateFile {
    pub version: u32,
    /// Incremented on every write
    pub serial: u64,
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceState>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            serial: 0,
            resources: BTreeMap::new(),
        }
    }
}

impl StateFile {
    pub fn key(resource_type: &str, name: &str) -> String {
        format!("{}.{}", resource_type, name)
    }

    /// Attributes of a stored instance, typed by `schema`
    pub fn get(&self, key: &str, schema: &Schema) -> Option<Attributes> {
        self.resources
            .get(key)
            .map(|r| attributes_from_document(schema, &r.attributes))
    }

    pub fn put(&mut self, key: String, resource_type: &str, attributes: &Attributes) {
        self.resources.insert(
            key,
            ResourceState {
                resource_type: resource_type.to_string(),
                attributes: attributes_to_json(attributes),
            },
        );
    }

    pub fn remove(&mut self, key: &str) -> Option<ResourceState> {
        self.resources.remove(key)
    }
}

/// Reads and writes the state file
pub struct LocalState {
    path: PathBuf,
}

impl LocalState {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state, or an empty one when the file does not exist yet
    pub fn load(&self) -> Result<StateFile, String> {
        if !self.path.exists() {
            return Ok(StateFile::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read state file {}: {}", self.path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse state file {}: {}", self.path.display(), e))
    }

    pub fn save(&self, state: &mut StateFile) -> Result<(), String> {
        state.serial += 1;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        let content = serde_json::to_string_pretty(state)
            .map_err(|e| format!("Failed to serialize state: {}", e))?;
        std::fs::write(&self.path, content)
            .map_err(|e| format!("Failed to write state file {}: {}", self.path.display(), e))
    }
}

/// Convert a JSON document keyed by attribute name (state or config file)
/// into attributes. Unknown keys and mistyped values are kept untyped so
/// that validation can report them.
pub fn attributes_from_document(schema: &Schema, document: &serde_json::Value) -> Attributes {
    let mut attributes = Attributes::new();
    let Some(object) = document.as_object() else {
        return attributes;
    };
    for (name, json) in object {
        let typed = match schema.get(name) {
            Some(attr) => json_to_value(&attr.attr_type, json),
            None => Value::Null,
        };
        // Values that do not fit their type stay untyped for validation
        let value = if typed.is_null() && !json.is_null() {
            Value::from_json(json)
        } else {
            typed
        };
        attributes.insert(name.clone(), value);
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use filescom_core::schema::{AttributeSchema, AttributeType};
    use serde_json::json;
    use tempfile::tempdir;

    fn schema() -> Schema {
        Schema::new("files_group")
            .attribute(AttributeSchema::new("id", AttributeType::Int).read_only())
            .attribute(AttributeSchema::new("name", AttributeType::String).required())
            .attribute(AttributeSchema::new("settings", AttributeType::Dynamic).computed())
            .attribute(AttributeSchema::new("max_uses", AttributeType::Int))
    }

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = tempdir().unwrap();
        let store = LocalState::new(dir.path().join("none.json"));
        let state = store.load().unwrap();
        assert!(state.resources.is_empty());
        assert_eq!(state.serial, 0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = LocalState::new(dir.path().join("nested").join("state.json"));

        let mut attrs = Attributes::new();
        attrs.insert("id".to_string(), Value::Int(4));
        attrs.insert("name".to_string(), Value::string("ops"));
        attrs.insert("settings".to_string(), Value::Dynamic(json!({"a": [1, 2]})));

        let mut state = StateFile::default();
        let key = StateFile::key("files_group", "ops");
        state.put(key.clone(), "files_group", &attrs);
        store.save(&mut state).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.serial, 1);
        assert_eq!(loaded.resources[&key].resource_type, "files_group");
        assert_eq!(loaded.get(&key, &schema()).unwrap(), attrs);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(LocalState::new(path).load().is_err());
    }

    #[test]
    fn test_mistyped_values_fail_validation() {
        let attrs = attributes_from_document(&schema(), &json!({"name": "ops", "max_uses": "many"}));
        assert_eq!(attrs["max_uses"], Value::string("many"));
        assert!(schema().validate_config(&attrs).is_err());
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let attrs = attributes_from_document(&schema(), &json!({"name": "ops", "colour": "red"}));
        assert_eq!(attrs["colour"], Value::string("red"));
        assert!(schema().validate_config(&attrs).is_err());
    }
}
