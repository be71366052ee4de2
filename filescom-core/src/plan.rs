//! Plan - Compare configuration with prior state to decide the next action
//!
//! Applies the per-attribute plan modifiers declared in schemas: computed
//! values are unknown on create and carried over from state on update,
//! and changes to `requires_replace` attributes force a replacement.

use crate::schema::Schema;
use crate::value::{Attributes, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    Create,
    Update,
    /// Delete the existing object and create a new one
    Replace,
    NoOp,
}

/// Result of planning one resource instance
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedChange {
    pub action: PlanAction,
    pub planned: Attributes,
    pub changed_attributes: Vec<String>,
    /// Changed attributes that force replacement
    pub replace_attributes: Vec<String>,
}

impl PlannedChange {
    pub fn is_change(&self) -> bool {
        self.action != PlanAction::NoOp
    }
}

/// Plan the creation of a new instance from config
pub fn plan_create(schema: &Schema, config: &Attributes) -> Attributes {
    let mut planned = Attributes::new();
    for (name, attr) in &schema.attributes {
        let configured = config
            .get(name)
            .filter(|v| attr.is_configurable() && !v.is_null())
            .map(|v| attr.normalize(v));
        let value = match configured {
            Some(v) => v,
            None if attr.is_computed() => Value::Unknown,
            None => Value::Null,
        };
        planned.insert(name.clone(), value);
    }
    planned
}

/// Plan changes to an existing instance
pub fn plan_update(schema: &Schema, prior: &Attributes, config: &Attributes) -> PlannedChange {
    let mut planned = Attributes::new();
    let mut changed_attributes = Vec::new();
    let mut replace_attributes = Vec::new();

    for (name, attr) in &schema.attributes {
        let prior_value = prior.get(name).cloned().unwrap_or_default();
        let configured = config
            .get(name)
            .filter(|v| attr.is_configurable() && !v.is_null())
            .map(|v| attr.normalize(v));

        let value = match &configured {
            Some(v) => v.clone(),
            None if attr.is_computed() || attr.retained => prior_value.clone(),
            None => Value::Null,
        };

        if attr.is_configurable() && value != prior_value {
            // Retained values the API never echoed back are only a change
            // when the user actually sets them
            if !(attr.retained && configured.is_none()) {
                changed_attributes.push(name.clone());
                if attr.requires_replace {
                    replace_attributes.push(name.clone());
                }
            }
        }
        planned.insert(name.clone(), value);
    }

    let action = if changed_attributes.is_empty() {
        PlanAction::NoOp
    } else if !replace_attributes.is_empty() {
        PlanAction::Replace
    } else {
        PlanAction::Update
    };

    if action == PlanAction::Replace {
        log::debug!(
            "{} must be replaced, forced by {}",
            schema.type_name,
            replace_attributes.join(", ")
        );
        planned = plan_create(schema, config);
    }

    PlannedChange {
        action,
        planned,
        changed_attributes,
        replace_attributes,
    }
}

/// Plan an instance that may or may not exist yet
pub fn plan(schema: &Schema, prior: Option<&Attributes>, config: &Attributes) -> PlannedChange {
    match prior {
        Some(prior) => plan_update(schema, prior, config),
        None => {
            let planned = plan_create(schema, config);
            let changed_attributes = planned
                .iter()
                .filter(|(_, v)| v.is_known())
                .map(|(k, _)| k.clone())
                .collect();
            PlannedChange {
                action: PlanAction::Create,
                planned,
                changed_attributes,
                replace_attributes: Vec::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeSchema, AttributeType};

    fn key_schema() -> Schema {
        Schema::new("files_public_key")
            .attribute(AttributeSchema::new("id", AttributeType::Int).read_only())
            .attribute(AttributeSchema::new("title", AttributeType::String).required())
            .attribute(
                AttributeSchema::new("public_key", AttributeType::String)
                    .required()
                    .requires_replace(),
            )
            .attribute(AttributeSchema::new("username", AttributeType::String).computed())
            .attribute(
                AttributeSchema::new("password", AttributeType::String)
                    .sensitive()
                    .retained(),
            )
    }

    fn attrs(pairs: &[(&str, Value)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn create_marks_computed_unknown() {
        let config = attrs(&[
            ("title", Value::string("laptop")),
            ("public_key", Value::string("ssh-ed25519 AAA")),
        ]);
        let change = plan(&key_schema(), None, &config);
        assert_eq!(change.action, PlanAction::Create);
        assert_eq!(change.planned["id"], Value::Unknown);
        assert_eq!(change.planned["username"], Value::Unknown);
        assert_eq!(change.planned["password"], Value::Null);
        assert_eq!(change.planned["title"], Value::string("laptop"));
    }

    #[test]
    fn unchanged_config_is_noop() {
        let prior = attrs(&[
            ("id", Value::Int(7)),
            ("title", Value::string("laptop")),
            ("public_key", Value::string("ssh-ed25519 AAA")),
            ("username", Value::string("alice")),
            ("password", Value::string("hunter2")),
        ]);
        let config = attrs(&[
            ("title", Value::string("laptop")),
            ("public_key", Value::string("ssh-ed25519 AAA")),
        ]);
        let change = plan_update(&key_schema(), &prior, &config);
        assert_eq!(change.action, PlanAction::NoOp);
        assert_eq!(change.planned["id"], Value::Int(7));
        assert_eq!(change.planned["password"], Value::string("hunter2"));
    }

    #[test]
    fn changed_title_is_update() {
        let prior = attrs(&[
            ("id", Value::Int(7)),
            ("title", Value::string("laptop")),
            ("public_key", Value::string("ssh-ed25519 AAA")),
        ]);
        let config = attrs(&[
            ("title", Value::string("desktop")),
            ("public_key", Value::string("ssh-ed25519 AAA")),
        ]);
        let change = plan_update(&key_schema(), &prior, &config);
        assert_eq!(change.action, PlanAction::Update);
        assert_eq!(change.changed_attributes, vec!["title".to_string()]);
        assert_eq!(change.planned["id"], Value::Int(7));
    }

    #[test]
    fn path_slashes_are_not_a_change() {
        let schema = Schema::new("files_folder")
            .attribute(
                AttributeSchema::new("path", AttributeType::String)
                    .required()
                    .path()
                    .requires_replace(),
            )
            .attribute(AttributeSchema::new("type", AttributeType::String).read_only());
        let prior = attrs(&[
            ("path", Value::string("projects/q1")),
            ("type", Value::string("directory")),
        ]);

        let config = attrs(&[("path", Value::string("/projects/q1/"))]);
        let change = plan_update(&schema, &prior, &config);
        assert_eq!(change.action, PlanAction::NoOp);
        assert_eq!(change.planned["path"], Value::string("projects/q1"));

        let config = attrs(&[("path", Value::string("/projects/q2"))]);
        let change = plan_update(&schema, &prior, &config);
        assert_eq!(change.action, PlanAction::Replace);
        assert_eq!(change.planned["path"], Value::string("projects/q2"));
    }

    #[test]
    fn changed_key_is_replace() {
        let prior = attrs(&[
            ("id", Value::Int(7)),
            ("title", Value::string("laptop")),
            ("public_key", Value::string("ssh-ed25519 AAA")),
        ]);
        let config = attrs(&[
            ("title", Value::string("laptop")),
            ("public_key", Value::string("ssh-ed25519 BBB")),
        ]);
        let change = plan_update(&key_schema(), &prior, &config);
        assert_eq!(change.action, PlanAction::Replace);
        assert_eq!(change.replace_attributes, vec!["public_key".to_string()]);
        assert_eq!(change.planned["id"], Value::Unknown);
    }
}
