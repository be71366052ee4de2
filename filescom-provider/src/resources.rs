//! Generic data source and resource backed by a schema config
//!
//! Every entity uses the same flow: resolve its identity, call one client
//! operation and populate state from the response. Client errors surface as
//! diagnostics with fixed templates.

use std::sync::Arc;

use async_trait::async_trait;
use filescom_client::{Error, FilesApi, ListIter, Params};
use filescom_core::schema::Schema;
use filescom_core::{Attributes, DataSource, Diagnostics, Resource, Value};
use serde_json::Value as Json;

use crate::populate::{build_body, populate};
use crate::schemas::{FilesSchemaConfig, Identity, Lookup};

pub(crate) const UNCONFIGURED_SUMMARY: &str = "Unconfigured Files.com Client";

/// Shared client handle, absent until the provider is configured
pub type ApiHandle = Option<Arc<dyn FilesApi>>;

fn client<'a>(api: &'a ApiHandle, diags: &mut Diagnostics) -> Option<&'a dyn FilesApi> {
    match api {
        Some(api) => Some(api.as_ref()),
        None => {
            diags.add_error(
                UNCONFIGURED_SUMMARY,
                "Expected a configured Files.com client. Configure the provider before using its data sources and resources.",
            );
            None
        }
    }
}

/// Identity of an instance as used in routes and messages
#[derive(Debug, Clone, PartialEq)]
struct Key {
    attribute: Option<&'static str>,
    value: Option<String>,
}

impl Key {
    fn singleton() -> Self {
        Self {
            attribute: None,
            value: None,
        }
    }

    fn id(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// " id 42" / " path a/b" / "" for singletons
    fn describe(&self) -> String {
        match (self.attribute, &self.value) {
            (Some(attr), Some(value)) => format!(" {} {}", attr, value),
            _ => String::new(),
        }
    }
}

/// Message templates shared by data sources and resources
struct Messages<'a> {
    config: &'a FilesSchemaConfig,
}

impl Messages<'_> {
    fn read_error(&self, diags: &mut Diagnostics, key: &Key, err: impl std::fmt::Display) {
        diags.add_error(
            format!("Error Reading Files {}", self.config.display_name),
            format!(
                "Could not read {}{}: {}",
                self.config.short_name(),
                key.describe(),
                err
            ),
        );
    }

    fn create_error(&self, diags: &mut Diagnostics, err: impl std::fmt::Display) {
        diags.add_error(
            format!("Error Creating Files {}", self.config.display_name),
            format!(
                "Could not create {}, unexpected error: {}",
                self.config.short_name(),
                err
            ),
        );
    }

    fn update_error(&self, diags: &mut Diagnostics, err: impl std::fmt::Display) {
        diags.add_error(
            format!("Error Updating Files {}", self.config.display_name),
            format!(
                "Could not update {}, unexpected error: {}",
                self.config.short_name(),
                err
            ),
        );
    }

    fn delete_error(&self, diags: &mut Diagnostics, key: &Key, err: impl std::fmt::Display) {
        diags.add_error(
            format!("Error Deleting Files {}", self.config.display_name),
            format!(
                "Could not delete {}{}: {}",
                self.config.short_name(),
                key.describe(),
                err
            ),
        );
    }

    fn import_error(&self, diags: &mut Diagnostics, detail: impl Into<String>) {
        diags.add_error(
            format!("Error Importing Files {}", self.config.display_name),
            detail,
        );
    }
}

/// Resolve the identity of an instance from its attributes
fn key_of(config: &FilesSchemaConfig, attrs: &Attributes) -> Option<Key> {
    let attribute = match config.identity.attribute() {
        Some(attr) => attr,
        None => return Some(Key::singleton()),
    };
    let value = match (config.identity, attrs.get(attribute)) {
        (Identity::Id, Some(Value::Int(id))) => id.to_string(),
        (Identity::Path, Some(Value::String(path))) if !path.is_empty() => {
            path.trim_matches('/').to_string()
        }
        _ => return None,
    };
    Some(Key {
        attribute: Some(attribute),
        value: Some(value),
    })
}

fn missing_key(config: &FilesSchemaConfig, diags: &mut Diagnostics) {
    let attribute = config.identity.attribute().unwrap_or("id");
    diags.add_attribute_error(
        attribute,
        format!("Missing Files {} Identifier", config.display_name),
        format!(
            "A known {} value is required to look up a {}.",
            attribute,
            config.short_name()
        ),
    );
}

/// Fetch one object; `Ok(None)` when it does not exist
async fn fetch(
    api: &dyn FilesApi,
    config: &FilesSchemaConfig,
    key: &Key,
) -> filescom_client::Result<Option<Json>> {
    match config.lookup {
        Lookup::Find => {
            let route = config.routes.find.ok_or_else(|| unsupported("find"))?;
            match api.find(route, key.id()).await {
                Ok(object) => Ok(Some(object)),
                Err(e) if e.is_not_found() => Ok(None),
                Err(e) => Err(e),
            }
        }
        Lookup::ListScan => {
            let route = config.routes.list.ok_or_else(|| unsupported("list"))?;
            let wanted = key.id().unwrap_or_default().to_string();
            ListIter::new(api, route, Params::new())
                .find(|item| id_matches(item, &wanted))
                .await
        }
    }
}

fn id_matches(item: &Json, wanted: &str) -> bool {
    match item.get("id") {
        Some(Json::Number(n)) => n.to_string() == wanted,
        Some(Json::String(s)) => s == wanted,
        _ => false,
    }
}

fn unsupported(operation: &str) -> Error {
    Error::Api {
        status: 405,
        kind: "unsupported-operation".to_string(),
        message: format!("{} is not supported for this object", operation),
    }
}

/// Keep the identity when the response does not echo it back
fn keep_identity(config: &FilesSchemaConfig, state: &mut Attributes, source: &Attributes) {
    if let Some(attr) = config.identity.attribute()
        && state.get(attr).is_none_or(Value::is_null)
        && let Some(value) = source.get(attr).filter(|v| v.is_known())
    {
        state.insert(attr.to_string(), value.clone());
    }
}

/// Read-only lookup of a Files.com object
pub struct FilesDataSource {
    config: Arc<FilesSchemaConfig>,
    schema: Schema,
    api: ApiHandle,
}

impl FilesDataSource {
    pub fn new(config: Arc<FilesSchemaConfig>, api: ApiHandle) -> Self {
        let schema = config.data_source_schema();
        Self {
            config,
            schema,
            api,
        }
    }
}

#[async_trait]
impl DataSource for FilesDataSource {
    fn type_name(&self) -> &str {
        self.config.type_name
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    async fn read(&self, config: &Attributes, diags: &mut Diagnostics) -> Option<Attributes> {
        let api = client(&self.api, diags)?;
        let Some(key) = key_of(&self.config, config) else {
            missing_key(&self.config, diags);
            return None;
        };
        let messages = Messages {
            config: &self.config,
        };

        log::debug!("reading {}{}", self.config.type_name, key.describe());
        match fetch(api, &self.config, &key).await {
            Ok(Some(object)) => {
                let mut state = populate(&self.schema, &object, config);
                keep_identity(&self.config, &mut state, config);
                Some(state)
            }
            Ok(None) => {
                messages.read_error(diags, &key, "not found");
                None
            }
            Err(e) => {
                messages.read_error(diags, &key, e);
                None
            }
        }
    }
}

/// Managed Files.com object
pub struct FilesResource {
    config: Arc<FilesSchemaConfig>,
    api: ApiHandle,
}

impl FilesResource {
    pub fn new(config: Arc<FilesSchemaConfig>, api: ApiHandle) -> Self {
        Self { config, api }
    }

    fn messages(&self) -> Messages<'_> {
        Messages {
            config: &self.config,
        }
    }

    /// Attribute carried in the URL rather than the body
    fn url_attribute(&self) -> Option<&'static str> {
        match self.config.identity {
            Identity::Path => Some("path"),
            _ => None,
        }
    }
}

#[async_trait]
impl Resource for FilesResource {
    fn type_name(&self) -> &str {
        self.config.type_name
    }

    fn schema(&self) -> &Schema {
        &self.config.schema
    }

    async fn create(&self, plan: &Attributes, diags: &mut Diagnostics) -> Option<Attributes> {
        let api = client(&self.api, diags)?;
        let messages = self.messages();
        let Some(route) = self.config.routes.create else {
            messages.create_error(diags, unsupported("create"));
            return None;
        };

        let path = match self.config.identity {
            Identity::Path => match key_of(&self.config, plan) {
                Some(key) => key.value,
                None => {
                    missing_key(&self.config, diags);
                    return None;
                }
            },
            _ => None,
        };
        let body = build_body(&self.config.schema, plan, None, self.url_attribute());

        log::debug!("creating {}", self.config.type_name);
        match api.create(route, path.as_deref(), &body).await {
            Ok(object) => {
                let mut state = populate(&self.config.schema, &object, plan);
                keep_identity(&self.config, &mut state, plan);
                Some(state)
            }
            Err(e) => {
                messages.create_error(diags, e);
                None
            }
        }
    }

    async fn read(&self, state: &Attributes, diags: &mut Diagnostics) -> Option<Attributes> {
        let api = client(&self.api, diags)?;
        let Some(key) = key_of(&self.config, state) else {
            missing_key(&self.config, diags);
            return None;
        };

        log::debug!("reading {}{}", self.config.type_name, key.describe());
        match fetch(api, &self.config, &key).await {
            Ok(Some(object)) => {
                let mut refreshed = populate(&self.config.schema, &object, state);
                keep_identity(&self.config, &mut refreshed, state);
                Some(refreshed)
            }
            Ok(None) => {
                log::info!(
                    "{}{} no longer exists, removing from state",
                    self.config.type_name,
                    key.describe()
                );
                None
            }
            Err(e) => {
                self.messages().read_error(diags, &key, e);
                None
            }
        }
    }

    async fn update(
        &self,
        plan: &Attributes,
        prior: &Attributes,
        diags: &mut Diagnostics,
    ) -> Option<Attributes> {
        let api = client(&self.api, diags)?;
        let messages = self.messages();
        let Some(route) = self.config.routes.update else {
            messages.update_error(diags, "update is not supported, the object must be replaced");
            return None;
        };
        let Some(id) = key_of(&self.config, prior).and_then(|k| k.value) else {
            missing_key(&self.config, diags);
            return None;
        };
        let body = build_body(&self.config.schema, plan, Some(prior), self.url_attribute());

        log::debug!("updating {} {}", self.config.type_name, id);
        match api.update(route, &id, &body).await {
            Ok(object) => {
                let mut state = populate(&self.config.schema, &object, plan);
                keep_identity(&self.config, &mut state, prior);
                Some(state)
            }
            Err(e) => {
                messages.update_error(diags, e);
                None
            }
        }
    }

    async fn delete(&self, state: &Attributes, diags: &mut Diagnostics) {
        let Some(api) = client(&self.api, diags) else {
            return;
        };
        let messages = self.messages();
        let Some(key) = key_of(&self.config, state) else {
            missing_key(&self.config, diags);
            return;
        };
        let Some(route) = self.config.routes.delete else {
            messages.delete_error(diags, &key, unsupported("delete"));
            return;
        };
        let params: Params = self
            .config
            .routes
            .delete_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        log::debug!("deleting {}{}", self.config.type_name, key.describe());
        match api.delete(route, key.id().unwrap_or_default(), &params).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                log::info!(
                    "{}{} was already deleted",
                    self.config.type_name,
                    key.describe()
                );
            }
            Err(e) => messages.delete_error(diags, &key, e),
        }
    }

    fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<Attributes> {
        let mut state = Attributes::new();
        match self.config.identity {
            Identity::Id => match id.trim().parse::<i64>() {
                Ok(n) => {
                    state.insert("id".to_string(), Value::Int(n));
                }
                Err(e) => {
                    self.messages().import_error(
                        diags,
                        format!("Could not parse import identifier {:?} as an integer id: {}", id, e),
                    );
                    return None;
                }
            },
            Identity::Path => {
                let path = id.trim_matches('/');
                if path.is_empty() {
                    self.messages()
                        .import_error(diags, "Import identifier must be a non-empty path");
                    return None;
                }
                state.insert("path".to_string(), Value::string(path));
            }
            Identity::Singleton => {}
        }
        Some(state)
    }
}
