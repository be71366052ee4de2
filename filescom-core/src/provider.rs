//! Provider - Traits implemented by data sources, resources and the provider
//!
//! Operations report failures into a `Diagnostics` collection and return
//! `None` when they could not produce a result. A resource `read` returning
//! `None` without error diagnostics means the remote object is gone and the
//! instance should be dropped from state.

use async_trait::async_trait;
use serde_json::json;

use crate::diagnostics::Diagnostics;
use crate::schema::Schema;
use crate::value::Attributes;

/// Error type for type lookups on a provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    #[error("Unknown data source type: {0}")]
    UnknownDataSource(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Read-only lookup of remote state
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Full type name (e.g., "files_user")
    fn type_name(&self) -> &str;

    fn schema(&self) -> &Schema;

    /// Look up the remote object described by `config`
    async fn read(&self, config: &Attributes, diags: &mut Diagnostics) -> Option<Attributes>;
}

/// Managed remote object
#[async_trait]
pub trait Resource: Send + Sync {
    /// Full type name (e.g., "files_user")
    fn type_name(&self) -> &str;

    fn schema(&self) -> &Schema;

    async fn create(&self, plan: &Attributes, diags: &mut Diagnostics) -> Option<Attributes>;

    /// Refresh `state`; `None` without errors means the object no longer exists
    async fn read(&self, state: &Attributes, diags: &mut Diagnostics) -> Option<Attributes>;

    async fn update(
        &self,
        plan: &Attributes,
        prior: &Attributes,
        diags: &mut Diagnostics,
    ) -> Option<Attributes>;

    async fn delete(&self, state: &Attributes, diags: &mut Diagnostics);

    /// Turn an import id into a minimal state that `read` can refresh
    fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<Attributes>;
}

/// A provider: its own config schema plus the data sources and resources it serves
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider type name (e.g., "files")
    fn type_name(&self) -> &str;

    /// Registry source address used in schema exports
    fn source_address(&self) -> String {
        format!("registry.terraform.io/hashicorp/{}", self.type_name())
    }

    fn schema(&self) -> Schema;

    async fn configure(&mut self, config: &Attributes, diags: &mut Diagnostics);

    fn resources(&self) -> Vec<Box<dyn Resource>>;

    fn data_sources(&self) -> Vec<Box<dyn DataSource>>;

    fn resource(&self, type_name: &str) -> ProviderResult<Box<dyn Resource>> {
        self.resources()
            .into_iter()
            .find(|r| r.type_name() == type_name)
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }

    fn data_source(&self, type_name: &str) -> ProviderResult<Box<dyn DataSource>> {
        self.data_sources()
            .into_iter()
            .find(|d| d.type_name() == type_name)
            .ok_or_else(|| ProviderError::UnknownDataSource(type_name.to_string()))
    }
}

/// Full `terraform providers schema -json` document for a provider
pub fn provider_schema_json(provider: &dyn Provider) -> serde_json::Value {
    let resources: serde_json::Map<_, _> = provider
        .resources()
        .iter()
        .map(|r| (r.type_name().to_string(), r.schema().to_terraform_json()))
        .collect();
    let data_sources: serde_json::Map<_, _> = provider
        .data_sources()
        .iter()
        .map(|d| (d.type_name().to_string(), d.schema().to_terraform_json()))
        .collect();

    let mut schemas = serde_json::Map::new();
    schemas.insert(
        provider.source_address(),
        json!({
            "provider": provider.schema().to_terraform_json(),
            "resource_schemas": resources,
            "data_source_schemas": data_sources,
        }),
    );

    json!({
        "format_version": "1.0",
        "provider_schemas": schemas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeSchema, AttributeType};
    use crate::value::Value;

    struct EchoResource {
        schema: Schema,
    }

    impl EchoResource {
        fn new() -> Self {
            Self {
                schema: Schema::new("mock_echo")
                    .attribute(AttributeSchema::new("id", AttributeType::String).read_only())
                    .attribute(AttributeSchema::new("name", AttributeType::String).required()),
            }
        }
    }

    #[async_trait]
    impl Resource for EchoResource {
        fn type_name(&self) -> &str {
            "mock_echo"
        }

        fn schema(&self) -> &Schema {
            &self.schema
        }

        async fn create(&self, plan: &Attributes, _diags: &mut Diagnostics) -> Option<Attributes> {
            let mut state = plan.clone();
            state.insert("id".to_string(), Value::string("mock-id-123"));
            Some(state)
        }

        async fn read(&self, state: &Attributes, _diags: &mut Diagnostics) -> Option<Attributes> {
            Some(state.clone())
        }

        async fn update(
            &self,
            plan: &Attributes,
            _prior: &Attributes,
            _diags: &mut Diagnostics,
        ) -> Option<Attributes> {
            Some(plan.clone())
        }

        async fn delete(&self, _state: &Attributes, _diags: &mut Diagnostics) {}

        fn import_state(&self, id: &str, _diags: &mut Diagnostics) -> Option<Attributes> {
            let mut state = Attributes::new();
            state.insert("id".to_string(), Value::string(id));
            Some(state)
        }
    }

    struct MockProvider;

    #[async_trait]
    impl Provider for MockProvider {
        fn type_name(&self) -> &str {
            "mock"
        }

        fn schema(&self) -> Schema {
            Schema::new("mock")
        }

        async fn configure(&mut self, _config: &Attributes, _diags: &mut Diagnostics) {}

        fn resources(&self) -> Vec<Box<dyn Resource>> {
            vec![Box::new(EchoResource::new())]
        }

        fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
            vec![]
        }
    }

    #[tokio::test]
    async fn mock_resource_create_sets_id() {
        let provider = MockProvider;
        let resource = provider.resource("mock_echo").unwrap();
        let mut plan = Attributes::new();
        plan.insert("name".to_string(), Value::string("example"));

        let mut diags = Diagnostics::new();
        let state = resource.create(&plan, &mut diags).await.unwrap();
        assert!(!diags.has_errors());
        assert_eq!(state["id"], Value::string("mock-id-123"));
    }

    #[test]
    fn unknown_types_are_errors() {
        let provider = MockProvider;
        assert!(matches!(
            provider.resource("mock_missing"),
            Err(ProviderError::UnknownResource(_))
        ));
        assert!(matches!(
            provider.data_source("mock_echo"),
            Err(ProviderError::UnknownDataSource(_))
        ));
    }

    #[test]
    fn schema_document_lists_every_type() {
        let doc = provider_schema_json(&MockProvider);
        let entry = &doc["provider_schemas"]["registry.terraform.io/hashicorp/mock"];
        assert_eq!(doc["format_version"], "1.0");
        assert!(entry["resource_schemas"]["mock_echo"]["block"]["attributes"]["name"]["required"]
            .as_bool()
            .unwrap());
        assert!(entry["data_source_schemas"].as_object().unwrap().is_empty());
    }
}
