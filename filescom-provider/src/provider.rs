//! Files.com Provider
//!
//! Owns the configured client and hands it to every data source and
//! resource it serves.

use std::sync::Arc;

use async_trait::async_trait;
use filescom_client::{FilesApi, FilesClient};
use filescom_core::schema::Schema;
use filescom_core::{Attributes, DataSource, Diagnostics, Provider, Resource};

use crate::config::{API_KEY_ENV, ProviderConfig, provider_schema};
use crate::resources::{ApiHandle, FilesDataSource, FilesResource};
use crate::schemas::{self, FilesSchemaConfig};

pub const PROVIDER_NAME: &str = "files";
pub const SOURCE_ADDRESS: &str = "registry.terraform.io/Files-com/files";

pub struct FilesProvider {
    api: ApiHandle,
    configs: Vec<Arc<FilesSchemaConfig>>,
}

impl FilesProvider {
    /// Unconfigured provider; `configure` creates the client
    pub fn new() -> Self {
        Self {
            api: None,
            configs: schemas::configs().into_iter().map(Arc::new).collect(),
        }
    }

    /// Provider already bound to a client
    pub fn with_api(api: Arc<dyn FilesApi>) -> Self {
        let mut provider = Self::new();
        provider.api = Some(api);
        provider
    }

    pub fn is_configured(&self) -> bool {
        self.api.is_some()
    }

    /// Client handed to data sources and resources
    pub fn api(&self) -> Option<Arc<dyn FilesApi>> {
        self.api.clone()
    }

    /// Schema config of a data source or resource type
    pub fn schema_config(&self, type_name: &str) -> Option<Arc<FilesSchemaConfig>> {
        self.configs
            .iter()
            .find(|c| c.type_name == type_name)
            .cloned()
    }
}

impl Default for FilesProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for FilesProvider {
    fn type_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn source_address(&self) -> String {
        SOURCE_ADDRESS.to_string()
    }

    fn schema(&self) -> Schema {
        provider_schema()
    }

    async fn configure(&mut self, config: &Attributes, diags: &mut Diagnostics) {
        if config.get("api_key").is_some_and(|v| v.is_unknown()) {
            diags.add_attribute_error(
                "api_key",
                "Unknown Files.com API Key",
                format!(
                    "The provider cannot create the Files.com API client as there is an unknown configuration value for the Files.com API key. Either target apply the source of the value first, set the value statically in the configuration, or use the {} environment variable.",
                    API_KEY_ENV
                ),
            );
            return;
        }

        let settings = ProviderConfig::from_attributes(config, |var| std::env::var(var).ok());
        let Some(client_config) = settings.client_config() else {
            diags.add_attribute_error(
                "api_key",
                "Missing Files.com API Key",
                format!(
                    "The provider cannot create the Files.com API client as there is a missing or empty value for the Files.com API key. Set the api_key value in the configuration or use the {} environment variable. If either is already set, ensure the value is not empty.",
                    API_KEY_ENV
                ),
            );
            return;
        };

        match FilesClient::new(client_config) {
            Ok(client) => {
                log::debug!("configured Files.com client for {}", client.config().api_base());
                self.api = Some(Arc::new(client));
            }
            Err(e) => diags.add_error(
                "Unable to Create Files.com API Client",
                format!(
                    "An unexpected error occurred when creating the Files.com API client: {}",
                    e
                ),
            ),
        }
    }

    fn resources(&self) -> Vec<Box<dyn Resource>> {
        self.configs
            .iter()
            .filter(|c| c.has_resource)
            .map(|c| Box::new(FilesResource::new(c.clone(), self.api.clone())) as Box<dyn Resource>)
            .collect()
    }

    fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
        self.configs
            .iter()
            .filter(|c| c.has_data_source)
            .map(|c| {
                Box::new(FilesDataSource::new(c.clone(), self.api.clone())) as Box<dyn DataSource>
            })
            .collect()
    }
}
