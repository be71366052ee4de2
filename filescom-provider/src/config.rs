//! Provider configuration
//!
//! Values come from the provider block and fall back to the environment.

use filescom_client::ClientConfig;
use filescom_core::Attributes;
use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

pub const API_KEY_ENV: &str = "FILES_API_KEY";
pub const ENDPOINT_ENV: &str = "FILES_ENDPOINT_OVERRIDE";

/// Schema of the provider block
pub fn provider_schema() -> Schema {
    Schema::new("files")
        .with_description("Interact with Files.com.")
        .attribute(
            AttributeSchema::new("api_key", AttributeType::String)
                .sensitive()
                .with_description(format!(
                    "The API key used to authenticate with Files.com. It can also be sourced from the `{}` environment variable.",
                    API_KEY_ENV
                )),
        )
        .attribute(
            AttributeSchema::new("endpoint_override", AttributeType::String).with_description(
                format!(
                    "Required if your site is configured to disable global acceleration. This can also be set to use a mock server in development mode. It can also be sourced from the `{}` environment variable.",
                    ENDPOINT_ENV
                ),
            ),
        )
}

/// Resolved provider settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub endpoint_override: Option<String>,
}

impl ProviderConfig {
    /// Read the provider block, using `env` for values it leaves unset.
    /// Empty strings count as unset.
    pub fn from_attributes<F>(attrs: &Attributes, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
        let pick = |name: &str, var: &str| {
            attrs
                .get(name)
                .and_then(|v| v.as_str())
                .and_then(non_empty)
                .or_else(|| env(var).as_deref().and_then(non_empty))
        };
        Self {
            api_key: pick("api_key", API_KEY_ENV),
            endpoint_override: pick("endpoint_override", ENDPOINT_ENV),
        }
    }

    /// Client settings, or `None` without an API key
    pub fn client_config(&self) -> Option<ClientConfig> {
        let api_key = self.api_key.as_ref()?;
        let mut builder = ClientConfig::builder().api_key(api_key);
        if let Some(endpoint) = &self.endpoint_override {
            builder = builder.endpoint(endpoint);
        }
        Some(builder.build())
    }
}
