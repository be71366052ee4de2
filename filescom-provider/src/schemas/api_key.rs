//! api_key schema definition
//!
//! API: `/api_keys`. The secret `key` is only present in the create
//! response, so state retains it afterwards.

use super::{FilesSchemaConfig, Identity, Lookup, Routes, id_attribute};
use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

/// Returns the schema config for files_api_key
pub fn api_key_config() -> FilesSchemaConfig {
    FilesSchemaConfig {
        type_name: "files_api_key",
        display_name: "ApiKey",
        identity: Identity::Id,
        lookup: Lookup::Find,
        routes: Routes::collection("api_keys", "api_keys/{id}"),
        has_data_source: true,
        has_resource: true,
        schema: Schema::new("files_api_key")
        .with_description("API Keys authenticate access to the Files.com API and SDKs.")
        .attribute(id_attribute("API Key"))
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .with_description("Internal name for the API Key. For your use."),
        )
        .attribute(
            AttributeSchema::new("description", AttributeType::String)
                .computed()
                .with_description("User-supplied description of API key."),
        )
        .attribute(
            AttributeSchema::new("expires_at", AttributeType::Timestamp)
                .computed()
                .with_description("API Key expiration date"),
        )
        .attribute(
            AttributeSchema::new("permission_set", AttributeType::String)
                .computed()
                .requires_replace()
                .one_of(&["none", "full", "desktop_app", "sync_app", "office_integration", "mobile_app"])
                .with_description("Permissions for this API Key."),
        )
        .attribute(
            AttributeSchema::new("user_id", AttributeType::Int)
                .computed()
                .requires_replace()
                .with_description("User ID. Provide a value of 0 to operate the current session's user."),
        )
        .attribute(
            AttributeSchema::new("key", AttributeType::String)
                .read_only()
                .sensitive()
                .retained()
                .with_description("API Key actual key string"),
        )
        .attribute(
            AttributeSchema::new("descriptive_label", AttributeType::String)
                .read_only()
                .with_description("Unique label that describes this API key. Useful for external systems where you may have API keys from multiple accounts and want a human-readable label for each key."),
        )
        .attribute(
            AttributeSchema::new("platform", AttributeType::String)
                .read_only()
                .with_description("If this API key represents a Desktop app, what platform was it created on?"),
        )
        .attribute(
            AttributeSchema::new("last_use_at", AttributeType::Timestamp)
                .read_only()
                .with_description("API Key last used - note this value is only updated once per 3 hour period."),
        )
        .attribute(
            AttributeSchema::new("created_at", AttributeType::Timestamp)
                .read_only()
                .with_description("Time which API Key was created"),
        ),
    }
}
