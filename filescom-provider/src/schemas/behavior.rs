//! behavior schema definition
//!
//! API: `/behaviors`. The `value` document differs per behavior type and is
//! carried as a dynamic value.

use super::{FilesSchemaConfig, Identity, Lookup, Routes, id_attribute};
use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

const BEHAVIOR_TYPES: &[&str] = &[
    "webhook",
    "file_expiration",
    "auto_encrypt",
    "lock_subfolders",
    "storage_region",
    "serve_publicly",
    "create_user_folders",
    "remote_server_sync",
    "inbox",
    "append_timestamp",
    "limit_file_extensions",
    "limit_file_regex",
    "amazon_sns",
    "watermark",
    "remote_server_mount",
    "slack_webhook",
    "auto_decrypt",
    "override_upload_filename",
    "permission_fence",
];

/// Returns the schema config for files_behavior
pub fn behavior_config() -> FilesSchemaConfig {
    FilesSchemaConfig {
        type_name: "files_behavior",
        display_name: "Behavior",
        identity: Identity::Id,
        lookup: Lookup::Find,
        routes: Routes::collection("behaviors", "behaviors/{id}"),
        has_data_source: true,
        has_resource: true,
        schema: Schema::new("files_behavior")
        .with_description("Behaviors are the API resource for what are also known as Folder Settings.")
        .attribute(id_attribute("Folder behavior"))
        .attribute(
            AttributeSchema::new("path", AttributeType::String)
                .required()
                .path()
                .with_description("Folder path. Note that Paths must not contain leading or trailing slashes."),
        )
        .attribute(
            AttributeSchema::new("behavior", AttributeType::String)
                .required()
                .requires_replace()
                .one_of(BEHAVIOR_TYPES)
                .with_description("Behavior type."),
        )
        .attribute(
            AttributeSchema::new("value", AttributeType::Dynamic)
                .computed()
                .with_description("Settings for this behavior. See the behavior types for the expected shape."),
        )
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .computed()
                .with_description("Name for this behavior."),
        )
        .attribute(
            AttributeSchema::new("description", AttributeType::String)
                .computed()
                .with_description("Description for this behavior."),
        )
        .attribute(
            AttributeSchema::new("attachment_url", AttributeType::String)
                .read_only()
                .with_description("URL for attached file"),
        )
        .attribute(
            AttributeSchema::new("disable_parent_folder_behavior", AttributeType::Bool)
                .computed()
                .with_description("If true, the parent folder's behavior will be disabled for this folder and its children."),
        )
        .attribute(
            AttributeSchema::new("recursive", AttributeType::Bool)
                .computed()
                .with_description("Is behavior recursive?"),
        ),
    }
}
