//! permission schema definition
//!
//! API: `/permissions`. There is no find or update endpoint: reads scan the
//! list route for the id and any change replaces the permission.

use super::{FilesSchemaConfig, Identity, Lookup, Routes, id_attribute};
use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

/// Returns the schema config for files_permission
pub fn permission_config() -> FilesSchemaConfig {
    FilesSchemaConfig {
        type_name: "files_permission",
        display_name: "Permission",
        identity: Identity::Id,
        lookup: Lookup::ListScan,
        routes: Routes {
            find: None,
            list: Some("permissions"),
            create: Some("permissions"),
            update: None,
            delete: Some("permissions/{id}"),
            delete_params: &[],
        },
        has_data_source: true,
        has_resource: true,
        schema: Schema::new("files_permission")
        .with_description("Permission objects represent the grant of permissions to a user or group.")
        .attribute(id_attribute("Permission"))
        .attribute(
            AttributeSchema::new("path", AttributeType::String)
                .computed()
                .path()
                .requires_replace()
                .with_description("Path. This must be slash-delimited, but it must neither start nor end with a slash."),
        )
        .attribute(
            AttributeSchema::new("user_id", AttributeType::Int)
                .computed()
                .requires_replace()
                .with_description("User ID"),
        )
        .attribute(
            AttributeSchema::new("username", AttributeType::String)
                .computed()
                .requires_replace()
                .with_description("Username (if applicable)"),
        )
        .attribute(
            AttributeSchema::new("group_id", AttributeType::Int)
                .computed()
                .requires_replace()
                .with_description("Group ID"),
        )
        .attribute(
            AttributeSchema::new("group_name", AttributeType::String)
                .computed()
                .requires_replace()
                .with_description("Group name (if applicable)"),
        )
        .attribute(
            AttributeSchema::new("permission", AttributeType::String)
                .computed()
                .requires_replace()
                .one_of(&["full", "readonly", "writeonly", "list", "history", "admin", "bundle"])
                .with_description("Permission type."),
        )
        .attribute(
            AttributeSchema::new("recursive", AttributeType::Bool)
                .computed()
                .requires_replace()
                .with_description("Recursive: does this permission apply to subfolders?"),
        ),
    }
}
