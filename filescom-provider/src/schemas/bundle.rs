//! bundle schema definition
//!
//! API: `/bundles`

use super::{FilesSchemaConfig, Identity, Lookup, Routes, id_attribute, string_list};
use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

/// Returns the schema config for files_bundle
pub fn bundle_config() -> FilesSchemaConfig {
    FilesSchemaConfig {
        type_name: "files_bundle",
        display_name: "Bundle",
        identity: Identity::Id,
        lookup: Lookup::Find,
        routes: Routes::collection("bundles", "bundles/{id}"),
        has_data_source: true,
        has_resource: true,
        schema: Schema::new("files_bundle")
        .with_description("Bundles are the API/SDK term for the feature called Share Links in the web interface.")
        .attribute(id_attribute("Bundle"))
        .attribute(
            AttributeSchema::new("paths", string_list())
                .required()
                .with_description("A list of paths in this bundle. For performance reasons, this is not provided when listing bundles."),
        )
        .attribute(
            AttributeSchema::new("code", AttributeType::String)
                .computed()
                .with_description("Bundle code. This code forms the end part of the Public URL."),
        )
        .attribute(
            AttributeSchema::new("url", AttributeType::String)
                .read_only()
                .with_description("Public URL of Share Link"),
        )
        .attribute(
            AttributeSchema::new("description", AttributeType::String)
                .computed()
                .with_description("Public description"),
        )
        .attribute(
            AttributeSchema::new("note", AttributeType::String)
                .computed()
                .with_description("Bundle internal note"),
        )
        .attribute(
            AttributeSchema::new("password", AttributeType::String)
                .sensitive()
                .retained()
                .with_description("Password for this bundle."),
        )
        .attribute(
            AttributeSchema::new("password_protected", AttributeType::Bool)
                .read_only()
                .with_description("Is this bundle password protected?"),
        )
        .attribute(
            AttributeSchema::new("expires_at", AttributeType::Timestamp)
                .computed()
                .with_description("Bundle expiration date/time"),
        )
        .attribute(
            AttributeSchema::new("max_uses", AttributeType::Int)
                .computed()
                .with_description("Maximum number of times bundle can be accessed"),
        )
        .attribute(
            AttributeSchema::new("permissions", AttributeType::String)
                .computed()
                .one_of(&["read", "write", "read_write", "full", "none", "preview_only"])
                .with_description("Permissions that apply to Folders in this Share Link."),
        )
        .attribute(
            AttributeSchema::new("require_registration", AttributeType::Bool)
                .computed()
                .with_description("Show a registration page that captures the downloader's name and email address?"),
        )
        .attribute(
            AttributeSchema::new("require_share_recipient", AttributeType::Bool)
                .computed()
                .with_description("Only allow access to recipients who have explicitly received the share via an email sent through the Files.com UI?"),
        )
        .attribute(
            AttributeSchema::new("skip_email", AttributeType::Bool)
                .computed()
                .with_description("BundleRegistrations can be saved without providing email?"),
        )
        .attribute(
            AttributeSchema::new("skip_name", AttributeType::Bool)
                .computed()
                .with_description("BundleRegistrations can be saved without providing name?"),
        )
        .attribute(
            AttributeSchema::new("inbox_id", AttributeType::Int)
                .computed()
                .with_description("ID of the associated inbox, if available."),
        )
        .attribute(
            AttributeSchema::new("user_id", AttributeType::Int)
                .computed()
                .requires_replace()
                .with_description("Bundle creator user ID"),
        )
        .attribute(
            AttributeSchema::new("username", AttributeType::String)
                .read_only()
                .with_description("Bundle creator username"),
        )
        .attribute(
            AttributeSchema::new("created_at", AttributeType::Timestamp)
                .read_only()
                .with_description("Bundle created at date/time"),
        ),
    }
}
