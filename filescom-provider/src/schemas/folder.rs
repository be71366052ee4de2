//! folder schema definition
//!
//! Folders are addressed by path: created with `POST /folders/{path}`, read
//! through the file metadata endpoint and removed with `DELETE /files/{path}`.

use super::{FilesSchemaConfig, Identity, Lookup, Routes, path_attribute};
use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

/// Returns the schema config for files_folder
pub fn folder_config() -> FilesSchemaConfig {
    FilesSchemaConfig {
        type_name: "files_folder",
        display_name: "Folder",
        identity: Identity::Path,
        lookup: Lookup::Find,
        routes: Routes {
            find: Some("file_actions/metadata/{id}"),
            list: None,
            create: Some("folders/{id}"),
            update: Some("files/{id}"),
            delete: Some("files/{id}"),
            delete_params: &[("recursive", "true")],
        },
        has_data_source: false,
        has_resource: true,
        schema: Schema::new("files_folder")
        .with_description("A Folder on the Files.com site.")
        .attribute(path_attribute("Folder path."))
        .attribute(
            AttributeSchema::new("mkdir_parents", AttributeType::Bool)
                .retained()
                .requires_replace()
                .with_description("Create parent directories if they do not exist?"),
        )
        .attribute(
            AttributeSchema::new("provided_mtime", AttributeType::Timestamp)
                .computed()
                .with_description("User provided modification time."),
        )
        .attribute(
            AttributeSchema::new("priority_color", AttributeType::String)
                .computed()
                .with_description("File/Folder priority color"),
        )
        .attribute(
            AttributeSchema::new("custom_metadata", AttributeType::map_of(AttributeType::String))
                .computed()
                .with_description("Custom metadata map of keys and values."),
        )
        .attribute(
            AttributeSchema::new("display_name", AttributeType::String)
                .read_only()
                .with_description("File/Folder display name"),
        )
        .attribute(
            AttributeSchema::new("type", AttributeType::String)
                .read_only()
                .with_description("Type: `directory` or `file`."),
        )
        .attribute(
            AttributeSchema::new("permissions", AttributeType::String)
                .read_only()
                .with_description("A short string representing the current user's permissions."),
        )
        .attribute(
            AttributeSchema::new("created_at", AttributeType::Timestamp)
                .read_only()
                .with_description("File created date/time"),
        )
        .attribute(
            AttributeSchema::new("mtime", AttributeType::Timestamp)
                .read_only()
                .with_description("File last modified date/time, according to the server."),
        ),
    }
}
