//! file schema definition (data source only)
//!
//! API: `GET /file_actions/metadata/{path}`

use super::{FilesSchemaConfig, Identity, Lookup, Routes};
use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

/// Returns the schema config for files_file
pub fn file_config() -> FilesSchemaConfig {
    FilesSchemaConfig {
        type_name: "files_file",
        display_name: "File",
        identity: Identity::Path,
        lookup: Lookup::Find,
        routes: Routes {
            find: Some("file_actions/metadata/{id}"),
            ..Routes::default()
        },
        has_data_source: true,
        has_resource: false,
        schema: Schema::new("files_file")
        .with_description("Metadata of a file or folder stored on Files.com.")
        .attribute(
            AttributeSchema::new("path", AttributeType::String)
                .required()
                .with_description("File/Folder path. This must be slash-delimited, but it must neither start nor end with a slash."),
        )
        .attribute(
            AttributeSchema::new("display_name", AttributeType::String)
                .with_description("File/Folder display name"),
        )
        .attribute(
            AttributeSchema::new("type", AttributeType::String)
                .with_description("Type: `directory` or `file`."),
        )
        .attribute(
            AttributeSchema::new("size", AttributeType::Int)
                .with_description("File/Folder size"),
        )
        .attribute(
            AttributeSchema::new("created_at", AttributeType::Timestamp)
                .with_description("File created date/time"),
        )
        .attribute(
            AttributeSchema::new("mtime", AttributeType::Timestamp)
                .with_description("File last modified date/time, according to the server."),
        )
        .attribute(
            AttributeSchema::new("provided_mtime", AttributeType::Timestamp)
                .with_description("File last modified date/time, according to the client who set it."),
        )
        .attribute(
            AttributeSchema::new("crc32", AttributeType::String)
                .with_description("File CRC32 checksum. This is sometimes delayed, so if you get a blank response, wait and try again."),
        )
        .attribute(
            AttributeSchema::new("md5", AttributeType::String)
                .with_description("File MD5 checksum. This is sometimes delayed, so if you get a blank response, wait and try again."),
        )
        .attribute(
            AttributeSchema::new("sha256", AttributeType::String)
                .with_description("File SHA256 checksum."),
        )
        .attribute(
            AttributeSchema::new("mime_type", AttributeType::String)
                .with_description("MIME Type. This is determined by the filename extension and is not stored separately internally."),
        )
        .attribute(
            AttributeSchema::new("region", AttributeType::String)
                .with_description("Region location"),
        )
        .attribute(
            AttributeSchema::new("permissions", AttributeType::String)
                .with_description("A short string representing the current user's permissions."),
        )
        .attribute(
            AttributeSchema::new("is_locked", AttributeType::Bool)
                .with_description("Is this file locked?"),
        )
        .attribute(
            AttributeSchema::new("priority_color", AttributeType::String)
                .with_description("File/Folder priority color"),
        )
        .attribute(
            AttributeSchema::new("custom_metadata", AttributeType::map_of(AttributeType::String))
                .with_description("Custom metadata map of keys and values."),
        )
        .attribute(
            AttributeSchema::new("download_uri", AttributeType::String)
                .sensitive()
                .with_description("Link to download file. Provided only in response to a download request."),
        ),
    }
}
