//! group schema definition
//!
//! API: `/groups`

use super::{FilesSchemaConfig, Identity, Lookup, Routes, id_attribute, id_list_string};
use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

/// Returns the schema config for files_group
pub fn group_config() -> FilesSchemaConfig {
    FilesSchemaConfig {
        type_name: "files_group",
        display_name: "Group",
        identity: Identity::Id,
        lookup: Lookup::Find,
        routes: Routes::collection("groups", "groups/{id}"),
        has_data_source: true,
        has_resource: true,
        schema: Schema::new("files_group")
        .with_description("Groups are a powerful tool for permissions and user management on Files.com.")
        .attribute(id_attribute("Group"))
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .with_description("Group name"),
        )
        .attribute(
            AttributeSchema::new("notes", AttributeType::String)
                .computed()
                .with_description("Notes about this group"),
        )
        .attribute(id_list_string(
            "user_ids",
            "Comma-delimited list of user IDs who belong to this group",
        ))
        .attribute(id_list_string(
            "admin_ids",
            "Comma-delimited list of user IDs who are group administrators",
        ))
        .attribute(
            AttributeSchema::new("usernames", AttributeType::String)
                .read_only()
                .with_description("Comma-delimited list of usernames who belong to this group"),
        )
        .attribute(
            AttributeSchema::new("ftp_permission", AttributeType::Bool)
                .computed()
                .with_description("If true, users in this group can use FTP to login."),
        )
        .attribute(
            AttributeSchema::new("sftp_permission", AttributeType::Bool)
                .computed()
                .with_description("If true, users in this group can use SFTP to login."),
        )
        .attribute(
            AttributeSchema::new("dav_permission", AttributeType::Bool)
                .computed()
                .with_description("If true, users in this group can use WebDAV to login."),
        )
        .attribute(
            AttributeSchema::new("restapi_permission", AttributeType::Bool)
                .computed()
                .with_description("If true, users in this group can use the REST API to login."),
        )
        .attribute(
            AttributeSchema::new("allowed_ips", AttributeType::String)
                .computed()
                .with_description("A list of allowed IPs if applicable. Newline delimited"),
        ),
    }
}
