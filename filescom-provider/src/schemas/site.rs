//! site schema definition (data source only)
//!
//! API: `GET /site`

use super::{FilesSchemaConfig, Identity, Lookup, Routes};
use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

/// Returns the schema config for files_site
pub fn site_config() -> FilesSchemaConfig {
    FilesSchemaConfig {
        type_name: "files_site",
        display_name: "Site",
        identity: Identity::Singleton,
        lookup: Lookup::Find,
        routes: Routes {
            find: Some("site"),
            ..Routes::default()
        },
        has_data_source: true,
        has_resource: false,
        schema: Schema::new("files_site")
        .with_description("The Site is the top-level settings object of a Files.com account.")
        .attribute(AttributeSchema::new("id", AttributeType::Int).with_description("Site Id"))
        .attribute(AttributeSchema::new("name", AttributeType::String).with_description("Site name"))
        .attribute(
            AttributeSchema::new("subdomain", AttributeType::String)
                .with_description("Site subdomain"),
        )
        .attribute(
            AttributeSchema::new("domain", AttributeType::String)
                .with_description("Custom domain"),
        )
        .attribute(
            AttributeSchema::new("email", AttributeType::String)
                .with_description("Main email for this site"),
        )
        .attribute(
            AttributeSchema::new("language", AttributeType::String)
                .with_description("Site default language"),
        )
        .attribute(
            AttributeSchema::new("time_zone", AttributeType::String)
                .with_description("Site default time zone"),
        )
        .attribute(
            AttributeSchema::new("allowed_ips", AttributeType::String)
                .with_description("List of allowed IP addresses"),
        )
        .attribute(
            AttributeSchema::new("session_expiry", AttributeType::Dynamic)
                .with_description("Session expiry in hours"),
        )
        .attribute(
            AttributeSchema::new("require_2fa", AttributeType::Bool)
                .with_description("Require two-factor authentication for all users?"),
        )
        .attribute(
            AttributeSchema::new("sftp_enabled", AttributeType::Bool)
                .with_description("Is SFTP enabled?"),
        )
        .attribute(
            AttributeSchema::new("ftp_enabled", AttributeType::Bool)
                .with_description("Is FTP enabled?"),
        )
        .attribute(
            AttributeSchema::new("dav_enabled", AttributeType::Bool)
                .with_description("Is WebDAV enabled?"),
        )
        .attribute(
            AttributeSchema::new("user_count", AttributeType::Int)
                .with_description("Number of users on this site"),
        )
        .attribute(
            AttributeSchema::new("bundle_expiration", AttributeType::Int)
                .with_description("Site-wide Bundle expiration in days"),
        )
        .attribute(
            AttributeSchema::new("disk_usage_limit", AttributeType::Int)
                .with_description("Used storage limit in bytes"),
        )
        .attribute(
            AttributeSchema::new("created_at", AttributeType::Timestamp)
                .with_description("Time this site was created"),
        )
        .attribute(
            AttributeSchema::new("session_id", AttributeType::String)
                .with_provider_name("session")
                .with_description("Current session identifier, if any"),
        ),
    }
}
