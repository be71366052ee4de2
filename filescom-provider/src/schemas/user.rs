//! user schema definition
//!
//! API: `/users`

use super::{FilesSchemaConfig, Identity, Lookup, Routes, id_attribute, int_list};
use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

/// Returns the schema config for files_user
pub fn user_config() -> FilesSchemaConfig {
    FilesSchemaConfig {
        type_name: "files_user",
        display_name: "User",
        identity: Identity::Id,
        lookup: Lookup::Find,
        routes: Routes::collection("users", "users/{id}"),
        has_data_source: true,
        has_resource: true,
        schema: Schema::new("files_user")
        .with_description("A User is an account that can log in to a Files.com site.")
        .attribute(id_attribute("User"))
        .attribute(
            AttributeSchema::new("username", AttributeType::String)
                .required()
                .with_description("User's username"),
        )
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .computed()
                .with_description("User's full name"),
        )
        .attribute(
            AttributeSchema::new("email", AttributeType::String)
                .computed()
                .with_description("User email address"),
        )
        .attribute(
            AttributeSchema::new("company", AttributeType::String)
                .computed()
                .with_description("User's company"),
        )
        .attribute(
            AttributeSchema::new("notes", AttributeType::String)
                .computed()
                .with_description("Any internal notes on the user"),
        )
        .attribute(
            AttributeSchema::new("password", AttributeType::String)
                .sensitive()
                .retained()
                .with_description("User password. Never returned by the API."),
        )
        .attribute(
            AttributeSchema::new("authentication_method", AttributeType::String)
                .computed()
                .one_of(&["password", "sso", "none", "email_signup", "password_with_imported_hash"])
                .with_description("How is this user authenticated?"),
        )
        .attribute(
            AttributeSchema::new("group_ids", AttributeType::String)
                .computed()
                .with_description("Comma-separated list of group IDs of which this user is a member"),
        )
        .attribute(
            AttributeSchema::new("admin_group_ids", int_list())
                .read_only()
                .with_description("List of group IDs of which this user is an administrator"),
        )
        .attribute(
            AttributeSchema::new("user_root", AttributeType::String)
                .computed()
                .with_description("Root folder for FTP (and optionally SFTP if the appropriate site-wide setting is set)"),
        )
        .attribute(
            AttributeSchema::new("allowed_ips", AttributeType::String)
                .computed()
                .with_description("A list of allowed IPs if applicable. Newline delimited"),
        )
        .attribute(
            AttributeSchema::new("time_zone", AttributeType::String)
                .computed()
                .with_description("User time zone"),
        )
        .attribute(
            AttributeSchema::new("language", AttributeType::String)
                .computed()
                .with_description("Preferred language"),
        )
        .attribute(
            AttributeSchema::new("require_2fa", AttributeType::String)
                .computed()
                .one_of(&["use_system_setting", "always_require", "never_require"])
                .with_description("2FA required setting"),
        )
        .attribute(
            AttributeSchema::new("require_password_change", AttributeType::Bool)
                .computed()
                .with_description("Is a password change required upon next user login?"),
        )
        .attribute(
            AttributeSchema::new("site_admin", AttributeType::Bool)
                .computed()
                .with_description("Is the user an administrator for this site?"),
        )
        .attribute(
            AttributeSchema::new("readonly_site_admin", AttributeType::Bool)
                .computed()
                .with_description("Is the user an allowed to view all (non-billing) site configuration for this site?"),
        )
        .attribute(
            AttributeSchema::new("self_managed", AttributeType::Bool)
                .computed()
                .with_description("Does this user manage its own credentials or is it a shared/bot user?"),
        )
        .attribute(
            AttributeSchema::new("disabled", AttributeType::Bool)
                .computed()
                .with_description("Is user disabled? Disabled users cannot log in, and do not count for billing purposes."),
        )
        .attribute(
            AttributeSchema::new("disabled_expired_or_inactive", AttributeType::Bool)
                .read_only()
                .with_description("Computed property that returns true if user disabled or expired or inactive."),
        )
        .attribute(
            AttributeSchema::new("ftp_permission", AttributeType::Bool)
                .computed()
                .with_description("Can the user access with FTP/FTPS?"),
        )
        .attribute(
            AttributeSchema::new("sftp_permission", AttributeType::Bool)
                .computed()
                .with_description("Can the user access with SFTP?"),
        )
        .attribute(
            AttributeSchema::new("dav_permission", AttributeType::Bool)
                .computed()
                .with_description("Can the user connect with WebDAV?"),
        )
        .attribute(
            AttributeSchema::new("restapi_permission", AttributeType::Bool)
                .computed()
                .with_description("Can this user access the Web app, Desktop app, SDKs, or REST API?"),
        )
        .attribute(
            AttributeSchema::new("bypass_site_allowed_ips", AttributeType::Bool)
                .computed()
                .with_description("Allow this user to skip site-wide IP blacklists?"),
        )
        .attribute(
            AttributeSchema::new("header_text", AttributeType::String)
                .computed()
                .with_description("Text to display to the user in the header of the UI"),
        )
        .attribute(
            AttributeSchema::new("public_keys_count", AttributeType::Int)
                .read_only()
                .with_description("Number of public keys associated with this user"),
        )
        .attribute(
            AttributeSchema::new("created_at", AttributeType::Timestamp)
                .read_only()
                .with_description("When this user was created"),
        )
        .attribute(
            AttributeSchema::new("last_login_at", AttributeType::Timestamp)
                .read_only()
                .with_description("User's last login time"),
        )
        .attribute(
            AttributeSchema::new("password_set_at", AttributeType::Timestamp)
                .read_only()
                .with_description("Last time the user's password was set"),
        )
        .attribute(
            AttributeSchema::new("authenticate_until", AttributeType::Timestamp)
                .computed()
                .with_description("Scheduled Date/Time at which user will be deactivated"),
        ),
    }
}
