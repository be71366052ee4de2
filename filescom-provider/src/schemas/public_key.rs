//! public_key schema definition
//!
//! API: `/public_keys`

use super::{FilesSchemaConfig, Identity, Lookup, Routes, id_attribute};
use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

/// Returns the schema config for files_public_key
pub fn public_key_config() -> FilesSchemaConfig {
    FilesSchemaConfig {
        type_name: "files_public_key",
        display_name: "PublicKey",
        identity: Identity::Id,
        lookup: Lookup::Find,
        routes: Routes::collection("public_keys", "public_keys/{id}"),
        has_data_source: true,
        has_resource: true,
        schema: Schema::new("files_public_key")
        .with_description("Public keys are used by Users who want to connect via SFTP/SSH.")
        .attribute(id_attribute("Public key"))
        .attribute(
            AttributeSchema::new("title", AttributeType::String)
                .required()
                .with_description("Public key title"),
        )
        .attribute(
            AttributeSchema::new("public_key", AttributeType::String)
                .required()
                .requires_replace()
                .with_description("Actual contents of SSH key."),
        )
        .attribute(
            AttributeSchema::new("user_id", AttributeType::Int)
                .computed()
                .requires_replace()
                .with_description("User ID this public key is associated with"),
        )
        .attribute(
            AttributeSchema::new("username", AttributeType::String)
                .read_only()
                .with_description("Username of the user this public key is associated with"),
        )
        .attribute(
            AttributeSchema::new("fingerprint", AttributeType::String)
                .read_only()
                .with_description("Public key fingerprint (MD5)"),
        )
        .attribute(
            AttributeSchema::new("fingerprint_sha256", AttributeType::String)
                .read_only()
                .with_description("Public key fingerprint (SHA256)"),
        )
        .attribute(
            AttributeSchema::new("status", AttributeType::String)
                .read_only()
                .with_description("Can be invalid, not_generated, generating, complete"),
        )
        .attribute(
            AttributeSchema::new("last_login_at", AttributeType::Timestamp)
                .read_only()
                .with_description("Key's most recent login time via SFTP"),
        )
        .attribute(
            AttributeSchema::new("created_at", AttributeType::Timestamp)
                .read_only()
                .with_description("Public key created at date/time"),
        ),
    }
}
