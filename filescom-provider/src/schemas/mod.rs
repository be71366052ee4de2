//! Files.com entity schemas
//!
//! Each entity pairs its attribute schema with the API routes used to manage
//! it. Attribute names follow the API field names unless `provider_name`
//! says otherwise.

use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

pub mod api_key;
pub mod automation;
pub mod behavior;
pub mod bundle;
pub mod file;
pub mod folder;
pub mod group;
pub mod notification;
pub mod permission;
pub mod public_key;
pub mod site;
pub mod user;

/// How an instance is addressed in the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// Integer `id` attribute
    Id,
    /// String `path` attribute (files and folders)
    Path,
    /// A single object per site
    Singleton,
}

impl Identity {
    /// Attribute holding the identity, if any
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            Identity::Id => Some("id"),
            Identity::Path => Some("path"),
            Identity::Singleton => None,
        }
    }
}

/// How a single object is fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// `GET` on the find route
    Find,
    /// Page through the list route until the id matches (no find endpoint)
    ListScan,
}

/// Route templates relative to the API base; `{id}` is replaced by the identity
#[derive(Debug, Clone, Default)]
pub struct Routes {
    pub find: Option<&'static str>,
    pub list: Option<&'static str>,
    pub create: Option<&'static str>,
    pub update: Option<&'static str>,
    pub delete: Option<&'static str>,
    /// Extra query parameters sent with delete
    pub delete_params: &'static [(&'static str, &'static str)],
}

impl Routes {
    /// Standard REST collection: `<base>` and `<base>/{id}`
    pub const fn collection(base: &'static str, item: &'static str) -> Self {
        Self {
            find: Some(item),
            list: Some(base),
            create: Some(base),
            update: Some(item),
            delete: Some(item),
            delete_params: &[],
        }
    }
}

/// Files.com schema configuration
pub struct FilesSchemaConfig {
    /// Terraform type name (e.g., "files_user")
    pub type_name: &'static str,
    /// Name used in diagnostic summaries (e.g., "ApiKey")
    pub display_name: &'static str,
    pub identity: Identity,
    pub lookup: Lookup,
    pub routes: Routes,
    pub has_data_source: bool,
    pub has_resource: bool,
    /// Resource schema; the data source schema is derived from it
    pub schema: Schema,
}

impl FilesSchemaConfig {
    /// Type name without the provider prefix (e.g., "api_key")
    pub fn short_name(&self) -> &'static str {
        self.type_name
            .strip_prefix("files_")
            .unwrap_or(self.type_name)
    }

    /// Data source schema: the identity is required, everything else is
    /// computed. Retained attributes are never readable and are left out.
    pub fn data_source_schema(&self) -> Schema {
        let identity = self.identity.attribute();
        let mut schema = Schema::new(self.type_name);
        schema.description = self.schema.description.clone();
        for (name, attr) in &self.schema.attributes {
            if attr.retained {
                continue;
            }
            let mut attr = attr.clone();
            attr.requires_replace = false;
            attr.allowed_values = None;
            attr = if Some(name.as_str()) == identity {
                attr.required()
            } else {
                attr.read_only()
            };
            schema = schema.attribute(attr);
        }
        schema
    }
}

/// Integer identity attribute
pub fn id_attribute(entity: &str) -> AttributeSchema {
    AttributeSchema::new("id", AttributeType::Int)
        .read_only()
        .with_description(format!("{} ID", entity))
}

/// Path identity attribute; changing it creates a new object
pub fn path_attribute(desc: &str) -> AttributeSchema {
    AttributeSchema::new("path", AttributeType::String)
        .required()
        .path()
        .requires_replace()
        .with_description(desc)
}

/// Comma-separated id list as the API represents it on groups
pub fn id_list_string(name: &str, desc: &str) -> AttributeSchema {
    AttributeSchema::new(name, AttributeType::String)
        .computed()
        .with_description(desc)
}

/// List of integer ids
pub fn int_list() -> AttributeType {
    AttributeType::list_of(AttributeType::Int)
}

/// List of strings
pub fn string_list() -> AttributeType {
    AttributeType::list_of(AttributeType::String)
}

/// Returns every entity configuration
pub fn configs() -> Vec<FilesSchemaConfig> {
    vec![
        api_key::api_key_config(),
        automation::automation_config(),
        behavior::behavior_config(),
        bundle::bundle_config(),
        file::file_config(),
        folder::folder_config(),
        group::group_config(),
        notification::notification_config(),
        permission::permission_config(),
        public_key::public_key_config(),
        site::site_config(),
        user::user_config(),
    ]
}

/// Find a configuration by type name
pub fn config(type_name: &str) -> Option<FilesSchemaConfig> {
    configs().into_iter().find(|c| c.type_name == type_name)
}
