//! automation schema definition
//!
//! API: `/automations`. `schedule` and `value` are free-form documents.

use super::{FilesSchemaConfig, Identity, Lookup, Routes, id_attribute, int_list, string_list};
use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

/// Returns the schema config for files_automation
pub fn automation_config() -> FilesSchemaConfig {
    FilesSchemaConfig {
        type_name: "files_automation",
        display_name: "Automation",
        identity: Identity::Id,
        lookup: Lookup::Find,
        routes: Routes::collection("automations", "automations/{id}"),
        has_data_source: true,
        has_resource: true,
        schema: Schema::new("files_automation")
        .with_description("Automations allow you to automate workflows on your Files.com site.")
        .attribute(id_attribute("Automation"))
        .attribute(
            AttributeSchema::new("automation", AttributeType::String)
                .required()
                .one_of(&[
                    "create_folder",
                    "delete_file",
                    "copy_file",
                    "move_file",
                    "as2_send",
                    "run_sync",
                    "import_file",
                ])
                .with_description("Automation type"),
        )
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .computed()
                .with_description("Name for this automation."),
        )
        .attribute(
            AttributeSchema::new("description", AttributeType::String)
                .computed()
                .with_description("Description for the this Automation."),
        )
        .attribute(
            AttributeSchema::new("disabled", AttributeType::Bool)
                .computed()
                .with_description("If true, this automation will not run."),
        )
        .attribute(
            AttributeSchema::new("trigger", AttributeType::String)
                .computed()
                .one_of(&["daily", "custom_schedule", "webhook", "email", "action", "interval"])
                .with_description("How this automation is triggered to run."),
        )
        .attribute(
            AttributeSchema::new("trigger_actions", string_list())
                .computed()
                .with_description("If trigger is `action`, this is the list of action types on which to trigger the automation."),
        )
        .attribute(
            AttributeSchema::new("interval", AttributeType::String)
                .computed()
                .with_description("If trigger is `daily`, this specifies how often to run this automation."),
        )
        .attribute(
            AttributeSchema::new("schedule", AttributeType::Dynamic)
                .computed()
                .with_description("If trigger is `custom_schedule`, Custom schedule description for when the automation should be run."),
        )
        .attribute(
            AttributeSchema::new("path", AttributeType::String)
                .computed()
                .path()
                .with_description("Path on which this Automation runs."),
        )
        .attribute(
            AttributeSchema::new("source", AttributeType::String)
                .computed()
                .with_description("Source path. Supports globs, except on remote mounts."),
        )
        .attribute(
            AttributeSchema::new("destinations", string_list())
                .computed()
                .with_description("Destination paths"),
        )
        .attribute(
            AttributeSchema::new("destination_replace_from", AttributeType::String)
                .computed()
                .with_description("If set, this string in the destination path will be replaced with the value in `destination_replace_to`."),
        )
        .attribute(
            AttributeSchema::new("destination_replace_to", AttributeType::String)
                .computed()
                .with_description("If set, this string will replace the value `destination_replace_from` in the destination filename."),
        )
        .attribute(
            AttributeSchema::new("user_ids", int_list())
                .computed()
                .with_description("IDs of Users for the Automation (i.e. who to Request File from)"),
        )
        .attribute(
            AttributeSchema::new("group_ids", int_list())
                .computed()
                .with_description("IDs of Groups for the Automation (i.e. who to Request File from)"),
        )
        .attribute(
            AttributeSchema::new("value", AttributeType::Dynamic)
                .computed()
                .with_description("A Hash of attributes specific to the automation type."),
        )
        .attribute(
            AttributeSchema::new("deleted", AttributeType::Bool)
                .read_only()
                .with_description("Indicates if the automation has been deleted."),
        )
        .attribute(
            AttributeSchema::new("last_modified_at", AttributeType::Timestamp)
                .read_only()
                .with_description("Time when automation was last modified. Does not change for name or description updates."),
        ),
    }
}
