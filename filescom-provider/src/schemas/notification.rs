//! notification schema definition
//!
//! API: `/notifications`

use super::{FilesSchemaConfig, Identity, Lookup, Routes, id_attribute, int_list, string_list};
use filescom_core::schema::{AttributeSchema, AttributeType, Schema};

/// Returns the schema config for files_notification
pub fn notification_config() -> FilesSchemaConfig {
    FilesSchemaConfig {
        type_name: "files_notification",
        display_name: "Notification",
        identity: Identity::Id,
        lookup: Lookup::Find,
        routes: Routes::collection("notifications", "notifications/{id}"),
        has_data_source: true,
        has_resource: true,
        schema: Schema::new("files_notification")
        .with_description("Notifications send emails to users or groups when activity happens in a folder.")
        .attribute(id_attribute("Notification"))
        .attribute(
            AttributeSchema::new("path", AttributeType::String)
                .computed()
                .path()
                .requires_replace()
                .with_description("Folder path to notify on."),
        )
        .attribute(
            AttributeSchema::new("group_id", AttributeType::Int)
                .computed()
                .requires_replace()
                .with_description("ID of Group to receive notifications"),
        )
        .attribute(
            AttributeSchema::new("group_name", AttributeType::String)
                .read_only()
                .with_description("Group name, if a Group ID is set"),
        )
        .attribute(
            AttributeSchema::new("user_id", AttributeType::Int)
                .computed()
                .requires_replace()
                .with_description("Notification user ID"),
        )
        .attribute(
            AttributeSchema::new("username", AttributeType::String)
                .computed()
                .requires_replace()
                .with_description("Notification username"),
        )
        .attribute(
            AttributeSchema::new("triggering_group_ids", int_list())
                .computed()
                .with_description("Only notify on actions made by a member of one of the specified groups"),
        )
        .attribute(
            AttributeSchema::new("triggering_user_ids", int_list())
                .computed()
                .with_description("Only notify on actions made one of the specified users"),
        )
        .attribute(
            AttributeSchema::new("triggering_filenames", string_list())
                .computed()
                .with_description("Array of filenames (possibly with wildcards) to scope trigger"),
        )
        .attribute(
            AttributeSchema::new("trigger_by_share_recipients", AttributeType::Bool)
                .computed()
                .with_description("Notify when actions are performed by a share recipient?"),
        )
        .attribute(
            AttributeSchema::new("notify_user_actions", AttributeType::Bool)
                .computed()
                .with_description("If set to true, will send notifications about a user's own activity to that user."),
        )
        .attribute(
            AttributeSchema::new("notify_on_copy", AttributeType::Bool)
                .computed()
                .with_description("Trigger on files copied to this path?"),
        )
        .attribute(
            AttributeSchema::new("notify_on_delete", AttributeType::Bool)
                .computed()
                .with_description("Trigger on files deleted in this path?"),
        )
        .attribute(
            AttributeSchema::new("notify_on_download", AttributeType::Bool)
                .computed()
                .with_description("Trigger on files downloaded in this path?"),
        )
        .attribute(
            AttributeSchema::new("notify_on_move", AttributeType::Bool)
                .computed()
                .with_description("Trigger on files moved to this path?"),
        )
        .attribute(
            AttributeSchema::new("notify_on_upload", AttributeType::Bool)
                .computed()
                .with_description("Trigger on files created/uploaded/updated/changed in this path?"),
        )
        .attribute(
            AttributeSchema::new("recursive", AttributeType::Bool)
                .computed()
                .with_description("Apply notification recursively? This will enable notifications for each subfolder."),
        )
        .attribute(
            AttributeSchema::new("send_interval", AttributeType::String)
                .computed()
                .one_of(&["five_minutes", "fifteen_minutes", "hourly", "daily"])
                .with_description("The time interval that notifications are aggregated to"),
        )
        .attribute(
            AttributeSchema::new("message", AttributeType::String)
                .computed()
                .with_description("Custom message to include in notification emails"),
        )
        .attribute(
            AttributeSchema::new("suppressed_email", AttributeType::Bool)
                .read_only()
                .with_description("If true, it means that the recipient at this user's email address has manually unsubscribed from all emails, or had their email \"hard bounce\", which means that we are unable to send mail to this user's current email address."),
        )
        .attribute(
            AttributeSchema::new("unsubscribed", AttributeType::Bool)
                .read_only()
                .with_description("Is the user unsubscribed from this notification?"),
        )
        .attribute(
            AttributeSchema::new("unsubscribed_reason", AttributeType::String)
                .read_only()
                .with_description("The reason that the user unsubscribed"),
        ),
    }
}
