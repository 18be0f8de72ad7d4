//! Notification inbox types.

use serde::{Deserialize, Serialize};

/// One ref update notification, as listed by `list_notifications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRow {
    pub row_id: u64,
    pub timestamp: u64,
    #[serde(default)]
    pub remote: Option<String>,
    #[serde(default, rename = "old")]
    pub old_oid: Option<String>,
    #[serde(default, rename = "new")]
    pub new_oid: Option<String>,
}
