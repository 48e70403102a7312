//! Status and database lock/unlock payloads

use serde::{Deserialize, Serialize};

/// Summary of a database known to the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseSummary {
    pub uuid: String,
    pub nick_name: String,
    pub locked: bool,
    pub auto_fill_enabled: bool,
    pub include_fav_icon_for_new_entries: bool,
}

/// Feature flags the host advertises
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    pub supports_create_new: bool,
    pub markdown_notes: bool,
    pub colorize_passwords: bool,
    pub color_blind_palette: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetStatusResponse {
    pub server_version_info: String,
    pub databases: Vec<DatabaseSummary>,
    pub server_settings: ServerSettings,
}

impl GetStatusResponse {
    pub fn unlocked_count(&self) -> usize {
        self.databases.iter().filter(|db| !db.locked).count()
    }

    pub fn find_database(&self, uuid: &str) -> Option<&DatabaseSummary> {
        self.databases.iter().find(|db| db.uuid == uuid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRequest {
    pub database_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnlockResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockRequest {
    pub database_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LockResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_from_host_json() {
        let status: GetStatusResponse = serde_json::from_value(json!({
            "serverVersionInfo": "Strongbox 1.60",
            "databases": [
                { "uuid": "db1", "nickName": "Personal", "locked": false, "autoFillEnabled": true },
                { "uuid": "db2", "nickName": "Work", "locked": true, "autoFillEnabled": false }
            ],
            "serverSettings": { "supportsCreateNew": true, "markdownNotes": true }
        }))
        .unwrap();

        assert_eq!(status.databases.len(), 2);
        assert_eq!(status.unlocked_count(), 1);
        assert_eq!(status.find_database("db2").unwrap().nick_name, "Work");
        assert!(status.server_settings.supports_create_new);
        assert!(!status.server_settings.color_blind_palette);
    }
}
