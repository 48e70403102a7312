//! Entry creation, group listing and password generation payloads

use super::AutoFillCredential;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub database_id: String,
    pub group_id: Option<String>,
    pub icon: Option<String>,
    pub title: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateEntryResponse {
    pub uuid: Option<String>,
    pub error: Option<String>,
    pub credential: Option<AutoFillCredential>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetGroupsRequest {
    pub database_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupSummary {
    pub title: String,
    pub node_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetGroupsResponse {
    pub error: Option<String>,
    pub groups: Vec<GroupSummary>,
}

/// The host generates with its own configured policy; the request is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratePasswordRequest {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratePasswordResponse {
    pub password: String,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordStrength {
    pub entropy: f64,
    pub category: String,
    pub summary_string: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordAndStrength {
    pub password: String,
    pub strength: PasswordStrength,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratePasswordV2Response {
    pub password: PasswordAndStrength,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetNewEntryDefaultsRequest {
    pub database_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetNewEntryDefaultsResponse {
    pub error: Option<String>,
    pub username: Option<String>,
    pub most_popular_usernames: Option<Vec<String>>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetNewEntryDefaultsV2Response {
    pub error: Option<String>,
    pub username: Option<String>,
    pub most_popular_usernames: Option<Vec<String>>,
    pub password: Option<PasswordAndStrength>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_entry_request_keeps_nulls() {
        let request = CreateEntryRequest {
            database_id: "db1".into(),
            title: Some("Example".into()),
            ..Default::default()
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["databaseId"], json!("db1"));
        assert_eq!(value["title"], json!("Example"));
        assert_eq!(value["groupId"], json!(null));
    }

    #[test]
    fn test_generate_password_request_is_empty_object() {
        assert_eq!(
            serde_json::to_value(GeneratePasswordRequest::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_v2_password_strength() {
        let response: GeneratePasswordV2Response = serde_json::from_value(json!({
            "password": {
                "password": "correct-horse",
                "strength": { "entropy": 72.5, "category": "strong", "summaryString": "72 bits" }
            },
            "alternatives": ["a", "b"]
        }))
        .unwrap();

        assert_eq!(response.password.password, "correct-horse");
        assert_eq!(response.password.strength.category, "strong");
        assert_eq!(response.alternatives.len(), 2);
    }
}
