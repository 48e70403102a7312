//! Credential lookup and field-copy payloads

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A credential as returned by lookups and searches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoFillCredential {
    pub database_id: String,
    pub uuid: String,
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub totp: String,
    pub icon: String,
    pub custom_fields: BTreeMap<String, String>,
    pub database_name: String,
    pub tags: Vec<String>,
    pub favourite: bool,
    pub notes: String,
    pub modified: String,
}

impl AutoFillCredential {
    pub fn has_totp(&self) -> bool {
        !self.totp.is_empty()
    }
}

/// Fields the host can place on the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WellKnownField {
    Username,
    Password,
    Totp,
}

impl From<WellKnownField> for u8 {
    fn from(field: WellKnownField) -> Self {
        match field {
            WellKnownField::Username => 0,
            WellKnownField::Password => 1,
            WellKnownField::Totp => 2,
        }
    }
}

impl TryFrom<u8> for WellKnownField {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WellKnownField::Username),
            1 => Ok(WellKnownField::Password),
            2 => Ok(WellKnownField::Totp),
            other => Err(format!("unknown field: {}", other)),
        }
    }
}

impl std::str::FromStr for WellKnownField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "username" => Ok(WellKnownField::Username),
            "password" => Ok(WellKnownField::Password),
            "totp" => Ok(WellKnownField::Totp),
            other => Err(format!("unknown field: {}", other)),
        }
    }
}

impl std::fmt::Display for WellKnownField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WellKnownField::Username => write!(f, "username"),
            WellKnownField::Password => write!(f, "password"),
            WellKnownField::Totp => write!(f, "totp"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyFieldRequest {
    pub database_id: String,
    pub node_id: String,
    pub field: WellKnownField,
    /// Set when the user asked for the TOTP code directly rather than as a
    /// side effect of autofill
    pub explicit_totp: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CopyFieldResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsForUrlRequest {
    pub url: String,
    pub skip: u32,
    pub take: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CredentialsForUrlResponse {
    pub unlocked_database_count: u32,
    pub results: Vec<AutoFillCredential>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub skip: u32,
    pub take: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResponse {
    pub results: Vec<AutoFillCredential>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetIconRequest {
    pub database_id: String,
    pub node_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetIconResponse {
    /// Icon image as a data URL or base64 PNG
    pub icon: String,
}
