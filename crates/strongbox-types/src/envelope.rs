//! Encrypted envelope protocol
//!
//! Every request to the native host travels inside a [`RequestEnvelope`] and
//! every reply comes back as a [`ResponseEnvelope`]. Binary fields are base64
//! strings; the inner payload is JSON sealed with a NaCl box.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message type tags understood by the native host.
///
/// The integer values are a compatibility contract with the host and follow
/// its declaration order. Do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum MessageType {
    Status,
    Search,
    GetCredentialsForUrl,
    CopyField,
    Lock,
    Unlock,
    CreateEntry,
    GetGroups,
    GetNewEntryDefaults,
    GeneratePassword,
    GetIcon,
    GeneratePasswordV2,
    GetNewEntryDefaultsV2,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown message type tag: {0}")]
pub struct UnknownMessageType(pub u8);

impl From<MessageType> for u8 {
    fn from(tag: MessageType) -> Self {
        match tag {
            MessageType::Status => 0,
            MessageType::Search => 1,
            MessageType::GetCredentialsForUrl => 2,
            MessageType::CopyField => 3,
            MessageType::Lock => 4,
            MessageType::Unlock => 5,
            MessageType::CreateEntry => 6,
            MessageType::GetGroups => 7,
            MessageType::GetNewEntryDefaults => 8,
            MessageType::GeneratePassword => 9,
            MessageType::GetIcon => 10,
            MessageType::GeneratePasswordV2 => 11,
            MessageType::GetNewEntryDefaultsV2 => 12,
        }
    }
}

impl TryFrom<u8> for MessageType {
    type Error = UnknownMessageType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => MessageType::Status,
            1 => MessageType::Search,
            2 => MessageType::GetCredentialsForUrl,
            3 => MessageType::CopyField,
            4 => MessageType::Lock,
            5 => MessageType::Unlock,
            6 => MessageType::CreateEntry,
            7 => MessageType::GetGroups,
            8 => MessageType::GetNewEntryDefaults,
            9 => MessageType::GeneratePassword,
            10 => MessageType::GetIcon,
            11 => MessageType::GeneratePasswordV2,
            12 => MessageType::GetNewEntryDefaultsV2,
            other => return Err(UnknownMessageType(other)),
        })
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MessageType::Status => "status",
            MessageType::Search => "search",
            MessageType::GetCredentialsForUrl => "getCredentialsForUrl",
            MessageType::CopyField => "copyField",
            MessageType::Lock => "lock",
            MessageType::Unlock => "unlock",
            MessageType::CreateEntry => "createEntry",
            MessageType::GetGroups => "getGroups",
            MessageType::GetNewEntryDefaults => "getNewEntryDefaults",
            MessageType::GeneratePassword => "generatePassword",
            MessageType::GetIcon => "getIcon",
            MessageType::GeneratePasswordV2 => "generatePasswordV2",
            MessageType::GetNewEntryDefaultsV2 => "getNewEntryDefaultsV2",
        };
        write!(f, "{}", name)
    }
}

/// `message` value sent with the unencrypted status probe
pub const STATUS_PROBE_PLACEHOLDER: &str = "message";

/// Client -> host envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// Client X25519 public key (base64)
    pub client_public_key: String,
    /// Request nonce (base64), empty on the status probe
    pub nonce: String,
    /// Sealed inner payload (base64), a fixed placeholder on the status probe
    #[serde(rename = "message")]
    pub ciphertext: String,
    pub message_type: MessageType,
}

impl RequestEnvelope {
    /// The unencrypted status probe used to learn the host's public key.
    ///
    /// Only `clientPublicKey` and `messageType` carry meaning; the host
    /// answers with an envelope sealed to the client key. `message` carries
    /// the literal placeholder the host has always been sent.
    pub fn status_probe(client_public_key: String) -> Self {
        Self {
            client_public_key,
            nonce: String::new(),
            ciphertext: STATUS_PROBE_PLACEHOLDER.to_string(),
            message_type: MessageType::Status,
        }
    }

    pub fn is_status_probe(&self) -> bool {
        self.message_type == MessageType::Status && self.nonce.is_empty()
    }
}

/// Host -> client envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub success: bool,
    /// Sealed inner payload (base64)
    #[serde(default)]
    pub message: String,
    /// Response nonce (base64)
    #[serde(default)]
    pub nonce: String,
    /// Host X25519 public key (base64)
    #[serde(default)]
    pub server_public_key: String,
}

impl ResponseEnvelope {
    pub fn failure() -> Self {
        Self {
            success: false,
            message: String::new(),
            nonce: String::new(),
            server_public_key: String::new(),
        }
    }
}

/// Raw, unencrypted request asking the host to bring the application up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRequest {
    pub launch: bool,
}

impl Default for LaunchRequest {
    fn default() -> Self {
        Self { launch: true }
    }
}
