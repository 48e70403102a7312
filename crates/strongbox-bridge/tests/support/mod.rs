//! In-process stand-in for the Strongbox native host

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use strongbox_bridge::crypto::{EncryptionEngine, NaClEngine};
use strongbox_bridge::{encoding, BridgeError, NativeTransport, Result};
use strongbox_types::{
    DatabaseSummary, EncryptedMessage, GetStatusResponse, KeyPair, MessageType, PublicKey,
    RequestEnvelope, ResponseEnvelope, ServerSettings,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    /// Answer every request properly
    Normal,
    /// Reply `success: false`
    Reject,
    /// Flip one ciphertext byte in every sealed reply
    Tamper,
    /// Fail at the transport, as if the host were not installed
    Down,
}

pub struct SimulatedHost {
    engine: NaClEngine,
    /// Every key pair the host has used, newest last
    key_pairs: Mutex<Vec<KeyPair>>,
    rotate_each_message: bool,
    mode: Mutex<HostMode>,
    delay: Mutex<Option<Duration>>,
    /// Replaces the status body sent in reply to a probe
    status_override: Mutex<Option<Value>>,
    databases: Vec<DatabaseSummary>,
    pub status_probes: AtomicUsize,
    pub encrypted_requests: AtomicUsize,
    pub launches: AtomicUsize,
    pub client_keys: Mutex<HashSet<String>>,
    pub last_request: Mutex<Option<Value>>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        let engine = NaClEngine::new();
        let first = engine.generate_keypair();
        Self {
            engine,
            key_pairs: Mutex::new(vec![first]),
            rotate_each_message: false,
            mode: Mutex::new(HostMode::Normal),
            delay: Mutex::new(None),
            status_override: Mutex::new(None),
            databases: vec![
                DatabaseSummary {
                    uuid: "db1".to_string(),
                    nick_name: "Personal".to_string(),
                    locked: false,
                    auto_fill_enabled: true,
                    include_fav_icon_for_new_entries: true,
                },
                DatabaseSummary {
                    uuid: "db2".to_string(),
                    nick_name: "Work".to_string(),
                    locked: true,
                    auto_fill_enabled: false,
                    include_fav_icon_for_new_entries: false,
                },
            ],
            status_probes: AtomicUsize::new(0),
            encrypted_requests: AtomicUsize::new(0),
            launches: AtomicUsize::new(0),
            client_keys: Mutex::new(HashSet::new()),
            last_request: Mutex::new(None),
        }
    }

    /// Generate a fresh host key after every encrypted request
    pub fn rotating() -> Self {
        Self {
            rotate_each_message: true,
            ..Self::new()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        let host = Self::new();
        host.set_delay(Some(delay));
        host
    }

    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    /// Answer status probes with `payload` instead of the database list
    pub fn set_status_payload(&self, payload: Value) {
        *self.status_override.lock().unwrap() = Some(payload);
    }

    pub fn set_mode(&self, mode: HostMode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn databases(&self) -> &[DatabaseSummary] {
        &self.databases
    }

    pub fn current_public_key(&self) -> PublicKey {
        self.newest().public_key
    }

    pub fn status_probes(&self) -> usize {
        self.status_probes.load(Ordering::SeqCst)
    }

    pub fn encrypted_requests(&self) -> usize {
        self.encrypted_requests.load(Ordering::SeqCst)
    }

    fn newest(&self) -> KeyPair {
        self.key_pairs
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("host always has a key pair")
    }

    fn status_payload(&self) -> Value {
        if let Some(payload) = self.status_override.lock().unwrap().clone() {
            return payload;
        }
        let status = GetStatusResponse {
            server_version_info: "Strongbox 1.0 (simulated)".to_string(),
            databases: self.databases.clone(),
            server_settings: ServerSettings {
                supports_create_new: true,
                ..Default::default()
            },
        };
        serde_json::to_value(status).unwrap()
    }

    /// Open a request sealed to any key this host has ever held
    fn open_request(&self, envelope: &RequestEnvelope, client_pk: &PublicKey) -> Result<Value> {
        let sealed = EncryptedMessage::new(
            encoding::decode_array(&envelope.nonce, "nonce")?,
            encoding::decode(&envelope.ciphertext)?,
            *client_pk,
        );

        let key_pairs = self.key_pairs.lock().unwrap().clone();
        for key_pair in key_pairs.iter().rev() {
            if let Ok(plaintext) = self.engine.decrypt(&sealed, client_pk, &key_pair.secret_key) {
                return Ok(serde_json::from_slice(&plaintext)?);
            }
        }
        Err(BridgeError::Decryption)
    }

    fn handle(&self, message_type: MessageType, request: Value) -> Value {
        match message_type {
            MessageType::CopyField | MessageType::Unlock | MessageType::Lock => {
                json!({ "success": true })
            }
            MessageType::GetCredentialsForUrl => json!({
                "unlockedDatabaseCount": 1,
                "results": [{
                    "databaseId": "db1",
                    "uuid": "e1",
                    "title": "Example",
                    "username": "alice",
                    "password": "hunter2",
                    "url": request["url"].clone(),
                }]
            }),
            // Everything else echoes the inner payload back
            _ => request,
        }
    }

    fn seal_reply(&self, payload: &Value, client_pk: &PublicKey, tamper: bool) -> Value {
        let host = self.newest();
        let mut sealed = self
            .engine
            .encrypt(payload.to_string().as_bytes(), client_pk, &host.secret_key)
            .unwrap();
        if tamper {
            sealed.ciphertext[0] ^= 0x01;
        }

        serde_json::to_value(ResponseEnvelope {
            success: true,
            message: encoding::encode(&sealed.ciphertext),
            nonce: encoding::encode(&sealed.nonce),
            server_public_key: encoding::encode(&host.public_key),
        })
        .unwrap()
    }
}

#[async_trait]
impl NativeTransport for SimulatedHost {
    async fn send(&self, message: Value) -> Result<Value> {
        let mode = *self.mode.lock().unwrap();
        if mode == HostMode::Down {
            return Err(BridgeError::Transport("native host not running".into()));
        }

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if message.get("launch").is_some() {
            self.launches.fetch_add(1, Ordering::SeqCst);
            return Ok(json!({ "success": true }));
        }

        let envelope: RequestEnvelope = serde_json::from_value(message)?;
        self.client_keys
            .lock()
            .unwrap()
            .insert(envelope.client_public_key.clone());

        if mode == HostMode::Reject {
            return Ok(serde_json::to_value(ResponseEnvelope::failure())?);
        }

        let client_pk: PublicKey =
            encoding::decode_array(&envelope.client_public_key, "clientPublicKey")?;

        let payload = if envelope.is_status_probe() {
            self.status_probes.fetch_add(1, Ordering::SeqCst);
            self.status_payload()
        } else {
            self.encrypted_requests.fetch_add(1, Ordering::SeqCst);
            let request = match self.open_request(&envelope, &client_pk) {
                Ok(request) => request,
                Err(_) => return Ok(serde_json::to_value(ResponseEnvelope::failure())?),
            };
            *self.last_request.lock().unwrap() = Some(request.clone());

            if self.rotate_each_message {
                let next = self.engine.generate_keypair();
                self.key_pairs.lock().unwrap().push(next);
            }
            self.handle(envelope.message_type, request)
        };

        Ok(self.seal_reply(&payload, &client_pk, mode == HostMode::Tamper))
    }
}
