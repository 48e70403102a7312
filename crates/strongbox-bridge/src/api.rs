//! Typed operations against the Strongbox application
//!
//! Every method maps to one encrypted exchange with the native host. Failures
//! are logged and collapse to `None` (or `false`); the error kind never
//! reaches the caller.

use crate::config::{BridgeConfig, DEFAULT_CREDENTIAL_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT_MS};
use crate::crypto::{EncryptionEngine, NaClEngine};
use crate::keys::KeyAgreement;
use crate::ports::NativeTransport;
use crate::protocol::EnvelopeProtocol;
use crate::transport::NativeHostTransport;
use crate::{BridgeError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use strongbox_types::*;
use tracing::{debug, warn};

/// Client for the Strongbox native host.
///
/// Holds the session key pair and the cached host key. Build one per process
/// and share it behind an `Arc`.
pub struct NativeAppApi {
    protocol: EnvelopeProtocol,
    page_size: u32,
}

impl NativeAppApi {
    pub fn new(
        transport: Arc<dyn NativeTransport>,
        engine: Arc<dyn EncryptionEngine>,
        request_timeout: Option<Duration>,
        page_size: u32,
    ) -> Self {
        let keys = KeyAgreement::new(engine);
        Self {
            protocol: EnvelopeProtocol::new(keys, transport, request_timeout),
            page_size,
        }
    }

    /// NaCl engine, default timeout and page size
    pub fn with_defaults(transport: Arc<dyn NativeTransport>) -> Self {
        Self::new(
            transport,
            Arc::new(NaClEngine::new()),
            Some(Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS)),
            DEFAULT_CREDENTIAL_PAGE_SIZE,
        )
    }

    /// Talk to the installed native host described by `config`
    pub fn from_config(config: &BridgeConfig) -> Result<Self> {
        let transport = NativeHostTransport::from_config(config)?;
        Ok(Self::new(
            Arc::new(transport),
            Arc::new(NaClEngine::new()),
            config.request_timeout(),
            config.credential_results_page_size,
        ))
    }

    /// Session public key; stable for the lifetime of this instance
    pub fn public_key(&self) -> PublicKey {
        self.protocol.keys().public_key()
    }

    pub fn public_key_base64(&self) -> String {
        self.protocol.keys().public_key_base64()
    }

    /// Credentials fetched per page when no explicit `take` is given
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Host key learned from the most recent good reply
    pub async fn peer_key(&self) -> Option<PublicKey> {
        self.protocol.keys().peer_key().await
    }

    pub async fn has_peer_key(&self) -> bool {
        self.peer_key().await.is_some()
    }

    async fn call<P, R>(&self, payload: &P, message_type: MessageType) -> Option<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        settle(
            message_type,
            self.protocol.round_trip(payload, message_type).await,
        )
    }

    /// Application status and database list.
    ///
    /// Always hits the host, and refreshes the cached host key from the reply.
    pub async fn get_status(&self) -> Option<GetStatusResponse> {
        settle(MessageType::Status, self.protocol.bootstrap().await)
    }

    pub async fn unlock_database(&self, database_id: &str) -> Option<UnlockResponse> {
        let request = UnlockRequest {
            database_id: database_id.to_string(),
        };
        self.call(&request, MessageType::Unlock).await
    }

    pub async fn lock_database(&self, database_id: &str) -> Option<LockResponse> {
        let request = LockRequest {
            database_id: database_id.to_string(),
        };
        self.call(&request, MessageType::Lock).await
    }

    pub async fn create_entry(&self, request: &CreateEntryRequest) -> Option<CreateEntryResponse> {
        self.call(request, MessageType::CreateEntry).await
    }

    pub async fn get_groups(&self, request: &GetGroupsRequest) -> Option<GetGroupsResponse> {
        self.call(request, MessageType::GetGroups).await
    }

    pub async fn generate_password(&self) -> Option<GeneratePasswordResponse> {
        self.call(&GeneratePasswordRequest {}, MessageType::GeneratePassword)
            .await
    }

    pub async fn generate_password_v2(&self) -> Option<GeneratePasswordV2Response> {
        self.call(&GeneratePasswordRequest {}, MessageType::GeneratePasswordV2)
            .await
    }

    pub async fn get_new_entry_defaults(
        &self,
        request: &GetNewEntryDefaultsRequest,
    ) -> Option<GetNewEntryDefaultsResponse> {
        self.call(request, MessageType::GetNewEntryDefaults).await
    }

    pub async fn get_new_entry_defaults_v2(
        &self,
        request: &GetNewEntryDefaultsRequest,
    ) -> Option<GetNewEntryDefaultsV2Response> {
        self.call(request, MessageType::GetNewEntryDefaultsV2).await
    }

    /// Ask the application to copy a field of an entry to the clipboard
    pub async fn copy_field(
        &self,
        database_id: &str,
        node_id: &str,
        field: WellKnownField,
        explicit_totp: bool,
    ) -> Option<CopyFieldResponse> {
        let request = CopyFieldRequest {
            database_id: database_id.to_string(),
            node_id: node_id.to_string(),
            field,
            explicit_totp,
        };
        self.call(&request, MessageType::CopyField).await
    }

    /// First page of credentials matching `url`
    pub async fn credentials_for_url(&self, url: &str) -> Option<CredentialsForUrlResponse> {
        self.credentials_for_url_page(url, 0, self.page_size).await
    }

    pub async fn credentials_for_url_page(
        &self,
        url: &str,
        skip: u32,
        take: u32,
    ) -> Option<CredentialsForUrlResponse> {
        let request = CredentialsForUrlRequest {
            url: url.to_string(),
            skip,
            take,
        };
        self.call(&request, MessageType::GetCredentialsForUrl).await
    }

    pub async fn search(&self, query: &str, skip: u32, take: u32) -> Option<SearchResponse> {
        let request = SearchRequest {
            query: query.to_string(),
            skip,
            take,
        };
        self.call(&request, MessageType::Search).await
    }

    pub async fn get_icon(&self, database_id: &str, node_id: &str) -> Option<GetIconResponse> {
        let request = GetIconRequest {
            database_id: database_id.to_string(),
            node_id: node_id.to_string(),
        };
        self.call(&request, MessageType::GetIcon).await
    }

    /// Ask the host to bring the application up. Unencrypted.
    pub async fn launch_strongbox(&self) -> bool {
        match self.try_launch().await {
            Ok(launched) => launched,
            Err(e) => {
                warn!("Launch request failed: {}", e);
                false
            }
        }
    }

    async fn try_launch(&self) -> Result<bool> {
        let reply = self
            .protocol
            .send_raw(serde_json::to_value(LaunchRequest::default())?)
            .await?;
        let response: ResponseEnvelope = serde_json::from_value(reply)
            .map_err(|e| BridgeError::Transport(format!("malformed launch reply: {}", e)))?;
        Ok(response.success)
    }
}

fn settle<R>(message_type: MessageType, result: Result<R>) -> Option<R> {
    match result {
        Ok(response) => Some(response),
        Err(e @ (BridgeError::HostRejected | BridgeError::Timeout(_))) => {
            debug!("{} returned nothing: {}", message_type, e);
            None
        }
        Err(e) => {
            warn!("{} failed: {}", message_type, e);
            None
        }
    }
}
