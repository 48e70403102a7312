//! Encrypted request/response envelope protocol
//!
//! Serializes typed inner payloads, seals them to the host's public key and
//! opens the host's sealed replies. Learning the host key is an explicit
//! step: an unencrypted status probe whose encrypted reply carries the key.

use crate::keys::KeyAgreement;
use crate::ports::NativeTransport;
use crate::{encoding, BridgeError, Result};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use strongbox_types::{
    EncryptedMessage, GetStatusResponse, MessageType, PublicKey, RequestEnvelope,
    ResponseEnvelope,
};
use tracing::{debug, warn};

pub struct EnvelopeProtocol {
    keys: KeyAgreement,
    transport: Arc<dyn NativeTransport>,
    request_timeout: Option<Duration>,
}

impl EnvelopeProtocol {
    pub fn new(
        keys: KeyAgreement,
        transport: Arc<dyn NativeTransport>,
        request_timeout: Option<Duration>,
    ) -> Self {
        Self {
            keys,
            transport,
            request_timeout,
        }
    }

    pub fn keys(&self) -> &KeyAgreement {
        &self.keys
    }

    /// Send one raw JSON message, bounded by the configured timeout
    pub async fn send_raw(&self, message: serde_json::Value) -> Result<serde_json::Value> {
        let send = self.transport.send(message);
        match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, send)
                .await
                .map_err(|_| BridgeError::Timeout(limit))?,
            None => send.await,
        }
    }

    /// Send `envelope` and parse the reply as a response envelope
    async fn exchange(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope> {
        let reply = self.send_raw(serde_json::to_value(envelope)?).await?;
        serde_json::from_value(reply)
            .map_err(|e| BridgeError::Transport(format!("malformed response envelope: {}", e)))
    }

    /// Learn the host key with an unencrypted status probe.
    ///
    /// The request leg carries only our public key; the host seals its reply
    /// to that key and declares its own. Never recurses into
    /// [`ensure_peer_key`](Self::ensure_peer_key).
    pub async fn bootstrap(&self) -> Result<GetStatusResponse> {
        self.bootstrap_as().await
    }

    /// Status probe with the reply body parsed as `R`. The host key is
    /// recorded as soon as the reply authenticates, whatever its body.
    async fn bootstrap_as<R>(&self) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let probe = RequestEnvelope::status_probe(self.keys.public_key_base64());

        let response = match self.exchange(&probe).await {
            Ok(response) => response,
            Err(e) => {
                if e.invalidates_peer_key() {
                    self.keys.invalidate_peer_key(None).await;
                }
                return Err(e);
            }
        };

        self.decrypt_response(&response, None).await
    }

    /// Cached host key, bootstrapping once if none is known
    pub async fn ensure_peer_key(&self) -> Result<PublicKey> {
        self.keys
            .ensure_peer_key(|| async {
                // Only the key matters here, not the status body
                self.bootstrap_as::<IgnoredAny>().await.map(|_| ())
            })
            .await
    }

    /// Serialize and seal `payload` into a request envelope.
    ///
    /// Returns the envelope and the host key it was sealed to.
    pub async fn build_encrypted_request<P>(
        &self,
        payload: &P,
        message_type: MessageType,
    ) -> Result<(RequestEnvelope, PublicKey)>
    where
        P: Serialize + ?Sized,
    {
        let json = serde_json::to_vec(payload)?;
        let peer = self.ensure_peer_key().await?;
        let sealed = self.keys.seal(&json, &peer)?;

        let envelope = RequestEnvelope {
            client_public_key: self.keys.public_key_base64(),
            nonce: encoding::encode(&sealed.nonce),
            ciphertext: encoding::encode(&sealed.ciphertext),
            message_type,
        };

        Ok((envelope, peer))
    }

    /// Open and parse a host reply.
    ///
    /// `observed_peer` is the host key the request was sealed to, if any; it
    /// scopes invalidation so a stale failure cannot clear a newer key.
    pub async fn decrypt_response<R>(
        &self,
        response: &ResponseEnvelope,
        observed_peer: Option<&PublicKey>,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        if !response.success {
            self.keys.invalidate_peer_key(observed_peer).await;
            return Err(BridgeError::HostRejected);
        }

        let sealed = match Self::decode_sealed(response) {
            Ok(sealed) => sealed,
            Err(e) => {
                self.keys.invalidate_peer_key(observed_peer).await;
                return Err(e);
            }
        };

        let plaintext = match self.keys.open(&sealed) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                self.keys.invalidate_peer_key(observed_peer).await;
                return Err(e);
            }
        };

        self.keys.record_peer_key(sealed.sender_pubkey).await;

        let text = std::str::from_utf8(&plaintext)
            .map_err(|e| BridgeError::Serialization(format!("reply is not UTF-8: {}", e)))?;
        Ok(serde_json::from_str(text)?)
    }

    fn decode_sealed(response: &ResponseEnvelope) -> Result<EncryptedMessage> {
        Ok(EncryptedMessage::new(
            encoding::decode_array(&response.nonce, "nonce")?,
            encoding::decode(&response.message)?,
            encoding::decode_array(&response.server_public_key, "serverPublicKey")?,
        ))
    }

    /// One encrypted request/response exchange. Exactly one transport attempt.
    pub async fn round_trip<P, R>(&self, payload: &P, message_type: MessageType) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let (envelope, peer) = self.build_encrypted_request(payload, message_type).await?;

        let response = match self.exchange(&envelope).await {
            Ok(response) => response,
            Err(e) => {
                warn!("{} request failed: {}", message_type, e);
                if e.invalidates_peer_key() {
                    self.keys.invalidate_peer_key(Some(&peer)).await;
                }
                return Err(e);
            }
        };

        let result = self.decrypt_response(&response, Some(&peer)).await;
        debug!(
            "{} round trip {}",
            message_type,
            if result.is_ok() { "succeeded" } else { "failed" }
        );
        result
    }
}
