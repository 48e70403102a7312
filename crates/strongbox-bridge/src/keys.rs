//! Key agreement state
//!
//! Owns the process-lifetime key pair and the single cached host public key.
//! The peer slot moves between two states only:
//!
//! ```text
//! Unknown --(bootstrap ok)--> Known --(decrypt failure | success=false | transport failure)--> Unknown
//! ```
//!
//! The secret key never leaves this module and is never logged.

use crate::crypto::EncryptionEngine;
use crate::{encoding, BridgeError, Result};
use std::future::Future;
use std::sync::Arc;
use strongbox_types::{fingerprint, EncryptedMessage, KeyPair, PublicKey};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

pub struct KeyAgreement {
    engine: Arc<dyn EncryptionEngine>,
    key_pair: KeyPair,
    peer: RwLock<Option<PublicKey>>,
    /// Serializes bootstraps so concurrent callers share one status probe
    bootstrap_gate: Mutex<()>,
}

impl KeyAgreement {
    /// Generate the session key pair. Called once per bridge instance.
    pub fn new(engine: Arc<dyn EncryptionEngine>) -> Self {
        let key_pair = engine.generate_keypair();
        debug!(
            "Generated session key pair {}",
            fingerprint(&key_pair.public_key)
        );

        Self {
            engine,
            key_pair,
            peer: RwLock::new(None),
            bootstrap_gate: Mutex::new(()),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.key_pair.public_key
    }

    pub fn public_key_base64(&self) -> String {
        encoding::encode(&self.key_pair.public_key)
    }

    /// Currently cached host key, if any
    pub async fn peer_key(&self) -> Option<PublicKey> {
        *self.peer.read().await
    }

    /// Overwrite the cached host key after a successful decrypt
    pub async fn record_peer_key(&self, key: PublicKey) {
        let mut peer = self.peer.write().await;
        if *peer != Some(key) {
            info!("Learned native host key {}", fingerprint(&key));
        }
        *peer = Some(key);
    }

    /// Forget the cached host key.
    ///
    /// With `observed = Some(k)` the slot is only cleared while it still holds
    /// `k`, so a failure seen under a stale key cannot erase a key another
    /// call learned in the meantime. Returns whether the slot was cleared.
    pub async fn invalidate_peer_key(&self, observed: Option<&PublicKey>) -> bool {
        let mut peer = self.peer.write().await;
        let matches = match (peer.as_ref(), observed) {
            (None, _) => return false,
            (Some(_), None) => true,
            (Some(current), Some(seen)) => current == seen,
        };

        if matches {
            if let Some(old) = peer.take() {
                warn!("Invalidated native host key {}", fingerprint(&old));
            }
        }
        matches
    }

    /// Return the cached host key, running `bootstrap` to learn it if the
    /// slot is empty. Concurrent callers wait on the same bootstrap.
    pub async fn ensure_peer_key<F, Fut>(&self, bootstrap: F) -> Result<PublicKey>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        if let Some(key) = self.peer_key().await {
            return Ok(key);
        }

        let _gate = self.bootstrap_gate.lock().await;

        // Another caller may have finished a bootstrap while we waited
        if let Some(key) = self.peer_key().await {
            return Ok(key);
        }

        debug!("No native host key cached, bootstrapping");
        bootstrap().await?;

        self.peer_key().await.ok_or(BridgeError::MissingPeerKey)
    }

    /// Seal `plaintext` for `peer` with a fresh nonce
    pub fn seal(&self, plaintext: &[u8], peer: &PublicKey) -> Result<EncryptedMessage> {
        self.engine
            .encrypt(plaintext, peer, &self.key_pair.secret_key)
    }

    /// Open a box the host sealed to our public key
    pub fn open(&self, message: &EncryptedMessage) -> Result<Vec<u8>> {
        self.engine
            .decrypt(message, &message.sender_pubkey, &self.key_pair.secret_key)
    }
}

impl std::fmt::Debug for KeyAgreement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyAgreement")
            .field("key_pair", &self.key_pair)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::NaClEngine;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn agreement() -> KeyAgreement {
        KeyAgreement::new(Arc::new(NaClEngine::new()))
    }

    #[tokio::test]
    async fn test_public_key_is_stable() {
        let keys = agreement();
        assert_eq!(keys.public_key(), keys.public_key());
        assert_eq!(keys.public_key_base64(), keys.public_key_base64());
    }

    #[tokio::test]
    async fn test_record_and_invalidate() {
        let keys = agreement();
        assert_eq!(keys.peer_key().await, None);

        keys.record_peer_key([1u8; 32]).await;
        assert_eq!(keys.peer_key().await, Some([1u8; 32]));

        assert!(keys.invalidate_peer_key(None).await);
        assert_eq!(keys.peer_key().await, None);
        assert!(!keys.invalidate_peer_key(None).await);
    }

    #[tokio::test]
    async fn test_invalidate_is_compare_and_clear() {
        let keys = agreement();
        keys.record_peer_key([2u8; 32]).await;

        // A failure observed under an older key leaves the newer key alone
        assert!(!keys.invalidate_peer_key(Some(&[1u8; 32])).await);
        assert_eq!(keys.peer_key().await, Some([2u8; 32]));

        assert!(keys.invalidate_peer_key(Some(&[2u8; 32])).await);
        assert_eq!(keys.peer_key().await, None);
    }

    #[tokio::test]
    async fn test_ensure_peer_key_skips_bootstrap_when_known() {
        let keys = agreement();
        keys.record_peer_key([3u8; 32]).await;

        let key = keys
            .ensure_peer_key(|| async {
                Err(BridgeError::Transport("bootstrap must not run".into()))
            })
            .await
            .unwrap();
        assert_eq!(key, [3u8; 32]);
    }

    #[tokio::test]
    async fn test_ensure_peer_key_reports_failed_bootstrap() {
        let keys = agreement();

        let result = keys
            .ensure_peer_key(|| async { Err(BridgeError::HostRejected) })
            .await;
        assert!(matches!(result, Err(BridgeError::HostRejected)));

        // A bootstrap that succeeds without learning a key is still a failure
        let result = keys.ensure_peer_key(|| async { Ok(()) }).await;
        assert!(matches!(result, Err(BridgeError::MissingPeerKey)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_share_one_bootstrap() {
        let keys = Arc::new(agreement());
        let runs = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let keys = keys.clone();
                let runs = runs.clone();
                tokio::spawn(async move {
                    let inner = keys.clone();
                    keys.ensure_peer_key(|| async move {
                        runs.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                        inner.record_peer_key([9u8; 32]).await;
                        Ok(())
                    })
                    .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), [9u8; 32]);
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_seal_and_open_with_host() {
        let engine = Arc::new(NaClEngine::new());
        let keys = KeyAgreement::new(engine.clone());
        let host = engine.generate_keypair();

        let sealed = keys.seal(b"hello", &host.public_key).unwrap();
        let opened = engine
            .decrypt(&sealed, &keys.public_key(), &host.secret_key)
            .unwrap();
        assert_eq!(opened, b"hello");

        let reply = engine
            .encrypt(b"world", &keys.public_key(), &host.secret_key)
            .unwrap();
        assert_eq!(keys.open(&reply).unwrap(), b"world");
    }

    #[test]
    fn test_debug_hides_secret() {
        let keys = agreement();
        let rendered = format!("{:?}", keys);
        assert!(rendered.contains("<redacted>"));
    }
}
