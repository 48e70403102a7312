//! Encryption module using the NaCl box construction
//!
//! Provides X25519 key agreement and XSalsa20-Poly1305 authenticated encryption

mod nacl;

pub use nacl::NaClEngine;

use crate::Result;
use strongbox_types::{EncryptedMessage, KeyPair, Nonce, PublicKey, SecretKey};

/// Encryption engine trait for the native-messaging channel
pub trait EncryptionEngine: Send + Sync {
    /// Generate a new X25519 key pair
    fn generate_keypair(&self) -> KeyPair;

    /// Generate a random nonce from the OS CSPRNG
    fn generate_nonce(&self) -> Nonce;

    /// Seal plaintext for `recipient_pk` under a freshly generated nonce
    fn encrypt(
        &self,
        plaintext: &[u8],
        recipient_pk: &PublicKey,
        sender_sk: &SecretKey,
    ) -> Result<EncryptedMessage>;

    /// Open a sealed box sent by `sender_pk`
    fn decrypt(
        &self,
        encrypted: &EncryptedMessage,
        sender_pk: &PublicKey,
        recipient_sk: &SecretKey,
    ) -> Result<Vec<u8>>;
}
