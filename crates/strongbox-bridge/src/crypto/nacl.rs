//! NaCl box implementation using crypto_box (XSalsa20Poly1305)

use super::{EncryptedMessage, EncryptionEngine, KeyPair, Nonce, PublicKey, SecretKey};
use crate::{BridgeError, Result};
use crypto_box::{
    aead::{Aead, OsRng},
    SalsaBox,
};
use rand::RngCore;

/// NaCl encryption engine
pub struct NaClEngine;

impl NaClEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NaClEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EncryptionEngine for NaClEngine {
    fn generate_keypair(&self) -> KeyPair {
        let secret_key = crypto_box::SecretKey::generate(&mut OsRng);
        let public_key = secret_key.public_key();

        KeyPair {
            public_key: *public_key.as_bytes(),
            secret_key: secret_key.to_bytes(),
        }
    }

    fn generate_nonce(&self) -> Nonce {
        let mut nonce = [0u8; 24];
        OsRng.fill_bytes(&mut nonce);
        nonce
    }

    fn encrypt(
        &self,
        plaintext: &[u8],
        recipient_pk: &PublicKey,
        sender_sk: &SecretKey,
    ) -> Result<EncryptedMessage> {
        let recipient_pk_obj = crypto_box::PublicKey::from(*recipient_pk);
        let sender_sk_obj = crypto_box::SecretKey::from(*sender_sk);
        let sender_pk_obj = sender_sk_obj.public_key();

        let salsa_box = SalsaBox::new(&recipient_pk_obj, &sender_sk_obj);
        let nonce_bytes = self.generate_nonce();
        let nonce = xsalsa20poly1305::Nonce::from_slice(&nonce_bytes);

        let ciphertext = salsa_box
            .encrypt(nonce, plaintext)
            .map_err(|_| BridgeError::Encryption)?;

        Ok(EncryptedMessage::new(
            nonce_bytes,
            ciphertext,
            *sender_pk_obj.as_bytes(),
        ))
    }

    fn decrypt(
        &self,
        encrypted: &EncryptedMessage,
        sender_pk: &PublicKey,
        recipient_sk: &SecretKey,
    ) -> Result<Vec<u8>> {
        let sender_pk = crypto_box::PublicKey::from(*sender_pk);
        let recipient_sk = crypto_box::SecretKey::from(*recipient_sk);

        let salsa_box = SalsaBox::new(&sender_pk, &recipient_sk);
        let nonce = xsalsa20poly1305::Nonce::from_slice(&encrypted.nonce);

        salsa_box
            .decrypt(nonce, encrypted.ciphertext.as_ref())
            .map_err(|_| BridgeError::Decryption)
    }
}
