//! Encryption types (definitions only, no implementation)

/// X25519 public key (32 bytes)
pub type PublicKey = [u8; 32];

/// X25519 secret key (32 bytes)
pub type SecretKey = [u8; 32];

/// XSalsa20 nonce (24 bytes)
pub type Nonce = [u8; 24];

/// Length of a box nonce in bytes
pub const NONCE_LENGTH: usize = 24;

/// Length of an X25519 key in bytes
pub const KEY_LENGTH: usize = 32;

/// A sealed box together with the material needed to open it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedMessage {
    /// XSalsa20 nonce chosen by the sender
    pub nonce: Nonce,
    /// Encrypted payload including the Poly1305 tag
    pub ciphertext: Vec<u8>,
    /// Sender's X25519 public key
    pub sender_pubkey: PublicKey,
}

impl EncryptedMessage {
    pub fn new(nonce: Nonce, ciphertext: Vec<u8>, sender_pubkey: PublicKey) -> Self {
        Self {
            nonce,
            ciphertext,
            sender_pubkey,
        }
    }
}

/// Key pair for box encryption
#[derive(Clone)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub secret_key: SecretKey,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &fingerprint(&self.public_key))
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Short hex fingerprint of a public key, safe to log
pub fn fingerprint(key: &PublicKey) -> String {
    key.iter().take(4).map(|b| format!("{:02x}", b)).collect()
}
