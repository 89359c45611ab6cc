//! Tooling for signing with VAPID (RFC 8292): key material (`key`), validated configuration
//! (`config`), JWT + header construction (`signer`), and the per-flush memoisation cache
//! (`cache`).

pub mod cache;
pub mod config;
pub mod key;
pub mod signer;

pub use cache::VapidCache;
pub use config::{VapidConfig, VapidConfigSource};
pub use key::VapidKeyPair;
pub use signer::VapidSignature;

/// A freshly generated VAPID key pair, base64url-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VapidKeys {
    pub public_key: String,
    pub private_key: String,
}

/// Generates a fresh P-256 key pair suitable for VAPID signing.
pub fn create_vapid_keys() -> VapidKeys {
    let pair = VapidKeyPair::generate();
    VapidKeys {
        public_key: pair.public_key_base64(),
        private_key: pair.private_key_base64(),
    }
}
