//! Ephemeral P-256 key agreement. The older (pre-`ece`-crate) layer of the teacher,
//! `http_ece/mod.rs`, drove this with `ring::agreement::{EphemeralPrivateKey, agree_ephemeral}`;
//! this is the same shape rebuilt on `p256`'s ECDH support.

use p256::ecdh::diffie_hellman;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{PublicKey, SecretKey};
use rand_core::OsRng;

use crate::error::WebPushError;

/// A freshly generated local key pair, kept around only long enough to agree and to report its
/// uncompressed public bytes to the caller (they travel in headers or framing, never the secret).
pub struct EphemeralKeyPair {
    secret: SecretKey,
    public_bytes: [u8; 65],
}

impl EphemeralKeyPair {
    pub fn generate() -> Self {
        let secret = SecretKey::random(&mut OsRng);
        let public_bytes = public_key_bytes(&secret.public_key());

        Self { secret, public_bytes }
    }

    pub fn public_bytes(&self) -> [u8; 65] {
        self.public_bytes
    }

    /// Computes the raw 32-byte X coordinate of `d_l * P_s`, the ECDH shared secret this crate
    /// feeds into HKDF as input keying material.
    pub fn agree(&self, peer_public: &[u8; 65]) -> Result<[u8; 32], WebPushError> {
        let peer = PublicKey::from_sec1_bytes(peer_public)
            .map_err(|e| WebPushError::CryptoError(format!("invalid subscriber public key: {e}")))?;

        let shared = diffie_hellman(&self.secret.to_nonzero_scalar(), peer.as_affine());

        let mut ikm = [0u8; 32];
        ikm.copy_from_slice(shared.raw_secret_bytes().as_slice());
        Ok(ikm)
    }
}

fn public_key_bytes(public: &PublicKey) -> [u8; 65] {
    let encoded = public.to_encoded_point(false);
    let mut out = [0u8; 65];
    out.copy_from_slice(encoded.as_bytes());
    out
}
