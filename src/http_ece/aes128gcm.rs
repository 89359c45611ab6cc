//! RFC 8291/8188 `aes128gcm` content coding: a single self-describing record carrying its own
//! salt, record size, and sender public key ahead of the ciphertext.
//!
//! Grounded on the teacher's manual `http_ece::aes128gcm::Aes128Gcm` (`ring`-based HKDF/AEAD and
//! hand-written byte offsets for the RFC8188 header), rebuilt on this crate's `crypto` module.

use rand_core::{OsRng, RngCore};

use crate::crypto::{aead, hkdf, EphemeralKeyPair};
use crate::error::WebPushError;
use crate::padding;

/// Output of one `aes128gcm` encryption: the fully framed body ready to become the request
/// payload, plus the salt and local public key the dispatcher needs for logging/testing.
pub struct Encrypted {
    pub body: Vec<u8>,
    pub salt: [u8; 16],
    pub local_public_key: [u8; 65],
}

pub fn encrypt(peer_public: &[u8; 65], auth_secret: &[u8], payload: &[u8], padding_max: usize) -> Result<Encrypted, WebPushError> {
    let local = EphemeralKeyPair::generate();
    let local_public_key = local.public_bytes();

    let mut salt = [0u8; 16];
    OsRng.fill_bytes(&mut salt);

    let ikm = local.agree(peer_public)?;

    let mut info = Vec::with_capacity(14 + 65 + 65);
    info.extend_from_slice(b"WebPush: info\0");
    info.extend_from_slice(peer_public);
    info.extend_from_slice(&local_public_key);

    let prk = hkdf::extract_and_expand(auth_secret, &ikm, &info, 32)?;

    let mut cek_info = b"Content-Encoding: aes128gcm\0".to_vec();
    cek_info.push(0x01);
    let cek = hkdf::extract_and_expand(&salt, &prk, &cek_info, 16)?;

    let mut nonce_info = b"Content-Encoding: nonce\0".to_vec();
    nonce_info.push(0x01);
    let nonce = hkdf::extract_and_expand(&salt, &prk, &nonce_info, 12)?;

    let padded = padding::pad_aes128gcm(payload, padding_max)?;

    // Design note (b): recordSize is fixed to padded-plaintext-length + 17, not tunable, since
    // this engine only ever emits a single record.
    let record_size = (padded.len() as u32)
        .checked_add(17)
        .ok_or_else(|| WebPushError::PayloadError("payload too large to frame".into()))?;

    let cek: [u8; 16] = cek.try_into().map_err(|_| WebPushError::CryptoError("CEK wrong length".into()))?;
    let nonce: [u8; 12] = nonce.try_into().map_err(|_| WebPushError::CryptoError("nonce wrong length".into()))?;

    let ciphertext = aead::seal(&cek, &nonce, &padded)?;

    let mut body = Vec::with_capacity(16 + 4 + 1 + 65 + ciphertext.len());
    body.extend_from_slice(&salt);
    body.extend_from_slice(&record_size.to_be_bytes());
    body.push(65u8);
    body.extend_from_slice(&local_public_key);
    body.extend_from_slice(&ciphertext);

    Ok(Encrypted {
        body,
        salt,
        local_public_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::EphemeralKeyPair;

    #[test]
    fn frames_begin_with_salt_record_size_and_local_key() {
        let subscriber = EphemeralKeyPair::generate();
        let auth_secret = [9u8; 16];

        let encrypted = encrypt(&subscriber.public_bytes(), &auth_secret, b"hello", 16).unwrap();

        assert_eq!(&encrypted.salt, &encrypted.body[..16]);
        assert_eq!(0x41, encrypted.body[20]);
        assert_eq!(&encrypted.local_public_key, &encrypted.body[21..86]);
    }

    #[test]
    fn rejects_oversized_payload() {
        let subscriber = EphemeralKeyPair::generate();
        let auth_secret = [9u8; 16];
        let payload = vec![0u8; 20];

        assert!(encrypt(&subscriber.public_bytes(), &auth_secret, &payload, 10).is_err());
    }
}
