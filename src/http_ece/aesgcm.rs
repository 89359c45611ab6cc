//! draft-ietf-webpush-encryption-04 `aesgcm` content coding: no self-describing framing; the salt
//! and sender public key travel in the `Encryption`/`Crypto-Key` HTTP headers instead.
//!
//! Grounded on the teacher's manual `http_ece::aesgcm::AesGcm`, rebuilt on this crate's `crypto`
//! module.

use crate::crypto::{aead, codec, hkdf, EphemeralKeyPair};
use crate::error::WebPushError;
use crate::padding;

pub struct Encrypted {
    pub body: Vec<u8>,
    pub salt: [u8; 16],
    pub local_public_key: [u8; 65],
}

fn context(peer_public: &[u8; 65], local_public: &[u8; 65]) -> Vec<u8> {
    let mut context = Vec::with_capacity(6 + 2 + 65 + 2 + 65);
    context.extend_from_slice(b"P-256\0");
    context.extend_from_slice(&(peer_public.len() as u16).to_be_bytes());
    context.extend_from_slice(peer_public);
    context.extend_from_slice(&(local_public.len() as u16).to_be_bytes());
    context.extend_from_slice(local_public);
    context
}

pub fn encrypt(
    peer_public: &[u8; 65],
    auth_secret: &[u8],
    payload: &[u8],
    padding_max: usize,
) -> Result<Encrypted, WebPushError> {
    let local = EphemeralKeyPair::generate();
    let local_public_key = local.public_bytes();

    let mut salt = [0u8; 16];
    rand_core::RngCore::fill_bytes(&mut rand_core::OsRng, &mut salt);

    let ikm = local.agree(peer_public)?;

    let prk = hkdf::extract_and_expand(auth_secret, &ikm, b"Content-Encoding: auth\0", 32)?;

    let context = context(peer_public, &local_public_key);

    let mut cek_info = b"Content-Encoding: aesgcm\0".to_vec();
    cek_info.push(0x01);
    cek_info.extend_from_slice(&context);
    let cek = hkdf::extract_and_expand(&salt, &prk, &cek_info, 16)?;

    let mut nonce_info = b"Content-Encoding: nonce\0".to_vec();
    nonce_info.push(0x01);
    nonce_info.extend_from_slice(&context);
    let nonce = hkdf::extract_and_expand(&salt, &prk, &nonce_info, 12)?;

    let padded = padding::pad_aesgcm(payload, padding_max)?;

    let cek: [u8; 16] = cek.try_into().map_err(|_| WebPushError::CryptoError("CEK wrong length".into()))?;
    let nonce: [u8; 12] = nonce.try_into().map_err(|_| WebPushError::CryptoError("nonce wrong length".into()))?;

    let body = aead::seal(&cek, &nonce, &padded)?;

    Ok(Encrypted {
        body,
        salt,
        local_public_key,
    })
}

/// Builds the `Encryption`/`Crypto-Key` header values for a completed `aesgcm` encryption; VAPID's
/// own `p256ecdsa=` term, if any, is appended to `Crypto-Key` by the dispatcher, not here.
pub fn headers(encrypted: &Encrypted) -> Vec<(&'static str, String)> {
    vec![
        ("Encryption", format!("salt={}", codec::b64_encode(encrypted.salt))),
        ("Crypto-Key", format!("dh={}", codec::b64_encode(encrypted.local_public_key))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::EphemeralKeyPair;

    #[test]
    fn produces_bare_ciphertext_with_no_framing_prefix() {
        let subscriber = EphemeralKeyPair::generate();
        let auth_secret = [9u8; 16];

        let encrypted = encrypt(&subscriber.public_bytes(), &auth_secret, b"hello", 16).unwrap();

        // 2-byte pad length + 11 zero pad bytes + 5-byte plaintext + 16-byte GCM tag, no salt/key
        // framing bytes prepended (those travel in headers instead).
        assert_eq!(2 + 11 + 5 + 16, encrypted.body.len());
    }

    #[test]
    fn headers_carry_salt_and_local_key() {
        let subscriber = EphemeralKeyPair::generate();
        let auth_secret = [9u8; 16];
        let encrypted = encrypt(&subscriber.public_bytes(), &auth_secret, b"hello", 16).unwrap();

        let headers = headers(&encrypted);
        assert!(headers.iter().any(|(k, v)| *k == "Encryption" && v.starts_with("salt=")));
        assert!(headers.iter().any(|(k, v)| *k == "Crypto-Key" && v.starts_with("dh=")));
    }
}
