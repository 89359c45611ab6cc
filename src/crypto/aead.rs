//! AES-128-GCM sealing with the 16-byte tag appended to the ciphertext and empty AAD, matching
//! both content codings. Grounded on the teacher's manual `ring::aead::{SealingKey, seal_in_place}`
//! call sites, rebuilt on the `aes-gcm` crate.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes128Gcm, KeyInit, Nonce};

use crate::error::WebPushError;

pub fn seal(key: &[u8; 16], nonce: &[u8; 12], plaintext: &[u8]) -> Result<Vec<u8>, WebPushError> {
    let cipher = Aes128Gcm::new_from_slice(key).map_err(|e| WebPushError::CryptoError(e.to_string()))?;

    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| WebPushError::CryptoError(format!("AES-128-GCM seal failed: {e}")))
}

#[cfg(test)]
pub fn open(key: &[u8; 16], nonce: &[u8; 12], ciphertext: &[u8]) -> Result<Vec<u8>, WebPushError> {
    let cipher = Aes128Gcm::new_from_slice(key).map_err(|e| WebPushError::CryptoError(e.to_string()))?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|e| WebPushError::CryptoError(format!("AES-128-GCM open failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seals_and_opens() {
        let key = [1u8; 16];
        let nonce = [2u8; 12];
        let plaintext = b"hello, push service";

        let sealed = seal(&key, &nonce, plaintext).unwrap();
        assert_eq!(plaintext.len() + 16, sealed.len());

        let opened = open(&key, &nonce, &sealed).unwrap();
        assert_eq!(plaintext.to_vec(), opened);
    }

    #[test]
    fn tampered_ciphertext_fails_to_open() {
        let key = [1u8; 16];
        let nonce = [2u8; 12];
        let mut sealed = seal(&key, &nonce, b"hello").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0xff;

        assert!(open(&key, &nonce, &sealed).is_err());
    }
}
