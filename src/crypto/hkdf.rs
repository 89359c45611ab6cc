//! HKDF-SHA256 extract-then-expand, used both by the encryption engine (§4.4) to derive the
//! per-message CEK/nonce and, indirectly, by the coding-specific PRK derivation. The teacher's
//! manual `http_ece/{aes128gcm,aesgcm}.rs` drove this with `ring::hkdf::extract_and_expand`
//! against a `hmac::SigningKey`; the shape here is the same two-step call against the `hkdf`
//! crate's `Hkdf<Sha256>`.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::error::WebPushError;

pub fn extract_and_expand(salt: &[u8], ikm: &[u8], info: &[u8], len: usize) -> Result<Vec<u8>, WebPushError> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    let mut okm = vec![0u8; len];

    hk.expand(info, &mut okm)
        .map_err(|_| WebPushError::CryptoError("HKDF output length exceeds 255*HashLen".into()))?;

    Ok(okm)
}
