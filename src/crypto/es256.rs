//! ES256 signing for VAPID JWTs: SHA-256 over the signing input, signed with a P-256 private key,
//! emitted as the raw 64-byte `r||s` concatenation rather than DER, normalized to low-S.
//!
//! The teacher's `vapid/signer.rs` did this by asking `openssl` for a DER signature and then
//! manually walking the DER structure to pull out `r` and `s` (stripping a leading zero byte when
//! a coordinate's high bit forced one during DER encoding). `p256`'s `ecdsa::Signature` exposes
//! the fixed-width `r||s` form and low-S normalization directly, so that manual parsing is no
//! longer needed, but the shape of "sign, then normalize" is preserved.

use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use p256::SecretKey;

use crate::error::WebPushError;

pub fn sign(message: &[u8], private_key: &SecretKey) -> Result<[u8; 64], WebPushError> {
    let signing_key = SigningKey::from(private_key);

    let signature: Signature = signing_key.try_sign(message).map_err(|e| WebPushError::CryptoError(e.to_string()))?;
    let signature = signature.normalize_s().unwrap_or(signature);

    let mut out = [0u8; 64];
    out.copy_from_slice(&signature.to_bytes());
    Ok(out)
}
