//! URL-safe, unpadded base64 and raw P-256 point handling. Grounded on the teacher's
//! `ct-codecs`/`base64` decode call sites in `message.rs`/`vapid/signer.rs`, generalized to a
//! shared helper since this crate no longer pulls in `ct-codecs`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::error::WebPushError;

pub fn b64_encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn b64_decode(s: &str) -> Result<Vec<u8>, WebPushError> {
    URL_SAFE_NO_PAD
        .decode(s)
        .map_err(|e| WebPushError::PayloadError(format!("invalid base64url: {e}")))
}

/// Normalizes a subscriber public key into the 65-byte uncompressed SEC1 point form
/// (`0x04 || X || Y`). A 64-byte input (bare `X||Y`) is re-prefixed; anything else is rejected.
pub fn normalize_public_key(bytes: &[u8]) -> Result<[u8; 65], WebPushError> {
    let mut out = [0u8; 65];

    match bytes.len() {
        65 if bytes[0] == 0x04 => {
            out.copy_from_slice(bytes);
            Ok(out)
        }
        64 => {
            out[0] = 0x04;
            out[1..].copy_from_slice(bytes);
            Ok(out)
        }
        other => Err(WebPushError::CryptoError(format!(
            "public key must be 65 bytes (0x04 prefix) or 64 raw bytes, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_base64url() {
        let bytes = b"hello world, this is test data";
        let encoded = b64_encode(bytes);
        assert!(!encoded.contains('='));
        assert_eq!(bytes.to_vec(), b64_decode(&encoded).unwrap());
    }

    #[test]
    fn accepts_bare_64_byte_point() {
        let raw = [7u8; 64];
        let normalized = normalize_public_key(&raw).unwrap();
        assert_eq!(0x04, normalized[0]);
        assert_eq!(&raw[..], &normalized[1..]);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(normalize_public_key(&[1, 2, 3]).is_err());
    }
}
