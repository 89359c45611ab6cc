//! Padding policy (C3): pads plaintext to a target length before encryption, per coding. Grounded
//! on the byte-exact layouts in the teacher's `http_ece::{aes128gcm, aesgcm}::Encryptor::pad`.

use crate::error::WebPushError;
use crate::http_ece::ContentEncoding;

/// The hard ceiling on a payload before padding, matching the push service limit the teacher's
/// `http_ece::HttpEce::encrypt` enforced with a literal `3052`/`3800` check.
pub const MAX_PAYLOAD: usize = 4078;

/// Recommended default `paddingMax`, chosen for broad push-service compatibility.
pub const MAX_COMPATIBILITY: usize = 3052;

/// RFC8188 framing: plaintext, then a `0x02` delimiter, then zero bytes out to the target length.
/// Target length is `max(len(payload)+1, paddingMax+1)`.
pub fn pad_aes128gcm(payload: &[u8], padding_max: usize) -> Result<Vec<u8>, WebPushError> {
    if payload.len() + 1 > padding_max + 1 {
        return Err(WebPushError::PayloadError(format!(
            "payload of {} bytes exceeds paddingMax {}",
            payload.len(),
            padding_max
        )));
    }

    let target = std::cmp::max(payload.len() + 1, padding_max + 1);

    let mut padded = Vec::with_capacity(target);
    padded.extend_from_slice(payload);
    padded.push(0x02);
    padded.resize(target, 0);

    Ok(padded)
}

/// draft-ietf-webpush-encryption-04 framing: a 2-byte big-endian pad length, that many zero
/// bytes, then the plaintext.
pub fn pad_aesgcm(payload: &[u8], padding_max: usize) -> Result<Vec<u8>, WebPushError> {
    if payload.len() > padding_max {
        return Err(WebPushError::PayloadError(format!(
            "payload of {} bytes exceeds paddingMax {}",
            payload.len(),
            padding_max
        )));
    }

    let pad_len = padding_max - payload.len();

    let mut padded = Vec::with_capacity(2 + pad_len + payload.len());
    padded.push((pad_len >> 8) as u8);
    padded.push((pad_len & 0xff) as u8);
    padded.resize(2 + pad_len, 0);
    padded.extend_from_slice(payload);

    Ok(padded)
}

pub fn pad(coding: ContentEncoding, payload: &[u8], padding_max: usize) -> Result<Vec<u8>, WebPushError> {
    match coding {
        ContentEncoding::Aes128Gcm => pad_aes128gcm(payload, padding_max),
        ContentEncoding::Aesgcm => pad_aesgcm(payload, padding_max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aes128gcm_pad_matches_rfc8188_layout() {
        let padded = pad_aes128gcm(b"naukio", 10).unwrap();
        assert_eq!(11, padded.len());
        assert_eq!(b"naukio", &padded[..6]);
        assert_eq!(0x02, padded[6]);
        assert!(padded[7..].iter().all(|&b| b == 0));
    }

    #[test]
    fn aesgcm_pad_matches_teacher_test_vector() {
        // Same fixture the teacher's `http_ece::aesgcm::tests::test_padding` used.
        let padded = pad_aesgcm(b"naukio", 12).unwrap();
        assert_eq!(vec![0, 6, 0, 0, 0, 0, 0, 0, 110, 97, 117, 107, 105, 111], padded);
    }

    #[test]
    fn rejects_oversized_payload() {
        assert!(pad_aes128gcm(&[0u8; 10], 8).is_err());
        assert!(pad_aesgcm(&[0u8; 10], 8).is_err());
    }

    #[test]
    fn padding_cap_at_max_payload_plus_one_is_rejected() {
        let payload = vec![0u8; MAX_PAYLOAD + 1];
        assert!(pad_aes128gcm(&payload, MAX_COMPATIBILITY).is_err());
    }
}
