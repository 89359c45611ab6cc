//! Encryption engine (C4): turns `(payload, subscriber key, auth secret, coding)` into framed
//! ciphertext plus whatever headers that coding's framing needs.
//!
//! Grounded on the teacher's `http_ece::HttpEce`, which dispatched between the two codings and
//! enforced the payload size cap before delegating to `AesGcm`/`Aes128Gcm`. The coding-specific
//! byte layouts now live in sibling modules built on this crate's own `crypto` primitives instead
//! of `ring`.

mod aes128gcm;
mod aesgcm;

use serde::{Deserialize, Serialize};

use crate::crypto::codec;
use crate::error::WebPushError;

/// `"aesgcm"` (legacy) or `"aes128gcm"` (RFC 8188), bit-exact in `Content-Encoding` and the VAPID
/// cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentEncoding {
    Aesgcm,
    #[serde(rename = "aes128gcm")]
    Aes128Gcm,
}

impl ContentEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentEncoding::Aesgcm => "aesgcm",
            ContentEncoding::Aes128Gcm => "aes128gcm",
        }
    }
}

impl std::str::FromStr for ContentEncoding {
    type Err = WebPushError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aesgcm" => Ok(ContentEncoding::Aesgcm),
            "aes128gcm" => Ok(ContentEncoding::Aes128Gcm),
            other => Err(WebPushError::PayloadError(format!("unsupported content coding: {other}"))),
        }
    }
}

/// The encrypted push content payload, plus whatever of the coding's own framing material the
/// dispatcher needs to assemble request headers.
#[derive(Debug)]
pub struct EncryptedPayload {
    /// The bytes to send as the request body: self-framed for `aes128gcm`, bare ciphertext for
    /// `aesgcm`.
    pub content: Vec<u8>,
    /// Headers this coding's framing requires beyond `Content-Encoding`/`Content-Length`/
    /// `Content-Type` (only non-empty for `aesgcm`: `Encryption` and `Crypto-Key`).
    pub crypto_headers: Vec<(&'static str, String)>,
    pub content_encoding: ContentEncoding,
}

/// Runs the encryption engine for one `(subscriber key, auth secret, coding)` tuple.
pub struct HttpEce<'a> {
    peer_public_key: &'a [u8],
    peer_secret: &'a [u8],
    encoding: ContentEncoding,
    padding_max: usize,
}

impl<'a> HttpEce<'a> {
    pub fn new(encoding: ContentEncoding, peer_public_key: &'a [u8], peer_secret: &'a [u8], padding_max: usize) -> Self {
        HttpEce {
            peer_public_key,
            peer_secret,
            encoding,
            padding_max,
        }
    }

    pub fn encrypt(&self, content: &[u8]) -> Result<EncryptedPayload, WebPushError> {
        let peer_public_key = codec::normalize_public_key(self.peer_public_key)?;

        match self.encoding {
            ContentEncoding::Aes128Gcm => {
                let encrypted = aes128gcm::encrypt(&peer_public_key, self.peer_secret, content, self.padding_max)?;

                Ok(EncryptedPayload {
                    content: encrypted.body,
                    crypto_headers: Vec::new(),
                    content_encoding: ContentEncoding::Aes128Gcm,
                })
            }
            ContentEncoding::Aesgcm => {
                let encrypted = aesgcm::encrypt(&peer_public_key, self.peer_secret, content, self.padding_max)?;
                let crypto_headers = aesgcm::headers(&encrypted);

                Ok(EncryptedPayload {
                    content: encrypted.body,
                    crypto_headers,
                    content_encoding: ContentEncoding::Aesgcm,
                })
            }
        }
    }
}
