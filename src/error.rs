use std::{
    io::Error as IoError,
    string::FromUtf8Error,
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

/// Error body returned by some push services (FCM, autopush) on non-2xx responses.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct ErrorInfo {
    pub code: u16,
    #[serde(default)]
    pub errno: u32,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
}

/// An error that can happen while queueing, encrypting or sending a notification.
///
/// Variants map onto the error kinds the dispatcher distinguishes: configuration mistakes,
/// oversized or malformed payloads, cryptographic failures, the inability to derive a JWT
/// audience from an endpoint, and transport failures folded in from the push service's HTTP
/// response.
#[derive(Debug, Clone, Error)]
pub enum WebPushError {
    /// The VAPID key material, subject, or PEM was malformed.
    #[error("invalid VAPID configuration: {0}")]
    ConfigError(String),

    /// The payload was too large, or keys required to encrypt it were missing.
    #[error("invalid payload: {0}")]
    PayloadError(String),

    /// ECDH, HKDF, AES-GCM or ES256 signing failed.
    #[error("cryptographic operation failed: {0}")]
    CryptoError(String),

    /// The endpoint did not carry a scheme/host pair a VAPID audience can be built from.
    #[error("could not derive an audience from the endpoint")]
    ProtocolError,

    /// Please provide valid credentials to send the notification.
    #[error("unauthorized: {0:?}")]
    Unauthorized(ErrorInfo),

    /// Request was badly formed.
    #[error("bad request: {0:?}")]
    BadRequest(ErrorInfo),

    /// Contains an optional `Duration` the caller should wait before retrying.
    #[error("server error, retry after {retry_after:?}: {info:?}")]
    ServerError {
        retry_after: Option<Duration>,
        info: ErrorInfo,
    },

    /// The URL specified is no longer valid and should no longer be used.
    #[error("endpoint is no longer valid: {0:?}")]
    EndpointNotValid(ErrorInfo),

    /// The URL specified is invalid and should not be used again.
    #[error("endpoint not found: {0:?}")]
    EndpointNotFound(ErrorInfo),

    /// Maximum allowed payload size was exceeded.
    #[error("payload too large")]
    PayloadTooLarge,

    /// The topic string was not a valid base64url token of at most 32 characters.
    #[error("invalid topic")]
    InvalidTopic,

    /// The response body exceeded the size this crate is willing to buffer.
    #[error("response too large")]
    ResponseTooLarge,

    /// Could not initialize a TLS connection.
    #[error("could not initialize a TLS connection")]
    TlsError,

    /// Error reading a file or socket.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Corrupted or undecodable response data.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Other, unclassified error.
    #[error("{0}")]
    Other(String),
}

impl PartialEq for WebPushError {
    fn eq(&self, other: &Self) -> bool {
        format!("{self:?}") == format!("{other:?}")
    }
}

impl From<JsonError> for WebPushError {
    fn from(e: JsonError) -> WebPushError {
        WebPushError::InvalidResponse(e.to_string())
    }
}

impl From<FromUtf8Error> for WebPushError {
    fn from(e: FromUtf8Error) -> WebPushError {
        WebPushError::InvalidResponse(e.to_string())
    }
}

impl From<IoError> for WebPushError {
    fn from(e: IoError) -> WebPushError {
        WebPushError::IoError(e.to_string())
    }
}

impl From<base64::DecodeError> for WebPushError {
    fn from(e: base64::DecodeError) -> WebPushError {
        WebPushError::PayloadError(format!("invalid base64url: {e}"))
    }
}

impl From<http::uri::InvalidUri> for WebPushError {
    fn from(_: http::uri::InvalidUri) -> WebPushError {
        WebPushError::ProtocolError
    }
}

#[cfg(feature = "isahc-client")]
impl From<isahc::Error> for WebPushError {
    fn from(e: isahc::Error) -> WebPushError {
        WebPushError::Other(e.to_string())
    }
}

#[cfg(any(feature = "hyper-client", feature = "hyper-rustls-client"))]
impl From<hyper::Error> for WebPushError {
    fn from(e: hyper::Error) -> WebPushError {
        WebPushError::Other(e.to_string())
    }
}

/// Parses a `Retry-After` header value, which is either a number of seconds or an HTTP-date.
pub struct RetryAfter;

impl RetryAfter {
    pub fn from_str(header_value: &str) -> Option<Duration> {
        if let Ok(seconds) = header_value.parse::<u64>() {
            Some(Duration::from_secs(seconds))
        } else {
            chrono::DateTime::parse_from_rfc2822(header_value)
                .map(|date_time| {
                    let systime: SystemTime = date_time.into();

                    systime
                        .duration_since(SystemTime::now())
                        .unwrap_or_else(|_| Duration::new(0, 0))
                })
                .ok()
        }
    }
}
