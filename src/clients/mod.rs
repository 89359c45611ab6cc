//! HTTP transport capability (C2, §6): a small async trait the dispatcher sends prepared
//! requests through, plus three feature-gated implementations of it.
//!
//! [`request_builder`] turns a [`crate::message::PreparedRequest`] into an [`http::Request`] and
//! parses a push service's response back into a `Result`; each transport module wraps that with
//! its own HTTP client and response-body draining.

use async_trait::async_trait;
use http::{HeaderMap, StatusCode};

use crate::error::WebPushError;
use crate::message::PreparedRequest;

pub mod request_builder;

#[cfg(feature = "isahc-client")]
pub mod isahc_client;

#[cfg(feature = "hyper-client")]
pub mod hyper_client;

#[cfg(feature = "hyper-rustls-client")]
pub mod hyper_rustls_client;

/// Bound on how much of a push service's response body a transport will buffer before giving up
/// with [`WebPushError::ResponseTooLarge`]. Error bodies are small JSON documents; there is no
/// reason to read further.
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024;

/// A push service's HTTP response (§6: `{statusCode, headers, body}`), handed back on a
/// successful exchange and carried on the [`crate::report::MessageSentReport`] so the caller can
/// interpret the status code itself — the dispatcher only distinguishes "the transport
/// completed" from "the transport failed", per §4.8.
#[derive(Debug, Clone, PartialEq)]
pub struct PushResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// A transport capable of sending one prepared push request and reporting the outcome.
///
/// Implementors only need to turn a successful, non-error HTTP exchange into `Ok(response)`; the
/// dispatcher is responsible for turning `Err` into a [`crate::report::MessageSentReport`].
#[async_trait]
pub trait WebPushClient {
    async fn send(&self, request: PreparedRequest) -> Result<PushResponse, WebPushError>;
}
