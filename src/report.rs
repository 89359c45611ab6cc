//! Delivery report (C8): the owned, immutable value handed back per queued notification once a
//! flush has run it to completion, replacing the teacher's practice of returning a bare
//! `Result<(), WebPushError>` per send with a value the caller can collect and inspect after the
//! fact, including the prepared request and (on success) the push service's response.

use crate::clients::PushResponse;
use crate::error::WebPushError;
use crate::message::PreparedRequest;

/// Why a report carries no success.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// The notification never reached the transport: encryption, VAPID signing or request
    /// assembly failed before anything was sent.
    Prepare(WebPushError),
    /// The push service's response indicated failure, or the transport itself errored.
    Transport(WebPushError),
}

/// One flushed notification's outcome. Deliberately a plain owned struct, not a `Result` wrapper:
/// a flush needs to keep going past individual failures, and the caller wants the endpoint back
/// alongside the outcome to correlate with its own subscription store.
///
/// `request` is `Some` whenever a [`PreparedRequest`] was built, i.e. on both success and a
/// transport failure; it is `None` only when `prepare` itself failed, since no request exists in
/// that case. `response` is `Some` only on success — a transport error, by definition, produced
/// no response to carry (§4.8, §6).
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSentReport {
    pub endpoint: String,
    pub request: Option<PreparedRequest>,
    pub response: Option<PushResponse>,
    pub success: bool,
    pub reason: Option<FailureReason>,
}

impl MessageSentReport {
    pub fn success(endpoint: impl Into<String>, request: PreparedRequest, response: PushResponse) -> Self {
        MessageSentReport {
            endpoint: endpoint.into(),
            request: Some(request),
            response: Some(response),
            success: true,
            reason: None,
        }
    }

    pub fn failure(endpoint: impl Into<String>, reason: FailureReason, request: Option<PreparedRequest>) -> Self {
        MessageSentReport {
            endpoint: endpoint.into(),
            request,
            response: None,
            success: false,
            reason: Some(reason),
        }
    }
}
