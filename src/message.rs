//! Request assembly (§4.7, the `prepare` step): turns one queued [`Notification`] into the
//! `POST <endpoint>` the dispatcher hands to a transport, encrypting the payload and folding in
//! VAPID headers if applicable.
//!
//! Grounded on the teacher's `WebPushMessageBuilder::build`, generalized so the encryption engine
//! and coding no longer come from builder setters but are read off the subscription itself, and
//! so VAPID is resolved against a flush-wide cache instead of being pre-signed by the caller.

use http::Uri;

use crate::error::WebPushError;
use crate::http_ece::{ContentEncoding, HttpEce};
use crate::notification::Notification;
use crate::options::PushOptions;
use crate::vapid::{VapidCache, VapidConfig};

/// An assembled, ready-to-send push request.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub endpoint: Uri,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

fn is_base64url_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn validate_topic(topic: &str) -> Result<(), WebPushError> {
    if topic.len() > 32 || !topic.chars().all(is_base64url_char) {
        Err(WebPushError::InvalidTopic)
    } else {
        Ok(())
    }
}

/// Builds the HTTP request for one notification. `default_auth`, if the notification carries no
/// per-item override, supplies the VAPID configuration to sign with; `now` is the unix timestamp
/// used for JWT `exp`.
pub fn prepare(
    notification: &Notification,
    default_auth: Option<&VapidConfig>,
    vapid_cache: &mut VapidCache,
    now: i64,
) -> Result<PreparedRequest, WebPushError> {
    let endpoint: Uri = notification
        .subscription
        .endpoint
        .parse()
        .map_err(|_| WebPushError::ProtocolError)?;

    let options = notification.options.clone().unwrap_or_default();

    if let Some(topic) = &options.topic {
        validate_topic(topic)?;
    }

    let mut headers = Vec::new();
    let body;

    match (&notification.payload, &notification.subscription.keys, notification.subscription.content_encoding) {
        (Some(payload), Some(keys), Some(coding)) => {
            let p256dh = crate::crypto::codec::b64_decode(&keys.p256dh)?;
            let auth_secret = crate::crypto::codec::b64_decode(&keys.auth)?;

            let engine = HttpEce::new(coding, &p256dh, &auth_secret, options.padding_max);
            let encrypted = engine.encrypt(payload)?;

            headers.push(("Content-Type", options.content_type.clone()));
            headers.push(("Content-Encoding", coding.as_str().to_string()));
            headers.push(("Content-Length", encrypted.content.len().to_string()));
            headers.extend(encrypted.crypto_headers);

            body = encrypted.content;
        }
        _ => {
            headers.push(("Content-Length", "0".to_string()));
            body = Vec::new();
        }
    }

    headers.push(("TTL", options.ttl.to_string()));
    if let Some(urgency) = options.urgency {
        headers.push(("Urgency", urgency.to_string()));
    }
    if let Some(topic) = &options.topic {
        headers.push(("Topic", topic.clone()));
    }

    let auth = notification.auth.as_ref().or(default_auth);

    if let (Some(auth), Some(coding)) = (auth, notification.subscription.content_encoding) {
        let audience = crate::vapid::signer::audience_from_endpoint(&endpoint)?;
        let signature = vapid_cache.get_or_sign(auth, &audience, coding, now)?;

        headers.push(("Authorization", signature.authorization));

        if let Some(crypto_key) = signature.crypto_key {
            if let Some(existing) = headers.iter_mut().find(|(name, _)| *name == "Crypto-Key") {
                existing.1 = format!("{};{}", existing.1, crypto_key);
            } else {
                headers.push(("Crypto-Key", crypto_key));
            }
        }
    }

    Ok(PreparedRequest { endpoint, headers, body })
}
