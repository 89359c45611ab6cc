//! Subscription model (C9): the endpoint and keys a browser hands back from a `pushSubscription`
//! object. Grounded on the teacher's `SubscriptionInfo`/`SubscriptionKeys`, generalized with an
//! explicit content coding tag and optional expiration per the data model.

use serde::{Deserialize, Serialize};

use crate::http_ece::ContentEncoding;

/// Encryption keys from the client, base64url (no padding) encoded, as delivered in the
/// `pushSubscription.keys` object.
#[derive(Debug, Clone, Deserialize, Serialize, Eq, PartialEq, Hash)]
pub struct SubscriptionKeys {
    /// The subscriber's P-256 public key.
    pub p256dh: String,
    /// The 16-byte authentication secret.
    pub auth: String,
}

/// Everything needed to address and encrypt for one subscriber.
///
/// Invariant: if a notification carries a payload, `keys` and `content_encoding` must both be
/// present; enforced by [`crate::notification::NotificationQueue::enqueue`], not by this type
/// itself, since a bare endpoint with no keys is a valid empty-payload subscription.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Subscription {
    pub endpoint: String,
    pub keys: Option<SubscriptionKeys>,
    pub content_encoding: Option<ContentEncoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<i64>,
}

impl Subscription {
    pub fn new(endpoint: impl Into<String>, p256dh: impl Into<String>, auth: impl Into<String>, content_encoding: ContentEncoding) -> Self {
        Subscription {
            endpoint: endpoint.into(),
            keys: Some(SubscriptionKeys {
                p256dh: p256dh.into(),
                auth: auth.into(),
            }),
            content_encoding: Some(content_encoding),
            expiration_time: None,
        }
    }

    /// A subscription with no keys, valid only for empty-payload notifications.
    pub fn without_keys(endpoint: impl Into<String>) -> Self {
        Subscription {
            endpoint: endpoint.into(),
            keys: None,
            content_encoding: None,
            expiration_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_browser_subscription_object() {
        let json = serde_json::json!({
            "endpoint": "https://fcm.googleapis.com/fcm/send/abc",
            "expirationTime": null,
            "keys": {
                "p256dh": "BGa4N1PI79lboMR_YrwCiCsgp35DRvedt7opHcf0yM3iOBTSoQYqQLwWxAfRKE6tsDnReWmhsImkhDF_DBdkNSU",
                "auth": "EvcWjEgzr4rbvhfi3yds0A"
            }
        });

        let subscription: Subscription = serde_json::from_value(json).unwrap();
        assert_eq!("https://fcm.googleapis.com/fcm/send/abc", subscription.endpoint);
        assert!(subscription.keys.is_some());
    }
}
