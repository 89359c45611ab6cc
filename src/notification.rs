//! Notification queue (C6, §4.6): an append-only FIFO list of `Notification`s, replacing the
//! teacher's declarative `Notification`/`NotificationAction` content model (that shaped a payload
//! body; it didn't queue anything) with the spec's queue-item abstraction that the dispatcher
//! drains on flush.

use crate::error::WebPushError;
use crate::options::PushOptions;
use crate::padding::MAX_PAYLOAD;
use crate::subscription::Subscription;
use crate::vapid::VapidConfig;

/// One queued push, owning everything the dispatcher needs to prepare a request for it.
#[derive(Debug, Clone)]
pub struct Notification {
    pub subscription: Subscription,
    pub payload: Option<Vec<u8>>,
    pub options: Option<PushOptions>,
    pub auth: Option<VapidConfig>,
}

impl Notification {
    pub fn new(subscription: Subscription) -> Self {
        Notification {
            subscription,
            payload: None,
            options: None,
            auth: None,
        }
    }

    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_options(mut self, options: PushOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_auth_override(mut self, auth: VapidConfig) -> Self {
        self.auth = Some(auth);
        self
    }

    fn validate(&self) -> Result<(), WebPushError> {
        if let Some(payload) = &self.payload {
            if payload.len() > MAX_PAYLOAD {
                return Err(WebPushError::PayloadTooLarge);
            }

            if self.subscription.keys.is_none() || self.subscription.content_encoding.is_none() {
                return Err(WebPushError::PayloadError(
                    "a notification with a payload needs a subscription carrying keys and a content coding".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Append-only FIFO queue of notifications, owned by the caller until a flush drains it.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    items: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        NotificationQueue::default()
    }

    /// Validates the notification per §4.6 and appends it. On failure, nothing is enqueued.
    pub fn enqueue(&mut self, notification: Notification) -> Result<(), WebPushError> {
        notification.validate()?;
        self.items.push(notification);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes and returns every queued notification, FIFO order preserved.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.items.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_ece::ContentEncoding;

    fn subscription_with_keys() -> Subscription {
        Subscription::new(
            "https://push.example.com/abc",
            "BGa4N1PI79lboMR_YrwCiCsgp35DRvedt7opHcf0yM3iOBTSoQYqQLwWxAfRKE6tsDnReWmhsImkhDF_DBdkNSU",
            "EvcWjEgzr4rbvhfi3yds0A",
            ContentEncoding::Aes128Gcm,
        )
    }

    #[test]
    fn enqueue_preserves_fifo_order() {
        let mut queue = NotificationQueue::new();
        queue.enqueue(Notification::new(Subscription::without_keys("https://a"))).unwrap();
        queue.enqueue(Notification::new(Subscription::without_keys("https://b"))).unwrap();

        let drained = queue.drain();
        assert_eq!("https://a", drained[0].subscription.endpoint);
        assert_eq!("https://b", drained[1].subscription.endpoint);
    }

    #[test]
    fn drain_empties_the_queue() {
        let mut queue = NotificationQueue::new();
        queue.enqueue(Notification::new(Subscription::without_keys("https://a"))).unwrap();
        queue.drain();
        assert_eq!(0, queue.len());
    }

    #[test]
    fn rejects_oversized_payload() {
        let mut queue = NotificationQueue::new();
        let notification = Notification::new(subscription_with_keys()).with_payload(vec![0u8; MAX_PAYLOAD + 1]);
        assert_eq!(Err(WebPushError::PayloadTooLarge), queue.enqueue(notification));
        assert_eq!(0, queue.len());
    }

    #[test]
    fn rejects_a_payload_without_a_content_coding() {
        let mut queue = NotificationQueue::new();
        let notification = Notification::new(Subscription::without_keys("https://push.example.com/abc")).with_payload(b"hi".to_vec());
        assert!(queue.enqueue(notification).is_err());
    }
}
