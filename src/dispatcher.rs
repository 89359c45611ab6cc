//! Dispatcher (C7, §4.7/§4.8/§5): drains a [`NotificationQueue`] and turns each notification into
//! a delivery report, either as an ordered lazy sequence or through a bounded-concurrency pool.
//!
//! Grounded on the teacher's per-client `send` methods, which drove one future at a time to
//! completion via the async runtime; this generalizes that to many queued items. Ordered flush
//! keeps the teacher's one-future-per-call shape and surfaces it as a synchronous [`Iterator`],
//! blocking on each request in turn with `futures::executor::block_on`. Pooled flush is grounded
//! on cloudillo-cloudillo-rs's `server/src/profile/sync.rs`, which drives a bounded number of
//! futures concurrently with `futures::stream::StreamExt::buffer_unordered`.

use std::time::{SystemTime, UNIX_EPOCH};

use futures::stream::{self, StreamExt};

use crate::clients::WebPushClient;
use crate::message;
use crate::notification::{Notification, NotificationQueue};
use crate::options::DispatchOptions;
use crate::report::{FailureReason, MessageSentReport};
use crate::vapid::{VapidCache, VapidConfig};

fn unix_now() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or(0)
}

/// Single-writer dispatcher over one HTTP transport. `queue_notification` and the flush methods
/// must not be called concurrently on the same instance (§5): the VAPID cache and the queue it
/// drains are both instance-local, unsynchronized state.
pub struct Dispatcher<C> {
    client: C,
    default_auth: Option<VapidConfig>,
    options: DispatchOptions,
}

impl<C: WebPushClient> Dispatcher<C> {
    pub fn new(client: C) -> Self {
        Dispatcher {
            client,
            default_auth: None,
            options: DispatchOptions::default(),
        }
    }

    /// VAPID configuration used for notifications that carry no per-item override.
    pub fn with_vapid(mut self, auth: VapidConfig) -> Self {
        self.default_auth = Some(auth);
        self
    }

    pub fn with_dispatch_options(mut self, options: DispatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Drains `queue` and returns a lazy, FIFO-ordered sequence of reports. Each call to `next()`
    /// prepares (encrypts, signs) and sends one notification, blocking the caller until that
    /// request completes; the VAPID cache lives for the lifetime of the returned iterator and is
    /// cleared once it is dropped.
    pub fn flush(&self, queue: &mut NotificationQueue) -> Flush<'_, C> {
        Flush {
            client: &self.client,
            default_auth: self.default_auth.as_ref(),
            items: queue.drain().into_iter(),
            vapid_cache: VapidCache::new(),
        }
    }

    /// Drains `queue` and sends every notification through a bounded-concurrency pool, invoking
    /// `on_report` once per notification in completion order. Processes the queue in batches of
    /// `batch_size` (falling back to [`DispatchOptions::batch_size`]); batch N+1 does not start
    /// until batch N has fully drained. `concurrency` bounds in-flight requests within a batch
    /// (falling back to [`DispatchOptions::request_concurrency`]).
    pub async fn flush_pooled<F>(&self, queue: &mut NotificationQueue, batch_size: Option<usize>, concurrency: Option<usize>, mut on_report: F)
    where
        F: FnMut(MessageSentReport),
    {
        let batch_size = batch_size.unwrap_or(self.options.batch_size).max(1);
        let concurrency = concurrency.unwrap_or(self.options.request_concurrency).max(1);

        let items = queue.drain();
        let mut vapid_cache = VapidCache::new();

        for batch in items.chunks(batch_size) {
            // Preparation (encryption, VAPID signing) needs `&mut` access to the shared cache, so
            // it runs sequentially ahead of the concurrent sends below. A notification that fails
            // to prepare is reported immediately, without entering the pool. One batch fully
            // drains before the next begins.
            let mut to_send = Vec::with_capacity(batch.len());

            for notification in batch {
                let endpoint = notification.subscription.endpoint.clone();

                match message::prepare(notification, self.default_auth.as_ref(), &mut vapid_cache, unix_now()) {
                    Ok(request) => to_send.push((endpoint, request)),
                    Err(e) => on_report(MessageSentReport::failure(endpoint, FailureReason::Prepare(e), None)),
                }
            }

            let reports = stream::iter(to_send)
                .map(|(endpoint, request)| async move {
                    let sent = request.clone();
                    match self.client.send(request).await {
                        Ok(response) => MessageSentReport::success(endpoint, sent, response),
                        Err(e) => MessageSentReport::failure(endpoint, FailureReason::Transport(e), Some(sent)),
                    }
                })
                .buffer_unordered(concurrency)
                .collect::<Vec<_>>()
                .await;

            for report in reports {
                on_report(report);
            }
        }

        vapid_cache.clear();
    }
}

/// A pull-based, non-restartable iterator of delivery reports produced by [`Dispatcher::flush`].
pub struct Flush<'a, C> {
    client: &'a C,
    default_auth: Option<&'a VapidConfig>,
    items: std::vec::IntoIter<Notification>,
    vapid_cache: VapidCache,
}

impl<'a, C: WebPushClient> Iterator for Flush<'a, C> {
    type Item = MessageSentReport;

    fn next(&mut self) -> Option<Self::Item> {
        let notification = self.items.next()?;
        let endpoint = notification.subscription.endpoint.clone();

        let report = match message::prepare(&notification, self.default_auth, &mut self.vapid_cache, unix_now()) {
            Ok(request) => {
                let sent = request.clone();
                match futures::executor::block_on(self.client.send(request)) {
                    Ok(response) => MessageSentReport::success(endpoint, sent, response),
                    Err(e) => MessageSentReport::failure(endpoint, FailureReason::Transport(e), Some(sent)),
                }
            }
            Err(e) => MessageSentReport::failure(endpoint, FailureReason::Prepare(e), None),
        };

        Some(report)
    }
}

impl<'a, C> Drop for Flush<'a, C> {
    fn drop(&mut self) {
        self.vapid_cache.clear();
    }
}
