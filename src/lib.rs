//! # webpush-notify
//!
//! A library for queueing and sending Web Push notifications. Content payloads are encrypted per
//! [RFC 8188](https://datatracker.ietf.org/doc/html/rfc8188) (`aes128gcm`) or the legacy
//! `aesgcm` draft coding, and requests are authenticated with
//! [VAPID](https://datatracker.ietf.org/doc/html/rfc8292). The dispatcher is asynchronous and
//! runs on any executor; an optional [`hyper`](https://crates.io/crates/hyper) based transport is
//! available behind the `hyper-client`/`hyper-rustls-client` features.
//!
//! # Example
//!
//! ```no_run
//! # use webpush_notify::*;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
//! let subscription = Subscription::new(
//!     "https://updates.push.services.mozilla.com/wpush/v1/...",
//!     "key_from_browser_as_base64",
//!     "auth_from_browser_as_base64",
//!     ContentEncoding::Aes128Gcm,
//! );
//!
//! let auth = VapidConfig::validate(VapidConfigSource::PemFile {
//!     subject: "mailto:ops@example.com",
//!     pem_file: "private.pem".as_ref(),
//! })?;
//!
//! let mut queue = NotificationQueue::new();
//! queue.enqueue(Notification::new(subscription).with_payload(b"hello!".to_vec()))?;
//!
//! let client = clients::isahc_client::IsahcWebPushClient::new()?;
//! let dispatcher = Dispatcher::new(client).with_vapid(auth);
//!
//! for report in dispatcher.flush(&mut queue) {
//!     println!("{}: {}", report.endpoint, report.success);
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate log;

pub mod clients;
mod crypto;
pub mod dispatcher;
mod error;
pub mod http_ece;
pub mod message;
pub mod notification;
pub mod options;
pub mod padding;
pub mod report;
pub mod subscription;
pub mod vapid;

pub use crate::clients::{PushResponse, WebPushClient};
pub use crate::dispatcher::{Dispatcher, Flush};
pub use crate::error::WebPushError;
pub use crate::http_ece::ContentEncoding;
pub use crate::message::PreparedRequest;
pub use crate::notification::{Notification, NotificationQueue};
pub use crate::options::{DispatchOptions, PushOptions, Urgency};
pub use crate::padding::{MAX_COMPATIBILITY, MAX_PAYLOAD};
pub use crate::report::{FailureReason, MessageSentReport};
pub use crate::subscription::{Subscription, SubscriptionKeys};
pub use crate::vapid::{create_vapid_keys, VapidCache, VapidConfig, VapidConfigSource, VapidKeyPair, VapidKeys, VapidSignature};
