//! Send-time options (§6): per-notification overrides and the flush-wide dispatcher tuning
//! knobs, generalized from the teacher's scattered `ttl`/`VapidSignature` constructor arguments
//! into one `PushOptions` value with `Default`.

use std::fmt;

use crate::padding::MAX_COMPATIBILITY;

/// Urgency per RFC 8030 §5.3, carried on the teacher's `Urgency` enum unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    VeryLow,
    Low,
    Normal,
    High,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Urgency::VeryLow => "very-low",
            Urgency::Low => "low",
            Urgency::Normal => "normal",
            Urgency::High => "high",
        };
        write!(f, "{s}")
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Normal
    }
}

/// Default TTL: 28 days, matching the teacher's `ttl` default.
pub const DEFAULT_TTL: u32 = 2_419_200;
pub const DEFAULT_BATCH_SIZE: usize = 1000;
pub const DEFAULT_REQUEST_CONCURRENCY: usize = 100;
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
pub const DEFAULT_PADDING_MAX: usize = MAX_COMPATIBILITY;

/// Per-notification delivery options, overridable per item and defaulted at the queue level.
#[derive(Debug, Clone, PartialEq)]
pub struct PushOptions {
    pub ttl: u32,
    pub urgency: Option<Urgency>,
    pub topic: Option<String>,
    pub content_type: String,
    pub padding_max: usize,
}

impl Default for PushOptions {
    fn default() -> Self {
        PushOptions {
            ttl: DEFAULT_TTL,
            urgency: None,
            topic: None,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            padding_max: DEFAULT_PADDING_MAX,
        }
    }
}

/// Flush-wide tuning: batch size for [`crate::dispatcher::Dispatcher::flush_pooled`] and the
/// bound on in-flight requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    pub batch_size: usize,
    pub request_concurrency: usize,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        DispatchOptions {
            batch_size: DEFAULT_BATCH_SIZE,
            request_concurrency: DEFAULT_REQUEST_CONCURRENCY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_constants() {
        let options = PushOptions::default();
        assert_eq!(DEFAULT_TTL, options.ttl);
        assert_eq!(None, options.urgency);
        assert_eq!(None, options.topic);
        assert_eq!("application/octet-stream", options.content_type);

        let dispatch = DispatchOptions::default();
        assert_eq!(1000, dispatch.batch_size);
        assert_eq!(100, dispatch.request_concurrency);
    }

    #[test]
    fn urgency_display_matches_rfc_tokens() {
        assert_eq!("very-low", Urgency::VeryLow.to_string());
        assert_eq!("high", Urgency::High.to_string());
    }
}
