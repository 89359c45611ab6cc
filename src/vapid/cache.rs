//! Per-flush VAPID signature cache (§4.5): memoises the header set keyed by
//! `(audience, coding, fingerprint(keyPair))` so a flush signing the same key pair for many
//! subscribers sharing a push service doesn't recompute the same JWT repeatedly.

use std::collections::HashMap;

use crate::http_ece::ContentEncoding;
use crate::vapid::config::VapidConfig;
use crate::vapid::signer::{self, VapidSignature};
use crate::error::WebPushError;

#[derive(Default)]
pub struct VapidCache {
    entries: HashMap<(String, ContentEncoding, u64), VapidSignature>,
}

impl VapidCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_sign(
        &mut self,
        config: &VapidConfig,
        audience: &str,
        coding: ContentEncoding,
        now: i64,
    ) -> Result<VapidSignature, WebPushError> {
        let key = (audience.to_string(), coding, config.key_pair.fingerprint());

        if let Some(cached) = self.entries.get(&key) {
            return Ok(cached.clone());
        }

        let signature = signer::sign(config, audience, coding, now, None)?;
        self.entries.insert(key, signature.clone());
        Ok(signature)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vapid::config::VapidConfigSource;
    use crate::vapid::key::VapidKeyPair;

    #[test]
    fn reuses_signatures_for_the_same_key() {
        let pair = VapidKeyPair::generate();
        let config = VapidConfig::validate(VapidConfigSource::Raw {
            subject: "mailto:ops@example.com",
            public_key: &pair.public_key_base64(),
            private_key: &pair.private_key_base64(),
        })
        .unwrap();

        let mut cache = VapidCache::new();
        let first = cache.get_or_sign(&config, "https://push.example.com", ContentEncoding::Aes128Gcm, 0).unwrap();
        let second = cache.get_or_sign(&config, "https://push.example.com", ContentEncoding::Aes128Gcm, 0).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn clear_forces_resigning() {
        let pair = VapidKeyPair::generate();
        let config = VapidConfig::validate(VapidConfigSource::Raw {
            subject: "mailto:ops@example.com",
            public_key: &pair.public_key_base64(),
            private_key: &pair.private_key_base64(),
        })
        .unwrap();

        let mut cache = VapidCache::new();
        cache.get_or_sign(&config, "https://push.example.com", ContentEncoding::Aes128Gcm, 0).unwrap();
        assert_eq!(1, cache.entries.len());
        cache.clear();
        assert_eq!(0, cache.entries.len());
    }
}
