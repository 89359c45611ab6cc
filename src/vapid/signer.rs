//! VAPID signer (C5): builds the ES256 JWT and the coding-specific `Authorization`/`Crypto-Key`
//! header set.
//!
//! Grounded on the teacher's `vapid::signer::VapidSigner::sign`, which built the same
//! `header.claims` signing input and defaulted `aud`/`exp` the same way; the DER-to-raw-`r||s`
//! parsing that used to live here moved into `crypto::es256`.

use http::Uri;
use serde::Serialize;

use crate::crypto::{codec, es256};
use crate::error::WebPushError;
use crate::http_ece::ContentEncoding;
use crate::vapid::config::VapidConfig;

const TWELVE_HOURS: i64 = 12 * 60 * 60;
const TWENTY_FOUR_HOURS: i64 = 24 * 60 * 60;

#[derive(Serialize)]
struct Claims<'a> {
    aud: &'a str,
    exp: i64,
    sub: &'a str,
}

/// The assembled VAPID header set for one `(audience, coding)` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VapidSignature {
    pub authorization: String,
    pub crypto_key: Option<String>,
}

/// Derives `scheme://host` from a push service endpoint, per design note (a): non-default ports
/// pass through unmodified as part of the host component.
pub fn audience_from_endpoint(endpoint: &Uri) -> Result<String, WebPushError> {
    let scheme = endpoint.scheme_str().ok_or(WebPushError::ProtocolError)?;
    let authority = endpoint.authority().ok_or(WebPushError::ProtocolError)?;
    Ok(format!("{scheme}://{authority}"))
}

/// `now`: the current unix timestamp, supplied by the caller so this stays a pure function (and
/// so the literal test vectors below can pin it).
pub fn sign(config: &VapidConfig, audience: &str, coding: ContentEncoding, now: i64, expiration: Option<i64>) -> Result<VapidSignature, WebPushError> {
    let exp = expiration.unwrap_or(now + TWELVE_HOURS);

    if exp > now + TWENTY_FOUR_HOURS {
        return Err(WebPushError::ConfigError("VAPID exp must be no more than 24h in the future".into()));
    }

    let header_b64 = codec::b64_encode(br#"{"typ":"JWT","alg":"ES256"}"#);

    let claims = Claims {
        aud: audience,
        exp,
        sub: &config.subject,
    };
    let claims_json = serde_json::to_vec(&claims)?;
    let claims_b64 = codec::b64_encode(claims_json);

    let signing_input = format!("{header_b64}.{claims_b64}");
    let signature = es256::sign(signing_input.as_bytes(), config.key_pair.secret())?;
    let jwt = format!("{signing_input}.{}", codec::b64_encode(signature));

    let public_key_b64 = config.key_pair.public_key_base64();

    Ok(match coding {
        ContentEncoding::Aesgcm => VapidSignature {
            authorization: format!("WebPush {jwt}"),
            crypto_key: Some(format!("p256ecdsa={public_key_b64}")),
        },
        ContentEncoding::Aes128Gcm => VapidSignature {
            authorization: format!("vapid t={jwt}, k={public_key_b64}"),
            crypto_key: None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vapid::config::{VapidConfig, VapidConfigSource};

    const AUDIENCE: &str = "http://push.com";
    const SUBJECT: &str = "https://test.com";
    const PUBLIC_KEY: &str = "BA6jvk34k6YjElHQ6S0oZwmrsqHdCNajxcod6KJnI77Dagikfb--O_kYXcR2eflRz6l3PcI2r8fPCH3BElLQHDk";
    const PRIVATE_KEY: &str = "-3CdhFOqjzixgAbUSa0Zv9zi-dwDVmWO7672aBxSFPQ";
    const EXP: i64 = 1475452165;

    fn test_config() -> VapidConfig {
        VapidConfig::validate(VapidConfigSource::Raw {
            subject: SUBJECT,
            public_key: PUBLIC_KEY,
            private_key: PRIVATE_KEY,
        })
        .unwrap()
    }

    #[test]
    fn aesgcm_authorization_and_crypto_key_match_scenario_1() {
        let config = test_config();
        let signature = sign(&config, AUDIENCE, ContentEncoding::Aesgcm, 0, Some(EXP)).unwrap();

        assert!(signature.authorization.starts_with(
            "WebPush eyJ0eXAiOiJKV1QiLCJhbGciOiJFUzI1NiJ9.eyJhdWQiOiJodHRwOi8vcHVzaC5jb20iLCJleHAiOjE0NzU0NTIxNjUsInN1YiI6Imh0dHBzOi8vdGVzdC5jb20ifQ."
        ));

        assert_eq!(
            Some("p256ecdsa=BA6jvk34k6YjElHQ6S0oZwmrsqHdCNajxcod6KJnI77Dagikfb--O_kYXcR2eflRz6l3PcI2r8fPCH3BElLQHDk".to_string()),
            signature.crypto_key
        );
    }

    #[test]
    fn aes128gcm_authorization_matches_scenario_2_with_no_crypto_key() {
        let config = test_config();
        let signature = sign(&config, AUDIENCE, ContentEncoding::Aes128Gcm, 0, Some(EXP)).unwrap();

        assert!(signature.authorization.starts_with(
            "vapid t=eyJ0eXAiOiJKV1QiLCJhbGciOiJFUzI1NiJ9.eyJhdWQiOiJodHRwOi8vcHVzaC5jb20iLCJleHAiOjE0NzU0NTIxNjUsInN1YiI6Imh0dHBzOi8vdGVzdC5jb20ifQ."
        ));
        assert!(signature
            .authorization
            .ends_with(", k=BA6jvk34k6YjElHQ6S0oZwmrsqHdCNajxcod6KJnI77Dagikfb--O_kYXcR2eflRz6l3PcI2r8fPCH3BElLQHDk"));
        assert_eq!(None, signature.crypto_key);
    }

    #[test]
    fn rejects_expirations_further_than_24h_out() {
        let config = test_config();
        let result = sign(&config, AUDIENCE, ContentEncoding::Aes128Gcm, 0, Some(TWENTY_FOUR_HOURS + 1));
        assert!(result.is_err());
    }

    #[test]
    fn audience_keeps_non_default_ports() {
        let endpoint: Uri = "https://push.example.com:8443/wpush/abc".parse().unwrap();
        assert_eq!("https://push.example.com:8443", audience_from_endpoint(&endpoint).unwrap());
    }
}
