//! VAPID validation configuration (§6): accepts a raw `{publicKey, privateKey}` pair or a PEM,
//! validates the subject, and produces a `VapidConfig` ready to hand to the signer.
//!
//! Grounded on the teacher's `VapidSignatureBuilder::from_pem`/`from_der` entry points,
//! generalized into the single validating constructor the spec's negative-table scenarios expect.

use std::path::Path;

use crate::crypto::codec;
use crate::error::WebPushError;
use crate::vapid::key::VapidKeyPair;

/// How the caller supplies VAPID key material.
pub enum VapidConfigSource<'a> {
    Raw {
        subject: &'a str,
        public_key: &'a str,
        private_key: &'a str,
    },
    Pem {
        subject: &'a str,
        pem: &'a str,
    },
    PemFile {
        subject: &'a str,
        pem_file: &'a Path,
    },
}

#[derive(Clone, Debug)]
pub struct VapidConfig {
    pub subject: String,
    pub(crate) key_pair: VapidKeyPair,
}

impl VapidConfig {
    pub fn validate(source: VapidConfigSource<'_>) -> Result<Self, WebPushError> {
        let (subject, key_pair) = match source {
            VapidConfigSource::Raw {
                subject,
                public_key,
                private_key,
            } => {
                validate_subject(subject)?;

                let public = codec::b64_decode(public_key)?;
                if public.len() != 65 {
                    return Err(WebPushError::ConfigError(format!(
                        "VAPID public key must decode to 65 bytes, got {}",
                        public.len()
                    )));
                }

                let private = codec::b64_decode(private_key)?;
                if private.len() != 32 {
                    return Err(WebPushError::ConfigError(format!(
                        "VAPID private key must decode to 32 bytes, got {}",
                        private.len()
                    )));
                }

                let key_pair = VapidKeyPair::from_raw_private_key(&private)?;

                if key_pair.public_key_bytes().as_slice() != public.as_slice() {
                    return Err(WebPushError::ConfigError(
                        "VAPID public key does not match the supplied private key".into(),
                    ));
                }

                (subject.to_string(), key_pair)
            }
            VapidConfigSource::Pem { subject, pem } => {
                validate_subject(subject)?;
                let key_pair = VapidKeyPair::from_pem(pem)?;
                (subject.to_string(), key_pair)
            }
            VapidConfigSource::PemFile { subject, pem_file } => {
                validate_subject(subject)?;

                let pem = std::fs::read_to_string(pem_file)
                    .map_err(|e| WebPushError::ConfigError(format!("could not read VAPID PEM file: {e}")))?;
                let key_pair = VapidKeyPair::from_pem(&pem)?;

                (subject.to_string(), key_pair)
            }
        };

        Ok(VapidConfig { subject, key_pair })
    }
}

fn validate_subject(subject: &str) -> Result<(), WebPushError> {
    if let Some(rest) = subject.strip_prefix("mailto:") {
        let mut parts = rest.splitn(2, '@');
        let local = parts.next().unwrap_or("");
        let domain = parts.next().unwrap_or("");

        if local.is_empty() || domain.is_empty() {
            return Err(WebPushError::ConfigError(format!("invalid mailto subject: {subject}")));
        }

        Ok(())
    } else if subject.starts_with("https://") {
        let uri: http::Uri = subject
            .parse()
            .map_err(|_| WebPushError::ConfigError(format!("invalid https subject: {subject}")))?;

        match uri.host() {
            Some(host) if !host.is_empty() => Ok(()),
            _ => Err(WebPushError::ConfigError(format!("https subject missing a host: {subject}"))),
        }
    } else {
        Err(WebPushError::ConfigError(format!(
            "subject must be a mailto: or https: URL, got {subject:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pem_file_source<'a>(subject: &'a str, path: &'a str) -> VapidConfigSource<'a> {
        VapidConfigSource::PemFile {
            subject,
            pem_file: std::path::Path::new(path),
        }
    }

    #[test]
    fn validation_rejects_every_scenario_in_the_negative_table() {
        let empty_raw = VapidConfigSource::Raw {
            subject: "",
            public_key: "",
            private_key: "",
        };
        assert!(VapidConfig::validate(empty_raw).is_err());

        let bad_subjects = ["", "test", "mailto:", "mailto:localhost", "https://"];
        for subject in bad_subjects {
            let source = VapidConfigSource::Raw {
                subject,
                public_key: "",
                private_key: "",
            };
            assert!(VapidConfig::validate(source).is_err(), "subject {subject:?} should be rejected");
        }

        assert!(VapidConfig::validate(pem_file_source("https://example.com", "")).is_err());
        assert!(VapidConfig::validate(pem_file_source("https://example.com", "abc.pem")).is_err());

        assert!(VapidConfig::validate(VapidConfigSource::Pem {
            subject: "https://example.com",
            pem: "",
        })
        .is_err());

        assert!(VapidConfig::validate(VapidConfigSource::Raw {
            subject: "https://example.com",
            public_key: "",
            private_key: "irrelevant",
        })
        .is_err());
    }

    #[test]
    fn accepts_a_freshly_generated_key_pair() {
        let pair = VapidKeyPair::generate();
        let source = VapidConfigSource::Raw {
            subject: "mailto:ops@example.com",
            public_key: &pair.public_key_base64(),
            private_key: &pair.private_key_base64(),
        };

        assert!(VapidConfig::validate(source).is_ok());
    }
}
