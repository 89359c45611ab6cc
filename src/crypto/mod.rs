//! Crypto primitives (C2): ECDH P-256, HKDF-SHA256, AES-128-GCM, and ES256 signing.
//!
//! These are pure functions with no state carried between calls, grounded in the teacher's older
//! `http_ece/{mod,aes128gcm,aesgcm}.rs` and `vapid/signer.rs`, rebuilt on the RustCrypto family
//! (`p256`, `hkdf`, `sha2`, `aes-gcm`) instead of `ring`/`openssl` so that the encryption and
//! signing steps stay manual rather than delegating to an `ece`-style black box.

pub mod aead;
pub mod codec;
pub mod ecdh;
pub mod es256;
pub mod hkdf;

pub use ecdh::EphemeralKeyPair;
