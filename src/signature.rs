//! HMAC-SHA256 request signatures.
//!
//! Clients sign the exact bytes of the request body with their credential token and send the
//! standard base64 encoding of the MAC in the `Authorization` header. Verification always
//! runs over the raw body as received, never over a re-serialized form.

use base64::engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{alphabet, Engine};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use lazy_static::lazy_static;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

lazy_static! {
    /// Standard alphabet, accepting input with or without padding.
    pub(crate) static ref BASE64_ENGINE: GeneralPurpose = GeneralPurpose::new(
        &alphabet::STANDARD,
        GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
    );
}

/// Returns true iff `signature` is the base64 HMAC-SHA256 of `message` keyed by `secret`.
///
/// Fails closed: a signature that doesn't decode is treated the same as a mismatch. The
/// comparison is constant-time.
#[must_use]
pub fn verify(secret: &[u8], signature: &str, message: &[u8]) -> bool {
    let Ok(expected) = BASE64_ENGINE.decode(signature) else {
        return false;
    };
    let Ok(mut mac) = <HmacSha256 as KeyInit>::new_from_slice(secret) else {
        return false;
    };
    mac.update(message);
    mac.verify_slice(&expected).is_ok()
}

/// Computes the base64 HMAC-SHA256 of `message` keyed by `secret`, in the form expected in
/// the `Authorization` header.
///
/// # Panics
///
/// Never in practice: HMAC accepts keys of any length, so key setup can't fail.
#[must_use]
pub fn sign(secret: &[u8], message: &[u8]) -> String {
    let mut mac = <HmacSha256 as KeyInit>::new_from_slice(secret)
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(message);
    general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}
