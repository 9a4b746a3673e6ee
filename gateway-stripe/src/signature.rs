//! Stripe webhook signature verification.
//!
//! Stripe signs each webhook delivery with a `Stripe-Signature` header of the
//! form `t=<unix seconds>,v1=<hex hmac>`, where the mac is HMAC-SHA256 over
//! `"{t}.{payload}"` keyed by the endpoint's shared webhook secret. The
//! secret is used exactly as configured (including any `whsec_` prefix).
//!
//! Verification fails closed: a malformed header, a timestamp outside the
//! tolerance window, or a mac mismatch all reject the delivery before the
//! payload is trusted.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted clock skew between the header timestamp and now.
pub const TOLERANCE_SECS: i64 = 300;

/// Computes the hex HMAC-SHA256 signature of `"{timestamp}.{payload}"`.
pub fn sign_payload(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Builds a complete `Stripe-Signature` header value for `payload`.
///
/// Used by tests and by clients that need to impersonate the provider
/// against a local gateway.
pub fn signature_header(payload: &[u8], secret: &str, timestamp: i64) -> String {
    format!("t={},v1={}", timestamp, sign_payload(payload, secret, timestamp))
}

/// Verifies a `Stripe-Signature` header against the raw request body.
pub fn verify_signature_header(payload: &[u8], header: &str, secret: &str) -> bool {
    verify_at(payload, header, secret, Utc::now().timestamp())
}

fn verify_at(payload: &[u8], header: &str, secret: &str, now: i64) -> bool {
    let Some((timestamp, provided)) = parse_header(header) else {
        return false;
    };

    // Replay protection: reject deliveries signed outside the window.
    if (now - timestamp).abs() > TOLERANCE_SECS {
        return false;
    }

    let expected = sign_payload(payload, secret, timestamp);
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

/// Parses `t=...,v1=...` pairs. Unknown schemes (`v0`) are ignored.
fn parse_header(header: &str) -> Option<(i64, String)> {
    let mut timestamp: Option<i64> = None;
    let mut v1: Option<String> = None;

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse().ok(),
            Some(("v1", value)) => v1 = Some(value.to_string()),
            _ => {}
        }
    }

    Some((timestamp?, v1?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test123secret456";
    const PAYLOAD: &[u8] = br#"{"type":"payment_intent.succeeded"}"#;

    #[test]
    fn test_valid_signature_accepted() {
        let now = Utc::now().timestamp();
        let header = signature_header(PAYLOAD, SECRET, now);

        assert!(verify_signature_header(PAYLOAD, &header, SECRET));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let now = Utc::now().timestamp();
        let header = signature_header(PAYLOAD, "whsec_other", now);

        assert!(!verify_signature_header(PAYLOAD, &header, SECRET));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let now = Utc::now().timestamp();
        let header = signature_header(PAYLOAD, SECRET, now);
        let tampered = br#"{"type":"payment_intent.succeeded","hacked":true}"#;

        assert!(!verify_signature_header(tampered, &header, SECRET));
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let stale = Utc::now().timestamp() - TOLERANCE_SECS - 60;
        let header = signature_header(PAYLOAD, SECRET, stale);

        assert!(!verify_signature_header(PAYLOAD, &header, SECRET));
    }

    #[test]
    fn test_future_timestamp_rejected() {
        let future = Utc::now().timestamp() + TOLERANCE_SECS + 60;
        let header = signature_header(PAYLOAD, SECRET, future);

        assert!(!verify_signature_header(PAYLOAD, &header, SECRET));
    }

    #[test]
    fn test_missing_parts_rejected() {
        let now = Utc::now().timestamp();
        let sig = sign_payload(PAYLOAD, SECRET, now);

        assert!(!verify_signature_header(PAYLOAD, &format!("t={}", now), SECRET));
        assert!(!verify_signature_header(PAYLOAD, &format!("v1={}", sig), SECRET));
        assert!(!verify_signature_header(PAYLOAD, "not-a-header", SECRET));
        assert!(!verify_signature_header(PAYLOAD, "", SECRET));
    }

    #[test]
    fn test_unknown_schemes_ignored() {
        let now = Utc::now().timestamp();
        let sig = sign_payload(PAYLOAD, SECRET, now);
        let header = format!("t={},v0=deadbeef,v1={}", now, sig);

        assert!(verify_signature_header(PAYLOAD, &header, SECRET));
    }

    #[test]
    fn test_verify_at_boundary() {
        let now = 1_700_000_000;
        let header = signature_header(PAYLOAD, SECRET, now - TOLERANCE_SECS);

        assert!(verify_at(PAYLOAD, &header, SECRET, now));

        let header = signature_header(PAYLOAD, SECRET, now - TOLERANCE_SECS - 1);
        assert!(!verify_at(PAYLOAD, &header, SECRET, now));
    }
}
