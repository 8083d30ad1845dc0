//! Naboopay webhook signature verification.
//!
//! Naboopay signs the raw request body with HMAC-SHA256 using the merchant's
//! webhook secret and sends the lowercase hex digest in `x_signature`.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::transaction_status::TransactionStatus;
use super::webhook_errors::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the body signature.
pub const SIGNATURE_HEADER: &str = "x_signature";

/// Body of a Naboopay webhook notification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookPayload {
    /// Naboopay transaction id (the order's correlation attribute).
    pub order_id: String,
    /// Absent status reads as an unknown, empty code.
    #[serde(default)]
    pub transaction_status: TransactionStatus,
}

/// Verifier for Naboopay webhook signatures.
pub struct WebhookVerifier {
    secret: SecretString,
}

impl WebhookVerifier {
    /// Creates a verifier from the configured secret.
    ///
    /// # Errors
    ///
    /// Returns `SecretNotConfigured` if the secret is absent or blank.
    pub fn from_secret(secret: Option<&SecretString>) -> Result<Self, WebhookError> {
        match secret {
            Some(secret) if !secret.expose_secret().trim().is_empty() => Ok(Self {
                secret: secret.clone(),
            }),
            _ => Err(WebhookError::SecretNotConfigured),
        }
    }

    /// Verifies the signature of the raw body.
    ///
    /// The header is hex-decoded and compared to the expected digest in
    /// constant time.
    ///
    /// # Errors
    ///
    /// - `MissingSignature` - header absent or empty
    /// - `InvalidSignature` - header not hex or digest mismatch
    pub fn verify(&self, payload: &[u8], signature: Option<&str>) -> Result<(), WebhookError> {
        let signature = signature
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(WebhookError::MissingSignature)?;

        let provided = hex::decode(signature).map_err(|_| WebhookError::InvalidSignature)?;
        let expected = compute_digest(self.secret.expose_secret().as_bytes(), payload);

        if !constant_time_compare(&expected, &provided) {
            return Err(WebhookError::InvalidSignature);
        }

        Ok(())
    }

    /// Verifies the signature and parses the payload.
    ///
    /// # Errors
    ///
    /// Signature errors from [`verify`](Self::verify), then `ParseError` if
    /// the authenticated body is not a valid notification.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookPayload, WebhookError> {
        self.verify(payload, signature)?;

        serde_json::from_slice(payload).map_err(|e| WebhookError::ParseError(e.to_string()))
    }
}

/// Computes the lowercase hex signature Naboopay sends for `payload`.
pub fn compute_signature(secret: &str, payload: &[u8]) -> String {
    hex::encode(compute_digest(secret.as_bytes(), payload))
}

fn compute_digest(key: &[u8], payload: &[u8]) -> Vec<u8> {
    // HMAC accepts keys of any length, so this never fails.
    let mut mac = match HmacSha256::new_from_slice(key) {
        Ok(mac) => mac,
        Err(_) => return Vec::new(),
    };
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Performs constant-time comparison of two byte slices.
///
/// Only the length is compared eagerly; it is public (32 bytes).
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.is_empty() || a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_SECRET: &str = "qh2spgnIj4xZboZWQmTAr6DMwgUCul9p";

    fn verifier() -> WebhookVerifier {
        WebhookVerifier::from_secret(Some(&SecretString::new(TEST_SECRET.to_string()))).unwrap()
    }

    // ══════════════════════════════════════════════════════════════
    // Construction
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn missing_secret_is_rejected() {
        let result = WebhookVerifier::from_secret(None);
        assert!(matches!(result, Err(WebhookError::SecretNotConfigured)));
    }

    #[test]
    fn blank_secret_is_rejected() {
        let blank = SecretString::new("   ".to_string());
        let result = WebhookVerifier::from_secret(Some(&blank));
        assert!(matches!(result, Err(WebhookError::SecretNotConfigured)));
    }

    // ══════════════════════════════════════════════════════════════
    // Signature Verification
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn known_hmac_vector() {
        // RFC 4231 test case 2
        let signature = compute_signature("Jefe", b"what do ya want for nothing?");
        assert_eq!(
            signature,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn verify_valid_signature() {
        let payload = br#"{"order_id":"txn_1","transaction_status":"paid"}"#;
        let signature = compute_signature(TEST_SECRET, payload);

        assert!(verifier().verify(payload, Some(&signature)).is_ok());
    }

    #[test]
    fn verify_accepts_uppercase_hex_and_whitespace() {
        let payload = b"{}";
        let signature = format!(" {} ", compute_signature(TEST_SECRET, payload).to_uppercase());

        assert!(verifier().verify(payload, Some(&signature)).is_ok());
    }

    #[test]
    fn verify_missing_header_fails() {
        let result = verifier().verify(b"{}", None);
        assert!(matches!(result, Err(WebhookError::MissingSignature)));

        let result = verifier().verify(b"{}", Some(""));
        assert!(matches!(result, Err(WebhookError::MissingSignature)));
    }

    #[test]
    fn verify_non_hex_header_fails() {
        let result = verifier().verify(b"{}", Some("not-a-signature"));
        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_wrong_secret_fails() {
        let payload = b"{}";
        let signature = compute_signature("another_secret", payload);

        let result = verifier().verify(payload, Some(&signature));

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_tampered_payload_fails() {
        let original = br#"{"order_id":"txn_1","transaction_status":"cancel"}"#;
        let tampered = br#"{"order_id":"txn_1","transaction_status":"paid"}"#;
        let signature = compute_signature(TEST_SECRET, original);

        let result = verifier().verify(tampered, Some(&signature));

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_truncated_signature_fails() {
        let payload = b"{}";
        let signature = compute_signature(TEST_SECRET, payload);

        let result = verifier().verify(payload, Some(&signature[..32]));

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    // ══════════════════════════════════════════════════════════════
    // Payload Parsing
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_and_parse_returns_payload() {
        let payload = br#"{"order_id":"txn_42","transaction_status":"part_paid"}"#;
        let signature = compute_signature(TEST_SECRET, payload);

        let parsed = verifier().verify_and_parse(payload, Some(&signature)).unwrap();

        assert_eq!(parsed.order_id, "txn_42");
        assert_eq!(parsed.transaction_status, TransactionStatus::PartPaid);
    }

    #[test]
    fn verify_and_parse_defaults_missing_status_to_unknown() {
        let payload = br#"{"order_id":"txn_9"}"#;
        let signature = compute_signature(TEST_SECRET, payload);

        let parsed = verifier().verify_and_parse(payload, Some(&signature)).unwrap();

        assert_eq!(parsed.order_id, "txn_9");
        assert_eq!(parsed.transaction_status, TransactionStatus::Unknown(String::new()));
    }

    #[test]
    fn verify_and_parse_invalid_json_fails() {
        let payload = b"not valid json";
        let signature = compute_signature(TEST_SECRET, payload);

        let result = verifier().verify_and_parse(payload, Some(&signature));

        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn verify_and_parse_checks_signature_before_parsing() {
        let result = verifier().verify_and_parse(b"not valid json", Some(&"a".repeat(64)));
        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    // ══════════════════════════════════════════════════════════════
    // Constant Time Comparison
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_equal_values() {
        assert!(constant_time_compare(&[1, 2, 3], &[1, 2, 3]));
    }

    #[test]
    fn constant_time_compare_different_values() {
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 4]));
    }

    #[test]
    fn constant_time_compare_different_lengths() {
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 3, 4]));
        assert!(!constant_time_compare(&[1, 2, 3, 4], &[1, 2, 3]));
    }

    #[test]
    fn constant_time_compare_rejects_empty() {
        assert!(!constant_time_compare(&[], &[]));
    }

    proptest! {
        #[test]
        fn any_flipped_byte_is_rejected(
            body in proptest::collection::vec(any::<u8>(), 1..256),
            index in any::<proptest::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let signature = compute_signature(TEST_SECRET, &body);
            let mut tampered = body.clone();
            let i = index.index(tampered.len());
            tampered[i] ^= flip;

            prop_assert!(verifier().verify(&body, Some(&signature)).is_ok());
            prop_assert!(verifier().verify(&tampered, Some(&signature)).is_err());
        }

        #[test]
        fn arbitrary_headers_never_verify(header in "[0-9a-f]{0,128}") {
            let body = br#"{"order_id":"txn","transaction_status":"paid"}"#;
            prop_assume!(header != compute_signature(TEST_SECRET, body));
            prop_assert!(verifier().verify(body, Some(&header)).is_err());
        }
    }
}
