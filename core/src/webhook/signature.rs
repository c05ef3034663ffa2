//! HMAC-SHA256 signature validation for storage-worker webhooks.
//!
//! The worker signs each payload with a shared secret and sends the result
//! in the `X-Signature` header as `sha256=<hex-encoded-signature>`.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::WebhookError;

/// HMAC-SHA256 signature validator for storage-worker webhooks.
#[derive(Clone)]
pub struct SignatureValidator {
	secret: SecretString,
}

impl SignatureValidator {
	/// The secret is wrapped in a `SecretString` so it never ends up in
	/// logs or debug output.
	#[must_use]
	pub const fn new(secret: SecretString) -> Self {
		Self { secret }
	}

	/// Verifies the HMAC-SHA256 signature of a webhook payload.
	///
	/// # Errors
	///
	/// Returns an error if the signature header format is invalid or the
	/// signature doesn't match the computed HMAC.
	pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), WebhookError> {
		let signature_hex = signature_header
			.strip_prefix("sha256=")
			.ok_or_else(|| WebhookError::InvalidSignatureFormat("missing sha256= prefix".into()))?;

		let expected_signature = hex::decode(signature_hex)
			.map_err(|e| WebhookError::InvalidSignatureFormat(format!("invalid hex: {e}")))?;

		let computed_signature = self.compute_signature(payload);

		// Constant-time comparison to rule out timing attacks
		if computed_signature.ct_eq(&expected_signature).into() {
			Ok(())
		} else {
			tracing::warn!("webhook signature verification failed");
			Err(WebhookError::InvalidSignature)
		}
	}

	/// Computes the HMAC-SHA256 signature for a payload.
	fn compute_signature(&self, payload: &[u8]) -> Vec<u8> {
		type HmacSha256 = Hmac<Sha256>;

		let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
			.expect("HMAC accepts keys of any size");

		mac.update(payload);
		mac.finalize().into_bytes().to_vec()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create_test_validator() -> SignatureValidator {
		SignatureValidator::new(SecretString::from("test-secret-key"))
	}

	fn compute_expected_signature(secret: &str, payload: &[u8]) -> String {
		type HmacSha256 = Hmac<Sha256>;

		let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
		mac.update(payload);
		let bytes = mac.finalize().into_bytes();

		format!("sha256={}", hex::encode(bytes))
	}

	#[test]
	fn valid_signature() {
		let validator = create_test_validator();
		let payload = b"test payload";
		let signature = compute_expected_signature("test-secret-key", payload);

		assert!(validator.verify(payload, &signature).is_ok());
	}

	#[test]
	fn wrong_secret_is_rejected() {
		let validator = create_test_validator();
		let payload = b"test payload";
		let signature = compute_expected_signature("wrong-secret", payload);

		assert!(matches!(
			validator.verify(payload, &signature),
			Err(WebhookError::InvalidSignature)
		));
	}

	#[test]
	fn missing_sha256_prefix() {
		let validator = create_test_validator();

		assert!(matches!(
			validator.verify(b"test payload", "deadbeef"),
			Err(WebhookError::InvalidSignatureFormat(_))
		));
	}

	#[test]
	fn invalid_hex_is_rejected() {
		let validator = create_test_validator();

		assert!(matches!(
			validator.verify(b"test payload", "sha256=not-hex!"),
			Err(WebhookError::InvalidSignatureFormat(_))
		));
	}

	#[test]
	fn tampered_payload_is_rejected() {
		let validator = create_test_validator();
		let signature = compute_expected_signature("test-secret-key", b"original payload");

		assert!(validator.verify(b"tampered payload", &signature).is_err());
	}
}
