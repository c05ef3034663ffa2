//! Signed webhook validation
//!
//! The storage worker authenticates its callbacks by signing the raw request
//! body with a shared secret. Hooks reject anything that does not carry a
//! valid signature.

use thiserror::Error;

pub mod signature;

pub use signature::SignatureValidator;

/// Errors raised while validating a webhook request.
#[derive(Debug, Error)]
pub enum WebhookError {
	#[error("missing signature header")]
	MissingSignature,

	#[error("invalid signature format: {0}")]
	InvalidSignatureFormat(String),

	#[error("signature verification failed")]
	InvalidSignature,
}
