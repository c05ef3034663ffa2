//! Schema response lifecycle states

use serde::{Deserialize, Serialize};

/// Lifecycle state of a schema response revision.
///
/// A response starts `InProgress`, moves to `Unapproved` once submitted for
/// contributor approval, then either straight to `Approved` or through
/// `PendingModeration` when the provider runs moderation.
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Serialize,
	Deserialize,
	strum::Display,
	strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResponseState {
	InProgress,
	Unapproved,
	PendingModeration,
	Approved,
}

impl ResponseState {
	/// Valid forward transitions. Rejections send a response back to
	/// `InProgress` for another editing round.
	pub fn can_transition_to(&self, next: ResponseState) -> bool {
		use ResponseState::*;
		matches!(
			(self, next),
			(InProgress, Unapproved)
				| (Unapproved, Approved)
				| (Unapproved, PendingModeration)
				| (Unapproved, InProgress)
				| (PendingModeration, Approved)
				| (PendingModeration, InProgress)
		)
	}

	/// A response still open for edits or review; at most one of these may
	/// exist per registration.
	pub fn is_pending(&self) -> bool {
		!matches!(self, ResponseState::Approved)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn submit_then_approve() {
		assert!(ResponseState::InProgress.can_transition_to(ResponseState::Unapproved));
		assert!(ResponseState::Unapproved.can_transition_to(ResponseState::Approved));
		assert!(!ResponseState::InProgress.can_transition_to(ResponseState::Approved));
		assert!(!ResponseState::Approved.can_transition_to(ResponseState::InProgress));
	}

	#[test]
	fn state_strings_are_snake_case() {
		assert_eq!(ResponseState::PendingModeration.to_string(), "pending_moderation");
		assert_eq!(
			"in_progress".parse::<ResponseState>().unwrap(),
			ResponseState::InProgress
		);
	}
}
