//! Contributor permission tiers

use serde::{Deserialize, Serialize};

/// Permission level a contributor holds on a project, registration or
/// preprint. Tiers are cumulative: admin implies write implies read.
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Serialize,
	Deserialize,
	strum::Display,
	strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase")]
pub enum Permission {
	Read,
	Write,
	Admin,
}

impl Permission {
	/// Whether this tier grants everything `required` does.
	pub fn satisfies(&self, required: Permission) -> bool {
		*self >= required
	}

	/// Highest tier encoded by a contributor row's flag columns, or `None`
	/// when no flag is set.
	pub fn from_flags(read: bool, write: bool, admin: bool) -> Option<Permission> {
		if admin {
			Some(Permission::Admin)
		} else if write {
			Some(Permission::Write)
		} else if read {
			Some(Permission::Read)
		} else {
			None
		}
	}

	/// Flag columns for a contributor row holding this tier.
	pub fn as_flags(&self) -> (bool, bool, bool) {
		match self {
			Permission::Read => (true, false, false),
			Permission::Write => (true, true, false),
			Permission::Admin => (true, true, true),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tiers_are_cumulative() {
		assert!(Permission::Admin.satisfies(Permission::Read));
		assert!(Permission::Admin.satisfies(Permission::Write));
		assert!(Permission::Write.satisfies(Permission::Read));
		assert!(!Permission::Read.satisfies(Permission::Write));
		assert!(!Permission::Write.satisfies(Permission::Admin));
	}

	#[test]
	fn flags_round_trip() {
		for perm in [Permission::Read, Permission::Write, Permission::Admin] {
			let (read, write, admin) = perm.as_flags();
			assert_eq!(Permission::from_flags(read, write, admin), Some(perm));
		}
		assert_eq!(Permission::from_flags(false, false, false), None);
	}

	#[test]
	fn parses_lowercase_names() {
		assert_eq!("admin".parse::<Permission>().unwrap(), Permission::Admin);
		assert_eq!(Permission::Write.to_string(), "write");
	}
}
