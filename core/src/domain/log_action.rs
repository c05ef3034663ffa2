//! Activity log action vocabulary

use serde::{Deserialize, Serialize};

/// Actions recorded in preprint and node activity logs.
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
pub enum LogAction {
	AffiliatedInstitutionAdded,
	AffiliatedInstitutionRemoved,
	OsfStorageFileAdded,
	OsfStorageFileUpdated,
	OsfStorageFileRemoved,
	OsfStorageFolderCreated,
}
