//! Conference (meeting) entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "conferences")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	/// URL slug and submission-tag name for the meeting.
	#[sea_orm(unique)]
	pub endpoint: String,

	pub name: String,

	pub location: Option<String>,

	/// Conferences created for mailing-list use only are not meetings and
	/// stay out of the public listing.
	pub is_meeting: bool,

	pub active: bool,

	/// Labels for the meeting's submission form, e.g. {"submission1": "poster"}.
	pub field_names: Json,

	/// Cached count, refreshed when submissions are queried.
	pub num_submissions: i32,

	pub created_at: DateTimeUtc,

	pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
