//! Preprint provider entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "providers")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	#[sea_orm(unique)]
	pub uuid: Uuid,

	pub name: String,

	pub description: Option<String>,

	/// Whether schema responses on this provider's registrations pass
	/// through moderation before approval.
	pub is_moderated: bool,

	pub created_at: DateTimeUtc,

	pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(has_many = "super::preprint::Entity")]
	Preprints,
}

impl Related<super::preprint::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Preprints.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
