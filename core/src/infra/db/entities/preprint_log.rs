//! Preprint activity log entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "preprint_logs")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	pub preprint_id: i32,

	pub user_id: i32,

	/// One of the `LogAction` names, stored as snake_case text.
	pub action: String,

	pub params: Json,

	pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(
		belongs_to = "super::preprint::Entity",
		from = "Column::PreprintId",
		to = "super::preprint::Column::Id",
		on_delete = "Cascade"
	)]
	Preprint,

	#[sea_orm(
		belongs_to = "super::user::Entity",
		from = "Column::UserId",
		to = "super::user::Column::Id"
	)]
	User,
}

impl Related<super::preprint::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Preprint.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
