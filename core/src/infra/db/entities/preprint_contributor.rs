//! Preprint contributor through-table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Permission;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "preprint_contributors")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	pub preprint_id: i32,

	pub user_id: i32,

	pub read: bool,

	pub write: bool,

	pub admin: bool,

	pub visible: bool,
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
		to = "super::user::Column::Id",
		on_delete = "Cascade"
	)]
	User,
}

impl Related<super::preprint::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Preprint.def()
	}
}

impl Related<super::user::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::User.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
	pub fn permission(&self) -> Option<Permission> {
		Permission::from_flags(self.read, self.write, self.admin)
	}
}
