//! User ↔ institution affiliation join table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_institutions")]
pub struct Model {
	#[sea_orm(primary_key, auto_increment = false)]
	pub user_id: i32,

	#[sea_orm(primary_key, auto_increment = false)]
	pub institution_id: i32,

	pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(
		belongs_to = "super::user::Entity",
		from = "Column::UserId",
		to = "super::user::Column::Id",
		on_delete = "Cascade"
	)]
	User,

	#[sea_orm(
		belongs_to = "super::institution::Entity",
		from = "Column::InstitutionId",
		to = "super::institution::Column::Id",
		on_delete = "Cascade"
	)]
	Institution,
}

impl Related<super::user::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::User.def()
	}
}

impl Related<super::institution::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Institution.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
