//! Institution entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "institutions")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	#[sea_orm(unique)]
	pub uuid: Uuid,

	pub name: String,

	pub created_at: DateTimeUtc,

	pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(has_many = "super::user_institution::Entity")]
	UserInstitutions,

	#[sea_orm(has_many = "super::preprint_institution::Entity")]
	PreprintInstitutions,
}

impl Related<super::user::Entity> for Entity {
	fn to() -> RelationDef {
		super::user_institution::Relation::User.def()
	}

	fn via() -> Option<RelationDef> {
		Some(super::user_institution::Relation::Institution.def().rev())
	}
}

impl Related<super::preprint::Entity> for Entity {
	fn to() -> RelationDef {
		super::preprint_institution::Relation::Preprint.def()
	}

	fn via() -> Option<RelationDef> {
		Some(super::preprint_institution::Relation::Institution.def().rev())
	}
}

impl ActiveModelBehavior for ActiveModel {}
