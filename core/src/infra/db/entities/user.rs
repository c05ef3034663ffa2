//! User entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	#[sea_orm(unique)]
	pub uuid: Uuid,

	pub full_name: String,

	#[sea_orm(unique)]
	pub username: String,

	/// Bearer credential presented in the `Authorization` header.
	/// None for users without API access.
	#[sea_orm(unique)]
	pub api_token: Option<String>,

	pub is_active: bool,

	pub created_at: DateTimeUtc,

	pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(has_many = "super::user_institution::Entity")]
	UserInstitutions,

	#[sea_orm(has_many = "super::contributor::Entity")]
	Contributors,

	#[sea_orm(has_many = "super::preprint_contributor::Entity")]
	PreprintContributors,
}

impl Related<super::user_institution::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::UserInstitutions.def()
	}
}

impl Related<super::institution::Entity> for Entity {
	fn to() -> RelationDef {
		super::user_institution::Relation::Institution.def()
	}

	fn via() -> Option<RelationDef> {
		Some(super::user_institution::Relation::User.def().rev())
	}
}

impl ActiveModelBehavior for ActiveModel {}
