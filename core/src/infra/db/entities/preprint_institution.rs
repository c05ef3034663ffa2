//! Preprint ↔ institution affiliation join table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "preprint_institutions")]
pub struct Model {
	#[sea_orm(primary_key, auto_increment = false)]
	pub preprint_id: i32,

	#[sea_orm(primary_key, auto_increment = false)]
	pub institution_id: i32,

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
		belongs_to = "super::institution::Entity",
		from = "Column::InstitutionId",
		to = "super::institution::Column::Id",
		on_delete = "Cascade"
	)]
	Institution,
}

impl Related<super::preprint::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Preprint.def()
	}
}

impl Related<super::institution::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Institution.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
