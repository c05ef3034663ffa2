//! Schema response block entity
//!
//! One row per schema block key, holding the structured answer for that key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schema_response_blocks")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	pub schema_response_id: i32,

	pub schema_key: String,

	pub response: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(
		belongs_to = "super::schema_response::Entity",
		from = "Column::SchemaResponseId",
		to = "super::schema_response::Column::Id",
		on_delete = "Cascade"
	)]
	SchemaResponse,
}

impl Related<super::schema_response::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::SchemaResponse.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
