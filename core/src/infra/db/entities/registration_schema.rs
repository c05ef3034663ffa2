//! Registration schema entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "registration_schemas")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	pub name: String,

	pub schema_version: i32,

	/// JSON array of block descriptors: `[{"key": ..., "question": ...}]`.
	pub blocks: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(has_many = "super::node::Entity")]
	Registrations,
}

impl Related<super::node::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Registrations.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
	/// Block keys in schema order.
	pub fn block_keys(&self) -> Vec<String> {
		self.blocks
			.as_array()
			.map(|blocks| {
				blocks
					.iter()
					.filter_map(|b| b.get("key"))
					.filter_map(|k| k.as_str())
					.map(str::to_owned)
					.collect()
			})
			.unwrap_or_default()
	}
}
