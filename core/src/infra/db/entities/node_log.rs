//! Node activity log entity
//!
//! Storage hooks append rows here (file added/updated/removed, folder
//! created) so project feeds can show what the storage worker did.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "node_logs")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	pub node_id: i32,

	pub user_id: i32,

	pub action: String,

	pub params: Json,

	pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(
		belongs_to = "super::node::Entity",
		from = "Column::NodeId",
		to = "super::node::Column::Id",
		on_delete = "Cascade"
	)]
	Node,

	#[sea_orm(
		belongs_to = "super::user::Entity",
		from = "Column::UserId",
		to = "super::user::Column::Id"
	)]
	User,
}

impl Related<super::node::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Node.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
