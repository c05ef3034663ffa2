//! Node entity
//!
//! A node is a project or a registration; registrations additionally carry
//! the schema they were registered against and are immutable in storage.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "nodes")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	#[sea_orm(unique)]
	pub uuid: Uuid,

	pub title: String,

	pub description: Option<String>,

	pub kind: i32, // Node type: 0=Project, 1=Registration

	pub creator_id: i32,

	pub is_public: bool,

	pub is_deleted: bool,

	pub registered_schema_id: Option<i32>, // Registrations only

	pub created_at: DateTimeUtc,

	pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(
		belongs_to = "super::user::Entity",
		from = "Column::CreatorId",
		to = "super::user::Column::Id"
	)]
	Creator,

	#[sea_orm(
		belongs_to = "super::registration_schema::Entity",
		from = "Column::RegisteredSchemaId",
		to = "super::registration_schema::Column::Id"
	)]
	RegisteredSchema,

	#[sea_orm(has_many = "super::contributor::Entity")]
	Contributors,

	#[sea_orm(has_many = "super::node_tag::Entity")]
	NodeTags,

	#[sea_orm(has_many = "super::schema_response::Entity")]
	SchemaResponses,

	#[sea_orm(has_many = "super::file_node::Entity")]
	FileNodes,

	#[sea_orm(has_many = "super::node_log::Entity")]
	Logs,
}

impl Related<super::registration_schema::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::RegisteredSchema.def()
	}
}

impl Related<super::contributor::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Contributors.def()
	}
}

impl Related<super::tag::Entity> for Entity {
	fn to() -> RelationDef {
		super::node_tag::Relation::Tag.def()
	}

	fn via() -> Option<RelationDef> {
		Some(super::node_tag::Relation::Node.def().rev())
	}
}

impl Related<super::schema_response::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::SchemaResponses.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
	Project = 0,
	Registration = 1,
}

impl From<i32> for NodeKind {
	fn from(value: i32) -> Self {
		match value {
			1 => NodeKind::Registration,
			_ => NodeKind::Project,
		}
	}
}

impl From<NodeKind> for i32 {
	fn from(kind: NodeKind) -> Self {
		kind as i32
	}
}

impl Model {
	pub fn node_kind(&self) -> NodeKind {
		NodeKind::from(self.kind)
	}

	pub fn is_registration(&self) -> bool {
		self.node_kind() == NodeKind::Registration
	}
}
