//! Schema response entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::ResponseState;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schema_responses")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	#[sea_orm(unique)]
	pub uuid: Uuid,

	/// The registration this response revises.
	pub node_id: i32,

	pub schema_id: i32,

	pub initiator_id: i32,

	/// `ResponseState` stored as snake_case text.
	pub state: String,

	pub revision_justification: Option<String>,

	/// Previous approved revision this one was forked from.
	pub previous_response_id: Option<i32>,

	pub submitted_at: Option<DateTimeUtc>,

	pub created_at: DateTimeUtc,

	pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(
		belongs_to = "super::node::Entity",
		from = "Column::NodeId",
		to = "super::node::Column::Id",
		on_delete = "Cascade"
	)]
	Registration,

	#[sea_orm(
		belongs_to = "super::registration_schema::Entity",
		from = "Column::SchemaId",
		to = "super::registration_schema::Column::Id"
	)]
	Schema,

	#[sea_orm(
		belongs_to = "super::user::Entity",
		from = "Column::InitiatorId",
		to = "super::user::Column::Id"
	)]
	Initiator,

	#[sea_orm(belongs_to = "Entity", from = "Column::PreviousResponseId", to = "Column::Id")]
	PreviousResponse,

	#[sea_orm(has_many = "super::schema_response_block::Entity")]
	Blocks,
}

impl Related<super::node::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Registration.def()
	}
}

impl Related<super::schema_response_block::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Blocks.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
	pub fn response_state(&self) -> Option<ResponseState> {
		self.state.parse().ok()
	}
}
