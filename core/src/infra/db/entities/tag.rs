//! Tag entity
//!
//! Tags drive meeting membership: a node tagged with a meeting's endpoint
//! name (case-insensitively, non-system tags only) counts as a submission.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	pub name: String,

	/// System tags are machine-managed and never make a node a submission.
	pub system: bool,

	pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(has_many = "super::node_tag::Entity")]
	NodeTags,
}

impl Related<super::node::Entity> for Entity {
	fn to() -> RelationDef {
		super::node_tag::Relation::Node.def()
	}

	fn via() -> Option<RelationDef> {
		Some(super::node_tag::Relation::Tag.def().rev())
	}
}

impl ActiveModelBehavior for ActiveModel {}
