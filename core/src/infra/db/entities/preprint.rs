//! Preprint entity
//!
//! Preprints historically hung off a supplemental project node; since the
//! divorce migration they carry their own title, description, creator and
//! contributor set, and `node_id` is merely an optional supplemental link.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "preprints")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	#[sea_orm(unique)]
	pub uuid: Uuid,

	pub title: String,

	pub description: Option<String>,

	pub creator_id: i32,

	/// Supplemental project node, if any.
	pub node_id: Option<i32>,

	pub provider_id: i32,

	pub is_public: bool,

	pub is_published: bool,

	pub date_published: Option<DateTimeUtc>,

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
		belongs_to = "super::node::Entity",
		from = "Column::NodeId",
		to = "super::node::Column::Id"
	)]
	Node,

	#[sea_orm(
		belongs_to = "super::provider::Entity",
		from = "Column::ProviderId",
		to = "super::provider::Column::Id"
	)]
	Provider,

	#[sea_orm(has_many = "super::preprint_contributor::Entity")]
	Contributors,

	#[sea_orm(has_many = "super::preprint_institution::Entity")]
	PreprintInstitutions,

	#[sea_orm(has_many = "super::preprint_log::Entity")]
	Logs,
}

impl Related<super::provider::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Provider.def()
	}
}

impl Related<super::preprint_contributor::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Contributors.def()
	}
}

impl Related<super::institution::Entity> for Entity {
	fn to() -> RelationDef {
		super::preprint_institution::Relation::Institution.def()
	}

	fn via() -> Option<RelationDef> {
		Some(super::preprint_institution::Relation::Preprint.def().rev())
	}
}

impl Related<super::preprint_log::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Logs.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
