//! Storage file version entity
//!
//! Immutable record of one upload: where the storage worker put the bytes
//! (`location`) and what it reported about them (`metadata`, hashes, size).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "file_versions")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	#[sea_orm(unique)]
	pub uuid: Uuid,

	pub file_id: i32,

	pub creator_id: i32,

	/// 1-based, contiguous per file.
	pub identifier: i32,

	/// Storage worker location: service, bucket/resource, object key.
	pub location: Json,

	/// Worker-reported metadata merged with content hashes.
	pub metadata: Json,

	pub size: i64,

	pub content_hash: Option<String>,

	pub download_count: i64,

	pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(
		belongs_to = "super::file_node::Entity",
		from = "Column::FileId",
		to = "super::file_node::Column::Id",
		on_delete = "Cascade"
	)]
	File,

	#[sea_orm(
		belongs_to = "super::user::Entity",
		from = "Column::CreatorId",
		to = "super::user::Column::Id"
	)]
	Creator,
}

impl Related<super::file_node::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::File.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
	/// Object key inside the worker's storage backend, used for download
	/// redirects.
	pub fn location_hash(&self) -> Option<String> {
		self.location
			.get("object")
			.and_then(|v| v.as_str())
			.map(str::to_owned)
	}
}
