//! Storage file tree entity
//!
//! Files and folders managed by the osfstorage addon. Each project node owns
//! one root folder; every other row hangs off it via `parent_id`. Deletion
//! is a soft flag so version history survives.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "file_nodes")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	#[sea_orm(unique)]
	pub uuid: Uuid,

	/// Owning project node.
	pub node_id: i32,

	pub parent_id: Option<i32>, // None for the root folder

	pub kind: i32, // 0=File, 1=Folder

	pub name: String,

	pub is_root: bool,

	pub is_deleted: bool,

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
	Node,

	#[sea_orm(belongs_to = "Entity", from = "Column::ParentId", to = "Column::Id")]
	Parent,

	#[sea_orm(has_many = "super::file_version::Entity")]
	Versions,
}

impl Related<super::node::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Node.def()
	}
}

impl Related<super::file_version::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Versions.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
	File = 0,
	Folder = 1,
}

impl From<i32> for FileKind {
	fn from(value: i32) -> Self {
		match value {
			1 => FileKind::Folder,
			_ => FileKind::File,
		}
	}
}

impl From<FileKind> for i32 {
	fn from(kind: FileKind) -> Self {
		kind as i32
	}
}

impl Model {
	pub fn file_kind(&self) -> FileKind {
		FileKind::from(self.kind)
	}

	pub fn is_folder(&self) -> bool {
		self.file_kind() == FileKind::Folder
	}
}
