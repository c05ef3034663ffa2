//! osfstorage file tree
//!
//! Thin CRUD layer over `file_nodes`/`file_versions`. The bytes themselves
//! live with the external storage worker; we track the tree, the version
//! history and where the worker put each upload.

use chrono::Utc;
use sea_orm::{
	ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
	EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde_json::Value as Json;
use thiserror::Error;
use uuid::Uuid;

use crate::common::errors::CoreError;
use crate::domain::LogAction;
use crate::infra::db::entities::{
	file_node::{self, FileKind},
	file_version, node, node_log,
};

/// Look up the non-deleted node that owns a file tree.
pub async fn get_node(db: &DatabaseConnection, uuid: Uuid) -> Result<node::Model, CoreError> {
	node::Entity::find()
		.filter(node::Column::Uuid.eq(uuid))
		.filter(node::Column::IsDeleted.eq(false))
		.one(db)
		.await?
		.ok_or_else(|| CoreError::NotFound(format!("node {uuid}")))
}

/// Errors specific to file tree operations
#[derive(Error, Debug)]
pub enum StorageError {
	#[error("file node not found: {0}")]
	NotFound(String),

	#[error("{0} is not a folder")]
	NotAFolder(String),

	#[error("a child named {0} already exists")]
	AlreadyExists(String),

	#[error("cannot delete the root folder")]
	DeleteRoot,

	#[error("version {0} not found")]
	VersionNotFound(i32),

	#[error("invalid path: {0}")]
	InvalidPath(String),
}

/// The root folder of a node's file tree, creating it on first touch.
pub async fn get_or_create_root(
	db: &DatabaseConnection,
	node_id: i32,
) -> Result<file_node::Model, CoreError> {
	let existing = file_node::Entity::find()
		.filter(file_node::Column::NodeId.eq(node_id))
		.filter(file_node::Column::IsRoot.eq(true))
		.one(db)
		.await?;

	if let Some(root) = existing {
		return Ok(root);
	}

	let now = Utc::now();
	Ok(file_node::ActiveModel {
		uuid: Set(Uuid::new_v4()),
		node_id: Set(node_id),
		parent_id: Set(None),
		kind: Set(FileKind::Folder.into()),
		name: Set(String::new()),
		is_root: Set(true),
		is_deleted: Set(false),
		created_at: Set(now),
		modified_at: Set(now),
		..Default::default()
	}
	.insert(db)
	.await?)
}

/// Look up a file or folder by external id, scoped to the owning node.
pub async fn get(
	db: &DatabaseConnection,
	node_id: i32,
	uuid: Uuid,
) -> Result<file_node::Model, CoreError> {
	file_node::Entity::find()
		.filter(file_node::Column::Uuid.eq(uuid))
		.filter(file_node::Column::NodeId.eq(node_id))
		.one(db)
		.await?
		.ok_or_else(|| StorageError::NotFound(uuid.to_string()).into())
}

/// Non-deleted child with the given name, if any.
pub async fn find_child_by_name(
	db: &DatabaseConnection,
	parent_id: i32,
	name: &str,
) -> Result<Option<file_node::Model>, CoreError> {
	Ok(file_node::Entity::find()
		.filter(file_node::Column::ParentId.eq(parent_id))
		.filter(file_node::Column::Name.eq(name))
		.filter(file_node::Column::IsDeleted.eq(false))
		.one(db)
		.await?)
}

/// Non-deleted children of a folder, folders first, then by name.
pub async fn children(
	db: &DatabaseConnection,
	parent_id: i32,
) -> Result<Vec<file_node::Model>, CoreError> {
	Ok(file_node::Entity::find()
		.filter(file_node::Column::ParentId.eq(parent_id))
		.filter(file_node::Column::IsDeleted.eq(false))
		.order_by_desc(file_node::Column::Kind)
		.order_by_asc(file_node::Column::Name)
		.all(db)
		.await?)
}

async fn append_child(
	db: &DatabaseConnection,
	parent: &file_node::Model,
	name: &str,
	kind: FileKind,
) -> Result<file_node::Model, CoreError> {
	if !parent.is_folder() {
		return Err(StorageError::NotAFolder(parent.uuid.to_string()).into());
	}
	if name.is_empty() {
		return Err(StorageError::InvalidPath("empty name".into()).into());
	}
	if find_child_by_name(db, parent.id, name).await?.is_some() {
		return Err(StorageError::AlreadyExists(name.to_string()).into());
	}

	let now = Utc::now();
	Ok(file_node::ActiveModel {
		uuid: Set(Uuid::new_v4()),
		node_id: Set(parent.node_id),
		parent_id: Set(Some(parent.id)),
		kind: Set(kind.into()),
		name: Set(name.to_string()),
		is_root: Set(false),
		is_deleted: Set(false),
		created_at: Set(now),
		modified_at: Set(now),
		..Default::default()
	}
	.insert(db)
	.await?)
}

/// Create a file record under a folder. The first uploaded version writes
/// the activity log, not this call.
pub async fn append_file(
	db: &DatabaseConnection,
	parent: &file_node::Model,
	name: &str,
) -> Result<file_node::Model, CoreError> {
	append_child(db, parent, name, FileKind::File).await
}

/// Create a subfolder and record it in the node's activity log.
pub async fn append_folder(
	db: &DatabaseConnection,
	parent: &file_node::Model,
	name: &str,
	user_id: i32,
) -> Result<file_node::Model, CoreError> {
	let folder = append_child(db, parent, name, FileKind::Folder).await?;

	add_log(
		db,
		folder.node_id,
		user_id,
		LogAction::OsfStorageFolderCreated,
		serde_json::json!({ "path": folder.uuid, "name": folder.name }),
	)
	.await?;

	Ok(folder)
}

/// Record a new upload of a file.
///
/// Identifiers are 1-based and contiguous. Re-uploading bytes identical to
/// the current head (same content hash) is treated as idempotent and returns
/// the existing head version.
pub async fn create_version(
	db: &DatabaseConnection,
	file: &file_node::Model,
	creator_id: i32,
	location: Json,
	metadata: Json,
) -> Result<file_version::Model, CoreError> {
	if file.is_folder() {
		return Err(StorageError::NotAFolder(format!(
			"cannot version folder {}",
			file.uuid
		))
		.into());
	}

	let content_hash = metadata
		.get("sha256")
		.and_then(|v| v.as_str())
		.map(str::to_owned);
	let size = metadata.get("size").and_then(|v| v.as_i64()).unwrap_or(0);

	let head = latest_version(db, file.id).await?;

	if let Some(head) = &head {
		if content_hash.is_some() && head.content_hash == content_hash {
			return Ok(head.clone());
		}
	}

	let identifier = head.as_ref().map(|v| v.identifier + 1).unwrap_or(1);

	let version = file_version::ActiveModel {
		uuid: Set(Uuid::new_v4()),
		file_id: Set(file.id),
		creator_id: Set(creator_id),
		identifier: Set(identifier),
		location: Set(location),
		metadata: Set(metadata),
		size: Set(size),
		content_hash: Set(content_hash),
		download_count: Set(0),
		created_at: Set(Utc::now()),
		..Default::default()
	}
	.insert(db)
	.await?;

	let mut active: file_node::ActiveModel = file.clone().into();
	active.modified_at = Set(Utc::now());
	active.update(db).await?;

	let action = if identifier == 1 {
		LogAction::OsfStorageFileAdded
	} else {
		LogAction::OsfStorageFileUpdated
	};
	add_log(
		db,
		file.node_id,
		creator_id,
		action,
		serde_json::json!({ "path": file.uuid, "name": file.name, "version": identifier }),
	)
	.await?;

	Ok(version)
}

/// Latest version of a file, if any.
pub async fn latest_version(
	db: &impl ConnectionTrait,
	file_id: i32,
) -> Result<Option<file_version::Model>, CoreError> {
	Ok(file_version::Entity::find()
		.filter(file_version::Column::FileId.eq(file_id))
		.order_by_desc(file_version::Column::Identifier)
		.one(db)
		.await?)
}

/// Version by 1-based identifier.
pub async fn get_version(
	db: &DatabaseConnection,
	file_id: i32,
	identifier: i32,
) -> Result<file_version::Model, CoreError> {
	file_version::Entity::find()
		.filter(file_version::Column::FileId.eq(file_id))
		.filter(file_version::Column::Identifier.eq(identifier))
		.one(db)
		.await?
		.ok_or_else(|| StorageError::VersionNotFound(identifier).into())
}

/// All versions of a file, newest first.
pub async fn versions(
	db: &DatabaseConnection,
	file_id: i32,
) -> Result<Vec<file_version::Model>, CoreError> {
	Ok(file_version::Entity::find()
		.filter(file_version::Column::FileId.eq(file_id))
		.order_by_desc(file_version::Column::Identifier)
		.all(db)
		.await?)
}

/// Merge worker-reported metadata into a version record.
pub async fn update_version_metadata(
	db: &DatabaseConnection,
	version_uuid: Uuid,
	metadata: &Json,
) -> Result<file_version::Model, CoreError> {
	let version = file_version::Entity::find()
		.filter(file_version::Column::Uuid.eq(version_uuid))
		.one(db)
		.await?
		.ok_or_else(|| CoreError::NotFound(format!("file version {version_uuid}")))?;

	let mut merged = version.metadata.clone();
	if let (Some(base), Some(update)) = (merged.as_object_mut(), metadata.as_object()) {
		for (key, value) in update {
			base.insert(key.clone(), value.clone());
		}
	}

	let mut active: file_version::ActiveModel = version.into();
	if let Some(hash) = metadata.get("sha256").and_then(|v| v.as_str()) {
		active.content_hash = Set(Some(hash.to_string()));
	}
	if let Some(size) = metadata.get("size").and_then(|v| v.as_i64()) {
		active.size = Set(size);
	}
	active.metadata = Set(merged);

	Ok(active.update(db).await?)
}

/// Soft-delete a file or folder (recursively) and log the removal.
/// The root folder is not deletable.
pub async fn delete(
	db: &DatabaseConnection,
	file: &file_node::Model,
	user_id: i32,
) -> Result<(), CoreError> {
	if file.is_root {
		return Err(StorageError::DeleteRoot.into());
	}
	if file.is_deleted {
		return Err(StorageError::NotFound(file.uuid.to_string()).into());
	}

	// Walk the subtree; folders soft-delete their contents.
	let mut frontier = vec![file.id];
	while let Some(current) = frontier.pop() {
		let child_ids: Vec<i32> = file_node::Entity::find()
			.filter(file_node::Column::ParentId.eq(current))
			.filter(file_node::Column::IsDeleted.eq(false))
			.all(db)
			.await?
			.into_iter()
			.map(|c| c.id)
			.collect();
		frontier.extend(child_ids);

		file_node::Entity::update_many()
			.col_expr(file_node::Column::IsDeleted, true.into())
			.col_expr(file_node::Column::ModifiedAt, Utc::now().into())
			.filter(file_node::Column::Id.eq(current))
			.exec(db)
			.await?;
	}

	add_log(
		db,
		file.node_id,
		user_id,
		LogAction::OsfStorageFileRemoved,
		serde_json::json!({ "path": file.uuid, "name": file.name }),
	)
	.await?;

	Ok(())
}

/// Bump a version's download counter.
pub async fn record_download(
	db: &DatabaseConnection,
	version: &file_version::Model,
) -> Result<(), CoreError> {
	let mut active: file_version::ActiveModel = version.clone().into();
	active.download_count = Set(version.download_count + 1);
	active.update(db).await?;
	Ok(())
}

/// Total downloads across all versions of a file.
pub async fn file_download_count(
	db: &DatabaseConnection,
	file_id: i32,
) -> Result<i64, CoreError> {
	let total: Option<i64> = file_version::Entity::find()
		.select_only()
		.column_as(file_version::Column::DownloadCount.sum(), "total")
		.filter(file_version::Column::FileId.eq(file_id))
		.into_tuple()
		.one(db)
		.await?
		.flatten();

	Ok(total.unwrap_or(0))
}

/// Total downloads across every file in a node's tree.
pub async fn node_download_count(
	db: &DatabaseConnection,
	node_id: i32,
) -> Result<i64, CoreError> {
	let total: Option<i64> = file_version::Entity::find()
		.select_only()
		.column_as(file_version::Column::DownloadCount.sum(), "total")
		.join(JoinType::InnerJoin, file_version::Relation::File.def())
		.filter(file_node::Column::NodeId.eq(node_id))
		.into_tuple()
		.one(db)
		.await?
		.flatten();

	Ok(total.unwrap_or(0))
}

/// A file plus the version facts serializers need.
#[derive(Debug, Clone)]
pub struct FileInfo {
	pub file: file_node::Model,
	pub latest: Option<file_version::Model>,
	pub version_count: i64,
	pub downloads: i64,
}

pub async fn file_info(
	db: &DatabaseConnection,
	file: file_node::Model,
) -> Result<FileInfo, CoreError> {
	let latest = latest_version(db, file.id).await?;
	let version_count = file_version::Entity::find()
		.filter(file_version::Column::FileId.eq(file.id))
		.count(db)
		.await? as i64;
	let downloads = file_download_count(db, file.id).await?;

	Ok(FileInfo {
		file,
		latest,
		version_count,
		downloads,
	})
}

/// Append a row to the owning node's activity log.
pub async fn add_log(
	db: &DatabaseConnection,
	node_id: i32,
	user_id: i32,
	action: LogAction,
	params: Json,
) -> Result<(), CoreError> {
	node_log::ActiveModel {
		node_id: Set(node_id),
		user_id: Set(user_id),
		action: Set(action.to_string()),
		params: Set(params),
		created_at: Set(Utc::now()),
		..Default::default()
	}
	.insert(db)
	.await?;

	Ok(())
}
