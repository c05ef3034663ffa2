//! osfstorage webhook hooks
//!
//! The storage worker calls back into these endpoints after moving bytes
//! around. Every request is authenticated by an HMAC signature over the raw
//! body; the handlers then bridge the payload onto the file-tree service.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use osf_core::infra::db::entities::{file_node, file_version, node, user};
use osf_core::service::storage;

use super::{ApiError, Ctx};

const SIGNATURE_HEADER: &str = "x-signature";

#[derive(Debug, Deserialize)]
struct HookAuth {
	id: Uuid,
}

#[derive(Debug, Deserialize)]
struct UploadPayload {
	auth: HookAuth,
	settings: Value,
	metadata: Value,
	hashes: Value,
	worker: Value,
	path: String,
}

#[derive(Debug, Deserialize)]
struct DownloadPayload {
	path: String,
	#[serde(default)]
	version: Option<Value>,
	#[serde(default)]
	mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeletePayload {
	auth: HookAuth,
	path: String,
}

#[derive(Debug, Deserialize)]
struct PathPayload {
	path: String,
}

#[derive(Debug, Deserialize)]
struct CreateFolderPayload {
	auth: HookAuth,
	path: String,
}

#[derive(Debug, Deserialize)]
struct UpdateMetadataPayload {
	version: Uuid,
	metadata: Value,
}

/// Signature check plus JSON parse, in that order: an unsigned body is 401
/// before we ever look inside it.
fn parse_signed<T: DeserializeOwned>(
	state: &super::AppState,
	headers: &HeaderMap,
	body: &Bytes,
) -> Result<T, ApiError> {
	let signature = headers
		.get(SIGNATURE_HEADER)
		.and_then(|v| v.to_str().ok())
		.ok_or(ApiError::Unauthorized)?;

	state
		.signatures
		.verify(body, signature)
		.map_err(|_| ApiError::Unauthorized)?;

	serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("invalid payload: {e}")))
}

async fn hook_user(db: &DatabaseConnection, auth: &HookAuth) -> Result<user::Model, ApiError> {
	user::Entity::find()
		.filter(user::Column::Uuid.eq(auth.id))
		.one(db)
		.await
		.map_err(|_| ApiError::Internal)?
		.ok_or_else(|| ApiError::BadRequest("unknown user".into()))
}

/// Registrations are immutable snapshots; mutating hooks refuse them.
fn reject_registration(node: &node::Model) -> Result<(), ApiError> {
	if node.is_registration() {
		return Err(ApiError::Forbidden("Registrations are read-only".into()));
	}
	Ok(())
}

/// Path of the form `{parent_uuid}/{name}` or bare `{name}`.
fn split_upload_path(path: &str) -> Result<(Option<Uuid>, &str), ApiError> {
	let trimmed = path.trim_matches('/');
	if trimmed.is_empty() {
		return Err(ApiError::BadRequest("Path is required".into()));
	}

	let parts: Vec<&str> = trimmed.split('/').collect();
	match parts.as_slice() {
		[name] => Ok((None, name)),
		[parent, name] => {
			let parent = parent
				.parse::<Uuid>()
				.map_err(|_| ApiError::BadRequest("invalid parent id".into()))?;
			Ok((Some(parent), name))
		}
		_ => Err(ApiError::BadRequest("Path exceeds the addon depth".into())),
	}
}

pub async fn upload(
	State(state): Ctx,
	Path(node_id): Path<Uuid>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
	let payload: UploadPayload = parse_signed(&state, &headers, &body)?;
	let db = state.core.conn();

	let node = storage::get_node(db, node_id).await?;
	reject_registration(&node)?;
	let user = hook_user(db, &payload.auth).await?;

	let (parent_id, name) = split_upload_path(&payload.path)?;
	let parent = match parent_id {
		Some(uuid) => {
			let parent = storage::get(db, node.id, uuid).await?;
			if !parent.is_folder() {
				return Err(ApiError::BadRequest("parent is not a folder".into()));
			}
			parent
		}
		None => storage::get_or_create_root(db, node.id).await?,
	};

	let (created, record) = match storage::find_child_by_name(db, parent.id, name).await? {
		Some(record) => (false, record),
		None => (true, storage::append_file(db, &parent, name).await?),
	};

	// The worker reports where it stored the object; fold its identity and
	// the object name into the version location.
	let mut location = payload.settings.clone();
	if let Some(location_obj) = location.as_object_mut() {
		if let Some(object) = payload.metadata.get("name") {
			location_obj.insert("object".to_string(), object.clone());
		}
		if let Some(service) = payload.metadata.get("provider") {
			location_obj.insert("service".to_string(), service.clone());
		}
		if let Some(worker) = payload.worker.as_object() {
			for (key, value) in worker {
				location_obj.insert(key.clone(), value.clone());
			}
		}
	}

	let mut metadata = payload.metadata.clone();
	if let (Some(metadata_obj), Some(hashes)) =
		(metadata.as_object_mut(), payload.hashes.as_object())
	{
		for (key, value) in hashes {
			metadata_obj.insert(key.clone(), value.clone());
		}
	}

	let version = storage::create_version(db, &record, user.id, location, metadata).await?;
	let downloads = storage::file_download_count(db, record.id).await?;

	let code = if created {
		StatusCode::CREATED
	} else {
		StatusCode::OK
	};

	Ok((
		code,
		Json(json!({
			"status": "success",
			"path": record.uuid,
			"version": version.uuid,
			"downloads": downloads,
		})),
	))
}

pub async fn download(
	State(state): Ctx,
	Path(node_id): Path<Uuid>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<Json<Value>, ApiError> {
	let payload: DownloadPayload = parse_signed(&state, &headers, &body)?;
	let db = state.core.conn();

	let node = storage::get_node(db, node_id).await?;

	let requested = parse_version_number(payload.version.as_ref())?;

	let uuid = parse_file_id(&payload.path)?;
	let record = storage::get(db, node.id, uuid).await?;
	if record.is_deleted {
		return Err(ApiError::Gone);
	}

	let versions = storage::versions(db, record.id).await?;
	let count = versions.len() as i32;
	// 0 or absent means the head; negative counts back from the head, the
	// way the worker addresses historical revisions.
	let identifier = if requested > 0 {
		requested
	} else {
		count + requested
	};
	let version = versions
		.into_iter()
		.find(|v| v.identifier == identifier)
		.ok_or(ApiError::NotFound)?;

	if payload.mode.as_deref() != Some("render") {
		storage::record_download(db, &version).await?;
	}

	Ok(Json(json!({
		"data": {
			"path": version.location_hash(),
		},
		"settings": {
			"resource": version.location.get("bucket"),
		},
	})))
}

pub async fn delete(
	State(state): Ctx,
	Path(node_id): Path<Uuid>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<Json<Value>, ApiError> {
	let payload: DeletePayload = parse_signed(&state, &headers, &body)?;
	let db = state.core.conn();

	let node = storage::get_node(db, node_id).await?;
	reject_registration(&node)?;
	let user = hook_user(db, &payload.auth).await?;

	let uuid = parse_file_id(&payload.path)?;
	let record = storage::get(db, node.id, uuid).await?;

	storage::delete(db, &record, user.id).await?;

	Ok(Json(json!({ "status": "success" })))
}

pub async fn metadata(
	State(state): Ctx,
	Path(node_id): Path<Uuid>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<Json<Value>, ApiError> {
	let payload: PathPayload = parse_signed(&state, &headers, &body)?;
	let db = state.core.conn();

	let node = storage::get_node(db, node_id).await?;

	let record = if payload.path == "/" {
		storage::get_or_create_root(db, node.id).await?
	} else {
		storage::get(db, node.id, parse_file_id(&payload.path)?).await?
	};

	if record.is_deleted {
		return Err(ApiError::Gone);
	}

	if record.is_folder() {
		let mut listing = Vec::new();
		for child in storage::children(db, record.id).await? {
			listing.push(serialize_file(db, child).await?);
		}
		Ok(Json(Value::Array(listing)))
	} else {
		Ok(Json(serialize_file(db, record).await?))
	}
}

pub async fn revisions(
	State(state): Ctx,
	Path(node_id): Path<Uuid>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<Json<Value>, ApiError> {
	let payload: PathPayload = parse_signed(&state, &headers, &body)?;
	let db = state.core.conn();

	let node = storage::get_node(db, node_id).await?;
	let record = storage::get(db, node.id, parse_file_id(&payload.path)?).await?;

	let mut revisions = Vec::new();
	for version in storage::versions(db, record.id).await? {
		revisions.push(serialize_revision(db, &version).await?);
	}

	Ok(Json(json!({ "revisions": revisions })))
}

pub async fn create_folder(
	State(state): Ctx,
	Path(node_id): Path<Uuid>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
	let payload: CreateFolderPayload = parse_signed(&state, &headers, &body)?;
	let db = state.core.conn();

	let node = storage::get_node(db, node_id).await?;
	reject_registration(&node)?;
	let user = hook_user(db, &payload.auth).await?;

	let (parent_id, name) = split_upload_path(&payload.path)?;
	let parent = match parent_id {
		Some(uuid) => storage::get(db, node.id, uuid).await?,
		None => storage::get_or_create_root(db, node.id).await?,
	};

	let folder = storage::append_folder(db, &parent, name, user.id).await?;

	Ok((StatusCode::CREATED, Json(serialize_file(db, folder).await?)))
}

pub async fn update_metadata(
	State(state): Ctx,
	Path(node_id): Path<Uuid>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<Json<Value>, ApiError> {
	let payload: UpdateMetadataPayload = parse_signed(&state, &headers, &body)?;
	let db = state.core.conn();

	// Scope check only; metadata updates address versions directly.
	storage::get_node(db, node_id).await?;

	storage::update_version_metadata(db, payload.version, &payload.metadata).await?;

	Ok(Json(json!({ "status": "success" })))
}

fn parse_file_id(path: &str) -> Result<Uuid, ApiError> {
	let trimmed = path.trim_matches('/');
	if trimmed.is_empty() {
		return Err(ApiError::BadRequest("Path is required".into()));
	}
	trimmed
		.parse::<Uuid>()
		.map_err(|_| ApiError::BadRequest(format!("invalid path '{trimmed}'")))
}

fn parse_version_number(version: Option<&Value>) -> Result<i32, ApiError> {
	let Some(value) = version else {
		return Ok(0);
	};

	let parsed = match value {
		Value::Number(n) => n.as_i64(),
		Value::String(s) => s.parse::<i64>().ok(),
		Value::Null => Some(0),
		_ => None,
	};

	parsed
		.map(|n| n as i32)
		.ok_or_else(|| ApiError::BadRequest("Version must be an int or not specified".into()))
}

async fn serialize_file(db: &DatabaseConnection, file: file_node::Model) -> Result<Value, ApiError> {
	let info = storage::file_info(db, file).await?;

	let kind = if info.file.is_folder() { "folder" } else { "file" };

	Ok(json!({
		"id": info.file.uuid,
		"path": info.file.uuid,
		"name": info.file.name,
		"kind": kind,
		"size": info.latest.as_ref().map(|v| v.size),
		"modified": info.file.modified_at,
		"version": info.version_count,
		"downloads": info.downloads,
	}))
}

async fn serialize_revision(
	db: &DatabaseConnection,
	version: &file_version::Model,
) -> Result<Value, ApiError> {
	let creator = user::Entity::find_by_id(version.creator_id)
		.one(db)
		.await
		.map_err(|_| ApiError::Internal)?;

	Ok(json!({
		"index": version.identifier,
		"id": version.uuid,
		"date": version.created_at,
		"size": version.size,
		"downloads": version.download_count,
		"sha256": version.content_hash,
		"user": creator.map(|u| json!({ "id": u.uuid, "name": u.full_name })),
	}))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn upload_path_forms() {
		let (parent, name) = split_upload_path("report.pdf").unwrap();
		assert!(parent.is_none());
		assert_eq!(name, "report.pdf");

		let folder = Uuid::new_v4();
		let folder_path = format!("/{folder}/report.pdf");
		let (parent, name) = split_upload_path(&folder_path).unwrap();
		assert_eq!(parent, Some(folder));
		assert_eq!(name, "report.pdf");

		assert!(split_upload_path("/").is_err());
		assert!(split_upload_path("a/b/c").is_err());
	}

	#[test]
	fn version_number_parsing() {
		assert_eq!(parse_version_number(None).unwrap(), 0);
		assert_eq!(parse_version_number(Some(&json!(3))).unwrap(), 3);
		assert_eq!(parse_version_number(Some(&json!("2"))).unwrap(), 2);
		assert_eq!(parse_version_number(Some(&json!(-1))).unwrap(), -1);
		assert!(parse_version_number(Some(&json!("latest"))).is_err());
	}
}
