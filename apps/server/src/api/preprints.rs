//! Preprint relationship endpoints
//!
//! `GET/PUT /v2/preprints/{id}/relationships/institutions`. The PUT carries
//! the full replacement set, JSON-API relationship style; POST/PATCH/DELETE
//! fall through to axum's method-not-allowed handling.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use osf_core::service::preprints;

use super::{current_user, require_user, ApiError, Ctx, Document, ResourceIdentifier};

#[derive(Debug, Deserialize)]
pub struct RelationshipPayload {
	pub data: Vec<ResourceIdentifier>,
}

pub async fn institutions_list(
	State(state): Ctx,
	Path(preprint_id): Path<Uuid>,
	headers: HeaderMap,
) -> Result<Json<Document<Vec<ResourceIdentifier>>>, ApiError> {
	let db = state.core.conn();
	let preprint = preprints::get_preprint(db, preprint_id).await?;
	let viewer = current_user(&state, &headers).await?;

	preprints::ensure_can_view(db, &preprint, viewer.as_ref()).await?;

	let institutions = preprints::affiliated_institutions(db, &preprint).await?;

	Ok(Json(Document {
		data: institutions
			.into_iter()
			.map(|inst| ResourceIdentifier {
				kind: "institutions".to_string(),
				id: inst.uuid.to_string(),
			})
			.collect(),
	}))
}

pub async fn institutions_update(
	State(state): Ctx,
	Path(preprint_id): Path<Uuid>,
	headers: HeaderMap,
	Json(payload): Json<RelationshipPayload>,
) -> Result<Json<Document<Vec<ResourceIdentifier>>>, ApiError> {
	let db = state.core.conn();
	let preprint = preprints::get_preprint(db, preprint_id).await?;
	let actor = require_user(&state, &headers).await?;

	let mut wanted = Vec::with_capacity(payload.data.len());
	for identifier in &payload.data {
		if identifier.kind != "institutions" {
			return Err(ApiError::Conflict(format!(
				"'{}' does not match 'institutions'",
				identifier.kind
			)));
		}
		let uuid = identifier
			.id
			.parse::<Uuid>()
			.map_err(|_| ApiError::BadRequest(format!("invalid institution id '{}'", identifier.id)))?;
		wanted.push(uuid);
	}

	let institutions =
		preprints::update_affiliations(db, &preprint, &actor, &wanted).await?;

	Ok(Json(Document {
		data: institutions
			.into_iter()
			.map(|inst| ResourceIdentifier {
				kind: "institutions".to_string(),
				id: inst.uuid.to_string(),
			})
			.collect(),
	}))
}
