//! Schema response endpoints

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use osf_core::infra::db::entities::schema_response;
use osf_core::service::schema_responses;

use super::{current_user, require_user, ApiError, Ctx, Document, Resource};

/// `POST /v2/schema_responses/` payload: the registration relationship picks
/// which registration the new revision belongs to.
#[derive(Debug, Deserialize)]
pub struct CreatePayload {
	pub data: CreateData,
}

#[derive(Debug, Deserialize)]
pub struct CreateData {
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub attributes: CreateAttributes,
	pub relationships: CreateRelationships,
}

#[derive(Debug, Deserialize, Default)]
pub struct CreateAttributes {
	pub revision_justification: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRelationships {
	pub registration: RelationshipData,
}

#[derive(Debug, Deserialize)]
pub struct RelationshipData {
	pub data: RelationshipIdentifier,
}

#[derive(Debug, Deserialize)]
pub struct RelationshipIdentifier {
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub id: Option<String>,
}

pub async fn list(
	State(state): Ctx,
	headers: HeaderMap,
) -> Result<Json<Document<Vec<Resource>>>, ApiError> {
	let db = state.core.conn();
	let viewer = current_user(&state, &headers).await?;

	let responses = schema_responses::list_visible(db, viewer.as_ref()).await?;

	Ok(Json(Document {
		data: responses.iter().map(serialize_response).collect(),
	}))
}

pub async fn detail(
	State(state): Ctx,
	Path(response_id): Path<Uuid>,
	headers: HeaderMap,
) -> Result<Json<Document<Resource>>, ApiError> {
	let db = state.core.conn();
	let viewer = current_user(&state, &headers).await?;
	let response = schema_responses::get_response(db, response_id).await?;

	if !schema_responses::can_view_response(db, &response, viewer.as_ref()).await? {
		return match viewer {
			None => Err(ApiError::Unauthorized),
			Some(_) => Err(ApiError::Forbidden(
				"You do not have permission to view this schema response".into(),
			)),
		};
	}

	Ok(Json(Document {
		data: serialize_response(&response),
	}))
}

pub async fn create(
	State(state): Ctx,
	headers: HeaderMap,
	Json(payload): Json<CreatePayload>,
) -> Result<(StatusCode, Json<Document<Resource>>), ApiError> {
	let db = state.core.conn();
	let actor = require_user(&state, &headers).await?;

	if payload.data.kind != "schema-responses" {
		return Err(ApiError::Conflict(format!(
			"'{}' does not match 'schema-responses'",
			payload.data.kind
		)));
	}

	let registration_rel = &payload.data.relationships.registration.data;
	if registration_rel.kind != "registrations" {
		return Err(ApiError::BadRequest(format!(
			"'{}' does not match 'registrations'",
			registration_rel.kind
		)));
	}
	let registration_id = registration_rel
		.id
		.as_deref()
		.ok_or_else(|| ApiError::BadRequest("registration relationship is missing an id".into()))?
		.parse::<Uuid>()
		.map_err(|_| ApiError::BadRequest("invalid registration id".into()))?;

	let registration = schema_responses::get_registration(db, registration_id).await?;
	let response = schema_responses::create_response(
		db,
		&actor,
		&registration,
		payload.data.attributes.revision_justification,
	)
	.await?;

	Ok((
		StatusCode::CREATED,
		Json(Document {
			data: serialize_response(&response),
		}),
	))
}

fn serialize_response(response: &schema_response::Model) -> Resource {
	Resource {
		kind: "schema-responses".to_string(),
		id: response.uuid.to_string(),
		attributes: json!({
			"state": response.state,
			"revision_justification": response.revision_justification,
			"submitted_at": response.submitted_at,
			"created_at": response.created_at,
			"modified_at": response.modified_at,
		}),
		relationships: None,
	}
}
