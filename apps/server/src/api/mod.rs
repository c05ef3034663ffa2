//! JSON-API surface
//!
//! Shared plumbing for the REST handlers: application state, bearer-token
//! resolution, the JSON-API envelope types and the error-to-status mapping.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use osf_core::common::errors::CoreError;
use osf_core::infra::db::entities::user;
use osf_core::service::storage::StorageError;
use osf_core::webhook::SignatureValidator;
use osf_core::Core;

pub mod hooks;
pub mod meetings;
pub mod preprints;
pub mod schema_responses;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
	pub core: Core,
	pub signatures: SignatureValidator,
}

impl AppState {
	pub fn new(core: Core) -> Self {
		let signatures =
			SignatureValidator::new(SecretString::from(core.config.webhook_secret.clone()));
		Self { core, signatures }
	}
}

/// All API routes.
pub fn router() -> Router<AppState> {
	Router::new()
		// Meetings live under the private `_` namespace
		.route("/_/meetings", get(meetings::list))
		.route("/_/meetings/:endpoint", get(meetings::detail))
		.route("/_/meetings/:endpoint/submissions", get(meetings::submissions))
		// v2 JSON-API
		.route(
			"/v2/preprints/:preprint_id/relationships/institutions",
			get(preprints::institutions_list).put(preprints::institutions_update),
		)
		.route(
			"/v2/schema_responses",
			get(schema_responses::list).post(schema_responses::create),
		)
		.route("/v2/schema_responses/:response_id", get(schema_responses::detail))
		// Storage worker hooks
		.route("/hooks/osfstorage/:node_id/upload", post(hooks::upload))
		.route("/hooks/osfstorage/:node_id/download", post(hooks::download))
		.route("/hooks/osfstorage/:node_id/delete", post(hooks::delete))
		.route("/hooks/osfstorage/:node_id/metadata", post(hooks::metadata))
		.route("/hooks/osfstorage/:node_id/revisions", post(hooks::revisions))
		.route("/hooks/osfstorage/:node_id/create_folder", post(hooks::create_folder))
		.route(
			"/hooks/osfstorage/:node_id/update_metadata",
			post(hooks::update_metadata),
		)
}

/// Error surfaced to API clients, rendered as a JSON-API error document.
#[derive(Error, Debug)]
pub enum ApiError {
	#[error("{0}")]
	BadRequest(String),

	#[error("Authentication credentials were not provided or are invalid")]
	Unauthorized,

	#[error("{0}")]
	Forbidden(String),

	#[error("Not found")]
	NotFound,

	#[error("{0}")]
	Conflict(String),

	#[error("Gone")]
	Gone,

	#[error("Internal server error")]
	Internal,
}

impl ApiError {
	fn status(&self) -> StatusCode {
		match self {
			ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
			ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
			ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
			ApiError::NotFound => StatusCode::NOT_FOUND,
			ApiError::Conflict(_) => StatusCode::CONFLICT,
			ApiError::Gone => StatusCode::GONE,
			ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<CoreError> for ApiError {
	fn from(err: CoreError) -> Self {
		match err {
			CoreError::NotFound(_) => ApiError::NotFound,
			CoreError::Gone(_) => ApiError::Gone,
			CoreError::Unauthorized => ApiError::Unauthorized,
			CoreError::Forbidden(detail) => ApiError::Forbidden(detail),
			CoreError::Conflict(detail) => ApiError::Conflict(detail),
			CoreError::InvalidOperation(detail) => ApiError::BadRequest(detail),
			CoreError::Storage(err) => match err {
				StorageError::NotFound(_)
				| StorageError::DeleteRoot
				| StorageError::VersionNotFound(_) => ApiError::NotFound,
				StorageError::AlreadyExists(name) => {
					ApiError::Conflict(format!("a child named {name} already exists"))
				}
				StorageError::NotAFolder(detail) => ApiError::BadRequest(detail),
				StorageError::InvalidPath(detail) => {
					ApiError::BadRequest(format!("invalid path: {detail}"))
				}
			},
			CoreError::Database(_) | CoreError::Io(_) | CoreError::Other(_) => {
				error!("internal error: {err}");
				ApiError::Internal
			}
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorDocument {
			errors: vec![ErrorObject {
				detail: self.to_string(),
			}],
		};
		(self.status(), Json(body)).into_response()
	}
}

/// JSON-API primary-data envelope.
#[derive(Debug, Serialize)]
pub struct Document<T: Serialize> {
	pub data: T,
}

/// A serialized resource object.
#[derive(Debug, Serialize)]
pub struct Resource {
	#[serde(rename = "type")]
	pub kind: String,
	pub id: String,
	pub attributes: serde_json::Value,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub relationships: Option<serde_json::Value>,
}

/// A bare resource identifier, as used in relationship endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceIdentifier {
	#[serde(rename = "type")]
	pub kind: String,
	pub id: String,
}

/// JSON-API error envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDocument {
	pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorObject {
	pub detail: String,
}

/// Resolve the requester from a `Authorization: Bearer <token>` header.
///
/// No header means an anonymous request; a header carrying an unknown or
/// inactive token is a hard 401.
pub async fn current_user(
	state: &AppState,
	headers: &HeaderMap,
) -> Result<Option<user::Model>, ApiError> {
	let Some(value) = headers.get(http::header::AUTHORIZATION) else {
		return Ok(None);
	};

	let token = value
		.to_str()
		.ok()
		.and_then(|v| v.strip_prefix("Bearer "))
		.ok_or(ApiError::Unauthorized)?;

	let found = user::Entity::find()
		.filter(user::Column::ApiToken.eq(token))
		.filter(user::Column::IsActive.eq(true))
		.one(state.core.conn())
		.await
		.map_err(|err| ApiError::from(CoreError::from(err)))?;

	found.map(Some).ok_or(ApiError::Unauthorized)
}

/// Convenience: current user or 401.
pub async fn require_user(
	state: &AppState,
	headers: &HeaderMap,
) -> Result<user::Model, ApiError> {
	current_user(state, headers)
		.await?
		.ok_or(ApiError::Unauthorized)
}

/// Shared extractor bundle most handlers start with.
pub type Ctx = State<AppState>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn core_errors_map_to_expected_statuses() {
		let cases: Vec<(CoreError, StatusCode)> = vec![
			(CoreError::NotFound("x".into()), StatusCode::NOT_FOUND),
			(CoreError::Gone("x".into()), StatusCode::GONE),
			(CoreError::Unauthorized, StatusCode::UNAUTHORIZED),
			(CoreError::Forbidden("x".into()), StatusCode::FORBIDDEN),
			(CoreError::Conflict("x".into()), StatusCode::CONFLICT),
			(
				CoreError::InvalidOperation("x".into()),
				StatusCode::BAD_REQUEST,
			),
			(
				CoreError::Storage(StorageError::DeleteRoot),
				StatusCode::NOT_FOUND,
			),
			(
				CoreError::Storage(StorageError::AlreadyExists("a".into())),
				StatusCode::CONFLICT,
			),
			(
				CoreError::Storage(StorageError::InvalidPath("p".into())),
				StatusCode::BAD_REQUEST,
			),
		];

		for (err, status) in cases {
			assert_eq!(ApiError::from(err).status(), status);
		}
	}

	#[test]
	fn error_document_shape() {
		let rendered =
			serde_json::to_value(ErrorDocument {
				errors: vec![ErrorObject {
					detail: "User needs to be affiliated with Test University".into(),
				}],
			})
			.unwrap();

		assert_eq!(
			rendered["errors"][0]["detail"],
			"User needs to be affiliated with Test University"
		);
	}
}
