//! Meeting endpoints
//!
//! Meeting data is public: listings, detail and submissions are all readable
//! anonymously.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use osf_core::infra::db::entities::conference;
use osf_core::service::meetings::{self, MeetingFilter, MeetingSubmission};

use super::{ApiError, Ctx, Document, Resource};

#[derive(Debug, Deserialize, Default)]
pub struct MeetingListQuery {
	#[serde(rename = "filter[name]")]
	pub name: Option<String>,
}

pub async fn list(
	State(state): Ctx,
	Query(query): Query<MeetingListQuery>,
) -> Result<Json<Document<Vec<Resource>>>, ApiError> {
	let filter = MeetingFilter { name: query.name };
	let conferences = meetings::list_meetings(state.core.conn(), &filter).await?;

	Ok(Json(Document {
		data: conferences.iter().map(serialize_meeting).collect(),
	}))
}

pub async fn detail(
	State(state): Ctx,
	Path(endpoint): Path<String>,
) -> Result<Json<Document<Resource>>, ApiError> {
	let meeting = meetings::get_meeting(state.core.conn(), &endpoint).await?;

	Ok(Json(Document {
		data: serialize_meeting(&meeting),
	}))
}

pub async fn submissions(
	State(state): Ctx,
	Path(endpoint): Path<String>,
) -> Result<Json<Document<Vec<Resource>>>, ApiError> {
	let meeting = meetings::get_meeting(state.core.conn(), &endpoint).await?;
	let submissions = meetings::meeting_submissions(state.core.conn(), &meeting).await?;

	Ok(Json(Document {
		data: submissions.iter().map(serialize_submission).collect(),
	}))
}

fn serialize_meeting(meeting: &conference::Model) -> Resource {
	Resource {
		kind: "meetings".to_string(),
		id: meeting.endpoint.clone(),
		attributes: json!({
			"name": meeting.name,
			"location": meeting.location,
			"active": meeting.active,
			"field_names": meeting.field_names,
			"submissions_count": meeting.num_submissions,
			"created_at": meeting.created_at,
			"modified_at": meeting.modified_at,
		}),
		relationships: None,
	}
}

fn serialize_submission(submission: &MeetingSubmission) -> Resource {
	Resource {
		kind: "meeting-submissions".to_string(),
		id: submission.node.uuid.to_string(),
		attributes: json!({
			"title": submission.node.title,
			"author_name": submission.author.as_ref().map(|a| a.full_name.clone()),
			"download_count": submission.download_count,
			"created_at": submission.node.created_at,
			"modified_at": submission.node.modified_at,
		}),
		relationships: None,
	}
}
