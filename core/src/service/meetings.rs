//! Meeting queries
//!
//! A meeting is a conference whose submissions are ordinary public nodes
//! carrying the meeting's endpoint name as a tag. Membership is entirely
//! tag-driven; there is no explicit submission table.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
	ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
	QueryFilter, QueryOrder,
};

use crate::common::errors::CoreError;
use crate::infra::db::entities::{conference, node, node_tag, tag, user};

/// Optional filters for the meeting listing.
#[derive(Debug, Default, Clone)]
pub struct MeetingFilter {
	/// Case-insensitive substring match on the meeting name.
	pub name: Option<String>,
}

/// A submission with the bits the serializer needs alongside the node.
#[derive(Debug, Clone)]
pub struct MeetingSubmission {
	pub node: node::Model,
	pub author: Option<user::Model>,
	pub download_count: i64,
}

/// All meetings, newest-modified first.
pub async fn list_meetings(
	db: &DatabaseConnection,
	filter: &MeetingFilter,
) -> Result<Vec<conference::Model>, CoreError> {
	let mut query = conference::Entity::find().filter(conference::Column::IsMeeting.eq(true));

	if let Some(name) = &filter.name {
		query = query.filter(conference::Column::Name.contains(name.as_str()));
	}

	Ok(query
		.order_by_desc(conference::Column::ModifiedAt)
		.all(db)
		.await?)
}

/// Look up a meeting by its endpoint slug.
pub async fn get_meeting(
	db: &DatabaseConnection,
	endpoint: &str,
) -> Result<conference::Model, CoreError> {
	conference::Entity::find()
		.filter(conference::Column::Endpoint.eq(endpoint))
		.filter(conference::Column::IsMeeting.eq(true))
		.one(db)
		.await?
		.ok_or_else(|| CoreError::NotFound(format!("meeting {endpoint}")))
}

/// Public, non-deleted nodes tagged with the meeting endpoint
/// (case-insensitive, non-system tags only), newest-modified first.
pub async fn meeting_submissions(
	db: &DatabaseConnection,
	meeting: &conference::Model,
) -> Result<Vec<MeetingSubmission>, CoreError> {
	let tag_ids: Vec<i32> = tag::Entity::find()
		.filter(tag::Column::System.eq(false))
		.filter(
			Expr::expr(Func::lower(Expr::col((tag::Entity, tag::Column::Name))))
				.eq(meeting.endpoint.to_lowercase()),
		)
		.all(db)
		.await?
		.into_iter()
		.map(|t| t.id)
		.collect();

	if tag_ids.is_empty() {
		refresh_submission_count(db, meeting, 0).await?;
		return Ok(Vec::new());
	}

	let node_ids: Vec<i32> = node_tag::Entity::find()
		.filter(node_tag::Column::TagId.is_in(tag_ids))
		.all(db)
		.await?
		.into_iter()
		.map(|nt| nt.node_id)
		.collect();

	let nodes = node::Entity::find()
		.filter(node::Column::Id.is_in(node_ids))
		.filter(node::Column::IsPublic.eq(true))
		.filter(node::Column::IsDeleted.eq(false))
		.order_by_desc(node::Column::ModifiedAt)
		.all(db)
		.await?;

	refresh_submission_count(db, meeting, nodes.len() as i32).await?;

	let mut submissions = Vec::with_capacity(nodes.len());
	for node in nodes {
		let author = user::Entity::find_by_id(node.creator_id).one(db).await?;
		let download_count =
			crate::service::storage::node_download_count(db, node.id).await?;
		submissions.push(MeetingSubmission {
			node,
			author,
			download_count,
		});
	}

	Ok(submissions)
}

/// Keep the cached submission count on the conference row current.
async fn refresh_submission_count(
	db: &DatabaseConnection,
	meeting: &conference::Model,
	count: i32,
) -> Result<(), CoreError> {
	if meeting.num_submissions != count {
		let mut active: conference::ActiveModel = meeting.clone().into();
		active.num_submissions = Set(count);
		active.update(db).await?;
	}
	Ok(())
}
