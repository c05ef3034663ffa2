//! Meeting query integration tests
//!
//! Submission membership is tag-driven: public, non-deleted nodes carrying
//! the meeting endpoint as a non-system tag.

mod helpers;

use helpers::*;
use osf_core::service::meetings::{self, MeetingFilter};
use sea_orm::EntityTrait;

#[tokio::test]
async fn submissions_are_public_nodes_tagged_with_the_endpoint() {
	let harness = test_db().await;
	let db = harness.conn();

	let organizer = create_user(db, "Meeting Organizer").await;
	let meeting = create_conference(db, "neuro2024", "Neuroscience 2024").await;

	let poster = create_node(db, &organizer, "A tagged poster", true).await;
	tag_node(db, &poster, "neuro2024", false).await;

	// Tag casing differs from the endpoint; still a submission.
	let talk = create_node(db, &organizer, "A tagged talk", true).await;
	tag_node(db, &talk, "NEURO2024", false).await;

	// Private, deleted and system-tagged nodes stay out.
	let private = create_node(db, &organizer, "Private work", false).await;
	tag_node(db, &private, "neuro2024", false).await;

	let system_tagged = create_node(db, &organizer, "System tagged", true).await;
	tag_node(db, &system_tagged, "neuro2024", true).await;

	let unrelated = create_node(db, &organizer, "Off topic", true).await;
	tag_node(db, &unrelated, "other-meeting", false).await;

	let submissions = meetings::meeting_submissions(db, &meeting).await.unwrap();
	let titles: Vec<&str> = submissions.iter().map(|s| s.node.title.as_str()).collect();

	assert_eq!(submissions.len(), 2);
	assert!(titles.contains(&"A tagged poster"));
	assert!(titles.contains(&"A tagged talk"));

	// Author comes along for the serializer.
	assert_eq!(
		submissions[0].author.as_ref().unwrap().full_name,
		"Meeting Organizer"
	);
}

#[tokio::test]
async fn submission_count_cache_is_refreshed() {
	let harness = test_db().await;
	let db = harness.conn();

	let organizer = create_user(db, "Organizer").await;
	let meeting = create_conference(db, "chem2024", "Chemistry 2024").await;

	let poster = create_node(db, &organizer, "Poster", true).await;
	tag_node(db, &poster, "chem2024", false).await;

	assert_eq!(meeting.num_submissions, 0);
	meetings::meeting_submissions(db, &meeting).await.unwrap();

	let refreshed = osf_core::infra::db::entities::conference::Entity::find_by_id(meeting.id)
		.one(db)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(refreshed.num_submissions, 1);
}

#[tokio::test]
async fn listing_filters_by_name_and_orders_by_modified() {
	let harness = test_db().await;
	let db = harness.conn();

	create_conference(db, "bio2023", "Biology 2023").await;
	create_conference(db, "bio2024", "Biology 2024").await;
	create_conference(db, "phys2024", "Physics 2024").await;

	let all = meetings::list_meetings(db, &MeetingFilter::default())
		.await
		.unwrap();
	assert_eq!(all.len(), 3);

	let filtered = meetings::list_meetings(
		db,
		&MeetingFilter {
			name: Some("Biology".to_string()),
		},
	)
	.await
	.unwrap();
	assert_eq!(filtered.len(), 2);
	assert!(filtered.iter().all(|m| m.name.starts_with("Biology")));
}

#[tokio::test]
async fn unknown_endpoint_is_not_found() {
	let harness = test_db().await;
	let db = harness.conn();

	let err = meetings::get_meeting(db, "nope").await.unwrap_err();
	assert!(matches!(
		err,
		osf_core::common::errors::CoreError::NotFound(_)
	));
}
