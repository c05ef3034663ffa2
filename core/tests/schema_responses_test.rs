//! Schema response workflow integration tests

mod helpers;

use helpers::*;
use osf_core::common::errors::CoreError;
use osf_core::domain::{Permission, ResponseState};
use osf_core::service::schema_responses;

#[tokio::test]
async fn initial_response_gets_one_blank_block_per_schema_key() {
	let harness = test_db().await;
	let db = harness.conn();

	let admin = create_user(db, "Registration Admin").await;
	let schema = create_schema(db, "Preregistration").await;
	let registration = create_registration(db, &admin, &schema, "Study 1").await;

	let response = schema_responses::create_response(db, &admin, &registration, None)
		.await
		.unwrap();

	assert_eq!(response.response_state(), Some(ResponseState::InProgress));
	assert!(response.previous_response_id.is_none());

	let blocks = schema_responses::response_blocks(db, response.id).await.unwrap();
	let keys: Vec<&str> = blocks.iter().map(|b| b.schema_key.as_str()).collect();
	assert_eq!(keys, vec!["summary", "hypothesis"]);
	assert!(blocks.iter().all(|b| b.response.is_none()));
}

#[tokio::test]
async fn only_admins_may_create_responses() {
	let harness = test_db().await;
	let db = harness.conn();

	let admin = create_user(db, "Admin").await;
	let writer = create_user(db, "Writer").await;
	let reader = create_user(db, "Reader").await;
	let outsider = create_user(db, "Outsider").await;
	let schema = create_schema(db, "Preregistration").await;
	let registration = create_registration(db, &admin, &schema, "Study 1").await;
	add_contributor(db, &registration, &writer, Permission::Write).await;
	add_contributor(db, &registration, &reader, Permission::Read).await;

	for user in [&writer, &reader, &outsider] {
		let err = schema_responses::create_response(db, user, &registration, None)
			.await
			.unwrap_err();
		assert!(matches!(err, CoreError::Forbidden(_)));
	}
}

#[tokio::test]
async fn a_second_pending_revision_is_a_conflict() {
	let harness = test_db().await;
	let db = harness.conn();

	let admin = create_user(db, "Admin").await;
	let schema = create_schema(db, "Preregistration").await;
	let registration = create_registration(db, &admin, &schema, "Study 1").await;

	schema_responses::create_response(db, &admin, &registration, None)
		.await
		.unwrap();

	let err = schema_responses::create_response(db, &admin, &registration, None)
		.await
		.unwrap_err();
	assert!(matches!(err, CoreError::Conflict(_)));
}

#[tokio::test]
async fn revisions_copy_the_previous_approved_answers() {
	let harness = test_db().await;
	let db = harness.conn();

	let admin = create_user(db, "Admin").await;
	let schema = create_schema(db, "Preregistration").await;
	let registration = create_registration(db, &admin, &schema, "Study 1").await;

	let first = schema_responses::create_response(db, &admin, &registration, None)
		.await
		.unwrap();
	schema_responses::update_block(
		db,
		&admin,
		&first,
		"summary",
		Some(serde_json::json!("We measured twelve things")),
	)
	.await
	.unwrap();

	let first = schema_responses::transition(db, &admin, &first, ResponseState::Unapproved)
		.await
		.unwrap();
	let first = schema_responses::transition(db, &admin, &first, ResponseState::Approved)
		.await
		.unwrap();
	assert!(first.submitted_at.is_some());

	let revision = schema_responses::create_response(
		db,
		&admin,
		&registration,
		Some("Fixing a typo in the summary".to_string()),
	)
	.await
	.unwrap();

	assert_eq!(revision.previous_response_id, Some(first.id));

	let blocks = schema_responses::response_blocks(db, revision.id).await.unwrap();
	let summary = blocks.iter().find(|b| b.schema_key == "summary").unwrap();
	assert_eq!(
		summary.response,
		Some(serde_json::json!("We measured twelve things"))
	);
}

#[tokio::test]
async fn invalid_transitions_are_rejected() {
	let harness = test_db().await;
	let db = harness.conn();

	let admin = create_user(db, "Admin").await;
	let schema = create_schema(db, "Preregistration").await;
	let registration = create_registration(db, &admin, &schema, "Study 1").await;

	let response = schema_responses::create_response(db, &admin, &registration, None)
		.await
		.unwrap();

	// Straight to approved without a submission round is invalid.
	let err = schema_responses::transition(db, &admin, &response, ResponseState::Approved)
		.await
		.unwrap_err();
	assert!(matches!(err, CoreError::InvalidOperation(_)));
}

#[tokio::test]
async fn visibility_follows_registration_access() {
	let harness = test_db().await;
	let db = harness.conn();

	let admin = create_user(db, "Admin").await;
	let stranger = create_user(db, "Stranger").await;
	let schema = create_schema(db, "Preregistration").await;
	let registration = create_registration(db, &admin, &schema, "Study 1").await;

	let response = schema_responses::create_response(db, &admin, &registration, None)
		.await
		.unwrap();

	// In-progress responses are only visible to contributors, even on a
	// public registration.
	let for_stranger = schema_responses::list_visible(db, Some(&stranger)).await.unwrap();
	assert!(for_stranger.is_empty());
	let anonymous = schema_responses::list_visible(db, None).await.unwrap();
	assert!(anonymous.is_empty());

	let for_admin = schema_responses::list_visible(db, Some(&admin)).await.unwrap();
	assert_eq!(for_admin.len(), 1);

	// Approval opens it up to everyone.
	let response = schema_responses::transition(db, &admin, &response, ResponseState::Unapproved)
		.await
		.unwrap();
	schema_responses::transition(db, &admin, &response, ResponseState::Approved)
		.await
		.unwrap();

	let for_stranger = schema_responses::list_visible(db, Some(&stranger)).await.unwrap();
	assert_eq!(for_stranger.len(), 1);
}

#[tokio::test]
async fn creating_against_a_project_node_is_invalid() {
	let harness = test_db().await;
	let db = harness.conn();

	let admin = create_user(db, "Admin").await;
	let project = create_node(db, &admin, "Just a project", true).await;

	let err = schema_responses::get_registration(db, project.uuid)
		.await
		.unwrap_err();
	assert!(matches!(err, CoreError::InvalidOperation(_)));
}
