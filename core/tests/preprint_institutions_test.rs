//! Preprint institutional-affiliation integration tests
//!
//! Mirrors the relationship endpoint rules: only admin contributors may
//! change affiliations, additions require the actor's own affiliation,
//! removals do not, and every change lands in the preprint log.

mod helpers;

use helpers::*;
use osf_core::common::errors::CoreError;
use osf_core::domain::Permission;
use osf_core::service::preprints;

#[tokio::test]
async fn admin_with_affiliation_can_add_institution() {
	let harness = test_db().await;
	let db = harness.conn();

	let creator = create_user(db, "Creator").await;
	let provider = create_provider(db, "OSF Preprints").await;
	let preprint = create_preprint(db, &creator, &provider, "Dark matter notes").await;
	let institution = create_institution(db, "Test University").await;
	affiliate_user(db, &creator, &institution).await;

	let result = preprints::update_affiliations(db, &preprint, &creator, &[institution.uuid])
		.await
		.unwrap();

	assert_eq!(result.len(), 1);
	assert_eq!(result[0].name, "Test University");

	let log = preprints::latest_log(db, preprint.id).await.unwrap().unwrap();
	assert_eq!(log.action, "affiliated_institution_added");
	assert_eq!(log.params["institution"]["name"], "Test University");
}

#[tokio::test]
async fn non_admin_contributors_cannot_update_affiliations() {
	let harness = test_db().await;
	let db = harness.conn();

	let creator = create_user(db, "Creator").await;
	let writer = create_user(db, "Writer").await;
	let outsider = create_user(db, "Outsider").await;
	let provider = create_provider(db, "OSF Preprints").await;
	let preprint = create_preprint(db, &creator, &provider, "Dark matter notes").await;
	let institution = create_institution(db, "Test University").await;

	add_preprint_contributor(db, &preprint, &writer, Permission::Write).await;
	affiliate_user(db, &writer, &institution).await;
	affiliate_user(db, &outsider, &institution).await;

	for user in [&writer, &outsider] {
		let err = preprints::update_affiliations(db, &preprint, user, &[institution.uuid])
			.await
			.unwrap_err();
		assert!(matches!(err, CoreError::Forbidden(_)));
	}
}

#[tokio::test]
async fn adding_requires_the_actors_own_affiliation() {
	let harness = test_db().await;
	let db = harness.conn();

	let creator = create_user(db, "Creator").await;
	let provider = create_provider(db, "OSF Preprints").await;
	let preprint = create_preprint(db, &creator, &provider, "Dark matter notes").await;
	let institution = create_institution(db, "Test University").await;

	let err = preprints::update_affiliations(db, &preprint, &creator, &[institution.uuid])
		.await
		.unwrap_err();

	match err {
		CoreError::Forbidden(detail) => {
			assert_eq!(detail, "User needs to be affiliated with Test University");
		}
		other => panic!("expected Forbidden, got {other:?}"),
	}
}

#[tokio::test]
async fn removal_does_not_require_affiliation() {
	let harness = test_db().await;
	let db = harness.conn();

	let creator = create_user(db, "Creator").await;
	let provider = create_provider(db, "OSF Preprints").await;
	let preprint = create_preprint(db, &creator, &provider, "Dark matter notes").await;
	let institution = create_institution(db, "Test University").await;
	affiliate_preprint(db, &preprint, &institution).await;

	// The admin never was affiliated with the institution; removal is fine.
	let result = preprints::update_affiliations(db, &preprint, &creator, &[])
		.await
		.unwrap();
	assert!(result.is_empty());

	let log = preprints::latest_log(db, preprint.id).await.unwrap().unwrap();
	assert_eq!(log.action, "affiliated_institution_removed");
	assert_eq!(log.params["institution"]["name"], "Test University");
}

#[tokio::test]
async fn put_semantics_replace_the_whole_set() {
	let harness = test_db().await;
	let db = harness.conn();

	let creator = create_user(db, "Creator").await;
	let provider = create_provider(db, "OSF Preprints").await;
	let preprint = create_preprint(db, &creator, &provider, "Dark matter notes").await;

	let keep = create_institution(db, "Keep University").await;
	let dropped = create_institution(db, "Drop College").await;
	let add = create_institution(db, "Add Institute").await;
	affiliate_user(db, &creator, &keep).await;
	affiliate_user(db, &creator, &add).await;
	affiliate_preprint(db, &preprint, &keep).await;
	affiliate_preprint(db, &preprint, &dropped).await;

	let result =
		preprints::update_affiliations(db, &preprint, &creator, &[keep.uuid, add.uuid])
			.await
			.unwrap();

	let mut names: Vec<String> = result.into_iter().map(|i| i.name).collect();
	names.sort();
	assert_eq!(names, vec!["Add Institute", "Keep University"]);
}

#[tokio::test]
async fn unknown_institution_is_not_found() {
	let harness = test_db().await;
	let db = harness.conn();

	let creator = create_user(db, "Creator").await;
	let provider = create_provider(db, "OSF Preprints").await;
	let preprint = create_preprint(db, &creator, &provider, "Dark matter notes").await;

	let err = preprints::update_affiliations(db, &preprint, &creator, &[uuid::Uuid::new_v4()])
		.await
		.unwrap_err();
	assert!(matches!(err, CoreError::NotFound(_)));
}

#[tokio::test]
async fn private_preprints_hide_from_non_contributors() {
	let harness = test_db().await;
	let db = harness.conn();

	let creator = create_user(db, "Creator").await;
	let stranger = create_user(db, "Stranger").await;
	let provider = create_provider(db, "OSF Preprints").await;
	let mut preprint = create_preprint(db, &creator, &provider, "Hidden notes").await;

	// Flip it private.
	use sea_orm::{ActiveModelTrait, ActiveValue::Set};
	let mut active: osf_core::infra::db::entities::preprint::ActiveModel =
		preprint.clone().into();
	active.is_public = Set(false);
	preprint = active.update(db).await.unwrap();

	// Anonymous viewers get an auth challenge, strangers a refusal.
	let err = preprints::ensure_can_view(db, &preprint, None).await.unwrap_err();
	assert!(matches!(err, CoreError::Unauthorized));

	let err = preprints::ensure_can_view(db, &preprint, Some(&stranger))
		.await
		.unwrap_err();
	assert!(matches!(err, CoreError::Forbidden(_)));

	preprints::ensure_can_view(db, &preprint, Some(&creator))
		.await
		.unwrap();
}
