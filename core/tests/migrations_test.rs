//! Migration behavior tests
//!
//! The schema migrations run on every test database; these tests pin the
//! data-migration behavior: the permission catalog contents and the
//! preprint/node divorce backfill.

mod helpers;

use chrono::Utc;
use helpers::*;
use osf_core::infra::db::entities::{preprint, preprint_contributor, provider_permission};
use osf_core::infra::db::migration::Migrator;
use sea_orm::{
	ActiveModelTrait, ActiveValue::Set, ColumnTrait, Database, EntityTrait, QueryFilter,
};
use sea_orm_migration::MigratorTrait;
use tempfile::TempDir;
use uuid::Uuid;

#[tokio::test]
async fn permission_catalog_is_seeded_and_expanded() {
	let harness = test_db().await;
	let db = harness.conn();

	let all = provider_permission::Entity::find().all(db).await.unwrap();
	assert_eq!(all.len(), 15);

	let detail = provider_permission::Entity::find()
		.filter(provider_permission::Column::Codename.eq("view_preprintprovider"))
		.one(db)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(detail.name, "Can view preprint provider details");

	assert!(all.iter().any(|p| p.codename == "accept_submissions"));
	assert!(all.iter().any(|p| p.codename == "set_up_moderation"));
}

#[tokio::test]
async fn divorce_copies_node_fields_and_contributors() {
	// Stop before the divorce migration so we can stage legacy data.
	let temp = TempDir::new().unwrap();
	let database_url = format!(
		"sqlite://{}?mode=rwc",
		temp.path().join("legacy.db").display()
	);
	let db = Database::connect(&database_url).await.unwrap();
	Migrator::up(&db, Some(3)).await.unwrap();

	let node_owner = create_user(&db, "Node Owner").await;
	let coauthor = create_user(&db, "Coauthor").await;
	let uploader = create_user(&db, "Preprint Uploader").await;
	let provider = create_provider(&db, "OSF Preprints").await;

	let node = create_node(&db, &node_owner, "Supplemental project", true).await;
	add_contributor(&db, &node, &coauthor, osf_core::domain::Permission::Write).await;

	// A legacy preprint: no fields of its own, everything lives on the node.
	let now = Utc::now();
	let legacy = preprint::ActiveModel {
		uuid: Set(Uuid::new_v4()),
		title: Set(String::new()),
		description: Set(None),
		creator_id: Set(uploader.id),
		node_id: Set(Some(node.id)),
		provider_id: Set(provider.id),
		is_public: Set(true),
		is_published: Set(true),
		date_published: Set(Some(now)),
		created_at: Set(now),
		modified_at: Set(now),
		..Default::default()
	}
	.insert(&db)
	.await
	.unwrap();

	// One contributor row already exists; the backfill must not duplicate it.
	preprint_contributor::ActiveModel {
		preprint_id: Set(legacy.id),
		user_id: Set(node_owner.id),
		read: Set(true),
		write: Set(true),
		admin: Set(true),
		visible: Set(true),
		..Default::default()
	}
	.insert(&db)
	.await
	.unwrap();

	// Run the divorce.
	Migrator::up(&db, None).await.unwrap();

	let migrated = preprint::Entity::find_by_id(legacy.id)
		.one(&db)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(migrated.title, "Supplemental project");
	assert_eq!(migrated.creator_id, node_owner.id);

	let contributors = preprint_contributor::Entity::find()
		.filter(preprint_contributor::Column::PreprintId.eq(legacy.id))
		.all(&db)
		.await
		.unwrap();

	// node owner (pre-existing, not duplicated) + coauthor (materialized)
	assert_eq!(contributors.len(), 2);

	let migrated_coauthor = contributors
		.iter()
		.find(|c| c.user_id == coauthor.id)
		.expect("coauthor contributor row should be materialized");
	assert!(migrated_coauthor.write);
	assert!(!migrated_coauthor.admin);
	assert!(migrated_coauthor.visible);
}

#[tokio::test]
async fn preprints_without_nodes_are_untouched() {
	let temp = TempDir::new().unwrap();
	let database_url = format!(
		"sqlite://{}?mode=rwc",
		temp.path().join("legacy.db").display()
	);
	let db = Database::connect(&database_url).await.unwrap();
	Migrator::up(&db, Some(3)).await.unwrap();

	let uploader = create_user(&db, "Uploader").await;
	let provider = create_provider(&db, "OSF Preprints").await;

	let now = Utc::now();
	let standalone = preprint::ActiveModel {
		uuid: Set(Uuid::new_v4()),
		title: Set("Already divorced".to_string()),
		description: Set(Some("self-describing".to_string())),
		creator_id: Set(uploader.id),
		node_id: Set(None),
		provider_id: Set(provider.id),
		is_public: Set(true),
		is_published: Set(true),
		date_published: Set(Some(now)),
		created_at: Set(now),
		modified_at: Set(now),
		..Default::default()
	}
	.insert(&db)
	.await
	.unwrap();

	Migrator::up(&db, None).await.unwrap();

	let after = preprint::Entity::find_by_id(standalone.id)
		.one(&db)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(after.title, "Already divorced");
	assert_eq!(after.description.as_deref(), Some("self-describing"));
	assert_eq!(after.creator_id, uploader.id);
}
