//! Test factories for integration tests
//!
//! Small builders over the entities so each test reads as the scenario it
//! exercises rather than a wall of ActiveModel plumbing.

#![allow(dead_code)]

use chrono::Utc;
use osf_core::domain::Permission;
use osf_core::infra::db::entities::{
	conference, contributor, institution, node, node_tag, preprint, preprint_contributor,
	preprint_institution, provider, registration_schema, tag, user, user_institution,
};
use osf_core::infra::db::Db;
use sea_orm::{
	ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use serde_json::json;
use tempfile::TempDir;
use uuid::Uuid;

/// An open, fully migrated database in a tempdir that lives as long as the
/// harness value.
pub struct TestDb {
	pub db: Db,
	_temp: TempDir,
}

impl TestDb {
	pub fn conn(&self) -> &DatabaseConnection {
		self.db.conn()
	}
}

pub async fn test_db() -> TestDb {
	let temp = TempDir::new().unwrap();
	let db_path = temp.path().join("test.db");
	let database_url = format!("sqlite://{}?mode=rwc", db_path.display());
	let db = Db::connect(&database_url).await.unwrap();

	TestDb { db, _temp: temp }
}

pub async fn create_user(db: &DatabaseConnection, full_name: &str) -> user::Model {
	let now = Utc::now();
	let uuid = Uuid::new_v4();
	user::ActiveModel {
		uuid: Set(uuid),
		full_name: Set(full_name.to_string()),
		username: Set(format!("user-{uuid}")),
		api_token: Set(Some(format!("token-{uuid}"))),
		is_active: Set(true),
		created_at: Set(now),
		modified_at: Set(now),
		..Default::default()
	}
	.insert(db)
	.await
	.unwrap()
}

pub async fn create_institution(db: &DatabaseConnection, name: &str) -> institution::Model {
	let now = Utc::now();
	institution::ActiveModel {
		uuid: Set(Uuid::new_v4()),
		name: Set(name.to_string()),
		created_at: Set(now),
		modified_at: Set(now),
		..Default::default()
	}
	.insert(db)
	.await
	.unwrap()
}

pub async fn affiliate_user(
	db: &DatabaseConnection,
	user: &user::Model,
	inst: &institution::Model,
) {
	user_institution::Entity::insert(user_institution::ActiveModel {
		user_id: Set(user.id),
		institution_id: Set(inst.id),
		created_at: Set(Utc::now()),
	})
	.exec_without_returning(db)
	.await
	.unwrap();
}

pub async fn create_node(
	db: &DatabaseConnection,
	creator: &user::Model,
	title: &str,
	is_public: bool,
) -> node::Model {
	let now = Utc::now();
	let node = node::ActiveModel {
		uuid: Set(Uuid::new_v4()),
		title: Set(title.to_string()),
		description: Set(None),
		kind: Set(node::NodeKind::Project.into()),
		creator_id: Set(creator.id),
		is_public: Set(is_public),
		is_deleted: Set(false),
		registered_schema_id: Set(None),
		created_at: Set(now),
		modified_at: Set(now),
		..Default::default()
	}
	.insert(db)
	.await
	.unwrap();

	add_contributor(db, &node, creator, Permission::Admin).await;

	node
}

pub async fn add_contributor(
	db: &DatabaseConnection,
	node: &node::Model,
	user: &user::Model,
	permission: Permission,
) {
	let (read, write, admin) = permission.as_flags();
	contributor::ActiveModel {
		node_id: Set(node.id),
		user_id: Set(user.id),
		read: Set(read),
		write: Set(write),
		admin: Set(admin),
		visible: Set(true),
		..Default::default()
	}
	.insert(db)
	.await
	.unwrap();
}

/// Tag a node, creating the tag row on first use.
pub async fn tag_node(db: &DatabaseConnection, node: &node::Model, name: &str, system: bool) {
	let existing = tag::Entity::find()
		.filter(tag::Column::Name.eq(name))
		.filter(tag::Column::System.eq(system))
		.one(db)
		.await
		.unwrap();

	let tag = match existing {
		Some(tag) => tag,
		None => tag::ActiveModel {
			name: Set(name.to_string()),
			system: Set(system),
			created_at: Set(Utc::now()),
			..Default::default()
		}
		.insert(db)
		.await
		.unwrap(),
	};

	node_tag::Entity::insert(node_tag::ActiveModel {
		node_id: Set(node.id),
		tag_id: Set(tag.id),
	})
	.exec_without_returning(db)
	.await
	.unwrap();
}

pub async fn create_conference(
	db: &DatabaseConnection,
	endpoint: &str,
	name: &str,
) -> conference::Model {
	let now = Utc::now();
	conference::ActiveModel {
		endpoint: Set(endpoint.to_string()),
		name: Set(name.to_string()),
		location: Set(Some("Portland, OR".to_string())),
		is_meeting: Set(true),
		active: Set(true),
		field_names: Set(json!({ "submission1": "poster", "submission2": "talk" })),
		num_submissions: Set(0),
		created_at: Set(now),
		modified_at: Set(now),
		..Default::default()
	}
	.insert(db)
	.await
	.unwrap()
}

pub async fn create_provider(db: &DatabaseConnection, name: &str) -> provider::Model {
	let now = Utc::now();
	provider::ActiveModel {
		uuid: Set(Uuid::new_v4()),
		name: Set(name.to_string()),
		description: Set(None),
		is_moderated: Set(false),
		created_at: Set(now),
		modified_at: Set(now),
		..Default::default()
	}
	.insert(db)
	.await
	.unwrap()
}

/// A published preprint whose creator is its admin contributor, like the
/// factory the original integration tests lean on.
pub async fn create_preprint(
	db: &DatabaseConnection,
	creator: &user::Model,
	provider: &provider::Model,
	title: &str,
) -> preprint::Model {
	let now = Utc::now();
	let preprint = preprint::ActiveModel {
		uuid: Set(Uuid::new_v4()),
		title: Set(title.to_string()),
		description: Set(None),
		creator_id: Set(creator.id),
		node_id: Set(None),
		provider_id: Set(provider.id),
		is_public: Set(true),
		is_published: Set(true),
		date_published: Set(Some(now)),
		created_at: Set(now),
		modified_at: Set(now),
		..Default::default()
	}
	.insert(db)
	.await
	.unwrap();

	add_preprint_contributor(db, &preprint, creator, Permission::Admin).await;

	preprint
}

pub async fn add_preprint_contributor(
	db: &DatabaseConnection,
	preprint: &preprint::Model,
	user: &user::Model,
	permission: Permission,
) {
	let (read, write, admin) = permission.as_flags();
	preprint_contributor::ActiveModel {
		preprint_id: Set(preprint.id),
		user_id: Set(user.id),
		read: Set(read),
		write: Set(write),
		admin: Set(admin),
		visible: Set(true),
		..Default::default()
	}
	.insert(db)
	.await
	.unwrap();
}

pub async fn affiliate_preprint(
	db: &DatabaseConnection,
	preprint: &preprint::Model,
	inst: &institution::Model,
) {
	preprint_institution::Entity::insert(preprint_institution::ActiveModel {
		preprint_id: Set(preprint.id),
		institution_id: Set(inst.id),
		created_at: Set(Utc::now()),
	})
	.exec_without_returning(db)
	.await
	.unwrap();
}

pub async fn create_schema(db: &DatabaseConnection, name: &str) -> registration_schema::Model {
	registration_schema::ActiveModel {
		name: Set(name.to_string()),
		schema_version: Set(1),
		blocks: Set(json!([
			{ "key": "summary", "question": "Summarize the study" },
			{ "key": "hypothesis", "question": "State the hypothesis" },
		])),
		..Default::default()
	}
	.insert(db)
	.await
	.unwrap()
}

/// A public registration of the given schema with the creator as admin.
pub async fn create_registration(
	db: &DatabaseConnection,
	creator: &user::Model,
	schema: &registration_schema::Model,
	title: &str,
) -> node::Model {
	let now = Utc::now();
	let node = node::ActiveModel {
		uuid: Set(Uuid::new_v4()),
		title: Set(title.to_string()),
		description: Set(None),
		kind: Set(node::NodeKind::Registration.into()),
		creator_id: Set(creator.id),
		is_public: Set(true),
		is_deleted: Set(false),
		registered_schema_id: Set(Some(schema.id)),
		created_at: Set(now),
		modified_at: Set(now),
		..Default::default()
	}
	.insert(db)
	.await
	.unwrap();

	add_contributor(db, &node, creator, Permission::Admin).await;

	node
}
