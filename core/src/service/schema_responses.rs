//! Schema response workflows
//!
//! Registrations answer a registration schema; each set of answers is a
//! schema response revision moving through the `ResponseState` lifecycle.

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
	ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
	EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::common::errors::CoreError;
use crate::domain::{Permission, ResponseState};
use crate::infra::db::entities::{
	contributor, node, registration_schema, schema_response, schema_response_block, user,
};

/// Look up a registration node by its external id.
pub async fn get_registration(
	db: &DatabaseConnection,
	uuid: Uuid,
) -> Result<node::Model, CoreError> {
	let node = node::Entity::find()
		.filter(node::Column::Uuid.eq(uuid))
		.filter(node::Column::IsDeleted.eq(false))
		.one(db)
		.await?
		.ok_or_else(|| CoreError::NotFound(format!("registration {uuid}")))?;

	if !node.is_registration() {
		return Err(CoreError::InvalidOperation(format!(
			"node {uuid} is not a registration"
		)));
	}

	Ok(node)
}

/// Permission tier the user holds on a node.
pub async fn node_permission_for(
	db: &impl ConnectionTrait,
	user_id: i32,
	node_id: i32,
) -> Result<Option<Permission>, CoreError> {
	let contributor = contributor::Entity::find()
		.filter(contributor::Column::NodeId.eq(node_id))
		.filter(contributor::Column::UserId.eq(user_id))
		.one(db)
		.await?;

	Ok(contributor.and_then(|c| c.permission()))
}

/// Look up a schema response by its external id.
pub async fn get_response(
	db: &DatabaseConnection,
	uuid: Uuid,
) -> Result<schema_response::Model, CoreError> {
	schema_response::Entity::find()
		.filter(schema_response::Column::Uuid.eq(uuid))
		.one(db)
		.await?
		.ok_or_else(|| CoreError::NotFound(format!("schema response {uuid}")))
}

/// Responses the viewer may see: approved responses on public registrations,
/// plus everything on registrations the viewer contributes to. Responses on
/// deleted registrations never show up.
pub async fn list_visible(
	db: &DatabaseConnection,
	viewer: Option<&user::Model>,
) -> Result<Vec<schema_response::Model>, CoreError> {
	let contributed: HashSet<i32> = match viewer {
		Some(user) => contributor::Entity::find()
			.filter(contributor::Column::UserId.eq(user.id))
			.all(db)
			.await?
			.into_iter()
			.map(|c| c.node_id)
			.collect(),
		None => HashSet::new(),
	};

	let rows = schema_response::Entity::find()
		.find_also_related(node::Entity)
		.order_by_desc(schema_response::Column::CreatedAt)
		.all(db)
		.await?;

	let visible = rows
		.into_iter()
		.filter_map(|(response, registration)| {
			let registration = registration?;
			if registration.is_deleted {
				return None;
			}
			if contributed.contains(&registration.id) {
				return Some(response);
			}
			let approved = response.response_state() == Some(ResponseState::Approved);
			(registration.is_public && approved).then_some(response)
		})
		.collect();

	Ok(visible)
}

/// Whether the viewer may see this particular response.
pub async fn can_view_response(
	db: &DatabaseConnection,
	response: &schema_response::Model,
	viewer: Option<&user::Model>,
) -> Result<bool, CoreError> {
	let registration = node::Entity::find_by_id(response.node_id)
		.one(db)
		.await?
		.ok_or_else(|| CoreError::NotFound(format!("registration for response {}", response.uuid)))?;

	if registration.is_deleted {
		return Ok(false);
	}

	if let Some(user) = viewer {
		if node_permission_for(db, user.id, registration.id).await?.is_some() {
			return Ok(true);
		}
	}

	let approved = response.response_state() == Some(ResponseState::Approved);
	Ok(registration.is_public && approved)
}

/// Create a new response revision on a registration.
///
/// The actor must be an admin contributor. Only one non-approved revision may
/// exist at a time; a new one either starts blank from the schema's block
/// keys or copies the answers of the latest approved revision.
pub async fn create_response(
	db: &DatabaseConnection,
	actor: &user::Model,
	registration: &node::Model,
	justification: Option<String>,
) -> Result<schema_response::Model, CoreError> {
	let permission = node_permission_for(db, actor.id, registration.id).await?;
	if permission != Some(Permission::Admin) {
		return Err(CoreError::Forbidden(
			"Only admin contributors may create schema responses".into(),
		));
	}

	let schema_id = registration.registered_schema_id.ok_or_else(|| {
		CoreError::InvalidOperation(format!(
			"registration {} has no registered schema",
			registration.uuid
		))
	})?;

	let pending = schema_response::Entity::find()
		.filter(schema_response::Column::NodeId.eq(registration.id))
		.filter(schema_response::Column::State.ne(ResponseState::Approved.to_string()))
		.one(db)
		.await?;
	if pending.is_some() {
		return Err(CoreError::Conflict(format!(
			"registration {} already has a revision in progress",
			registration.uuid
		)));
	}

	let previous = schema_response::Entity::find()
		.filter(schema_response::Column::NodeId.eq(registration.id))
		.filter(schema_response::Column::State.eq(ResponseState::Approved.to_string()))
		.order_by_desc(schema_response::Column::Id)
		.one(db)
		.await?;

	let txn = db.begin().await?;

	let now = Utc::now();
	let response = schema_response::ActiveModel {
		uuid: Set(Uuid::new_v4()),
		node_id: Set(registration.id),
		schema_id: Set(schema_id),
		initiator_id: Set(actor.id),
		state: Set(ResponseState::InProgress.to_string()),
		revision_justification: Set(justification),
		previous_response_id: Set(previous.as_ref().map(|p| p.id)),
		submitted_at: Set(None),
		created_at: Set(now),
		modified_at: Set(now),
		..Default::default()
	}
	.insert(&txn)
	.await?;

	match &previous {
		// Revising: carry the approved answers forward.
		Some(previous) => {
			let blocks = schema_response_block::Entity::find()
				.filter(schema_response_block::Column::SchemaResponseId.eq(previous.id))
				.all(&txn)
				.await?;
			for block in blocks {
				schema_response_block::ActiveModel {
					schema_response_id: Set(response.id),
					schema_key: Set(block.schema_key),
					response: Set(block.response),
					..Default::default()
				}
				.insert(&txn)
				.await?;
			}
		}
		// Initial response: one empty block per schema key.
		None => {
			let schema = registration_schema::Entity::find_by_id(schema_id)
				.one(&txn)
				.await?
				.ok_or_else(|| CoreError::NotFound(format!("schema {schema_id}")))?;
			for key in schema.block_keys() {
				schema_response_block::ActiveModel {
					schema_response_id: Set(response.id),
					schema_key: Set(key),
					response: Set(None),
					..Default::default()
				}
				.insert(&txn)
				.await?;
			}
		}
	}

	txn.commit().await?;

	Ok(response)
}

/// Move a response to a new lifecycle state.
///
/// `submit` is `in_progress → unapproved`; approval lands on `approved`, or
/// on `pending_moderation` first when the registration's provider moderates.
pub async fn transition(
	db: &DatabaseConnection,
	actor: &user::Model,
	response: &schema_response::Model,
	next: ResponseState,
) -> Result<schema_response::Model, CoreError> {
	let permission = node_permission_for(db, actor.id, response.node_id).await?;
	if permission != Some(Permission::Admin) {
		return Err(CoreError::Forbidden(
			"Only admin contributors may move schema responses between states".into(),
		));
	}

	let current = response.response_state().ok_or_else(|| {
		CoreError::InvalidOperation(format!("response {} has corrupt state", response.uuid))
	})?;

	if !current.can_transition_to(next) {
		return Err(CoreError::InvalidOperation(format!(
			"cannot move schema response from {current} to {next}"
		)));
	}

	let mut active: schema_response::ActiveModel = response.clone().into();
	active.state = Set(next.to_string());
	active.modified_at = Set(Utc::now());
	if next == ResponseState::Unapproved {
		active.submitted_at = Set(Some(Utc::now()));
	}

	Ok(active.update(db).await?)
}

/// Update the answer stored for one block of an in-progress response.
pub async fn update_block(
	db: &DatabaseConnection,
	actor: &user::Model,
	response: &schema_response::Model,
	schema_key: &str,
	value: Option<serde_json::Value>,
) -> Result<schema_response_block::Model, CoreError> {
	let permission = node_permission_for(db, actor.id, response.node_id).await?;
	if !permission.is_some_and(|p| p.satisfies(Permission::Write)) {
		return Err(CoreError::Forbidden(
			"Only write contributors may edit schema responses".into(),
		));
	}

	if response.response_state() != Some(ResponseState::InProgress) {
		return Err(CoreError::InvalidOperation(
			"only in-progress responses can be edited".into(),
		));
	}

	let block = schema_response_block::Entity::find()
		.filter(schema_response_block::Column::SchemaResponseId.eq(response.id))
		.filter(schema_response_block::Column::SchemaKey.eq(schema_key))
		.one(db)
		.await?
		.ok_or_else(|| {
			CoreError::NotFound(format!("schema key {schema_key} on response {}", response.uuid))
		})?;

	let mut active: schema_response_block::ActiveModel = block.into();
	active.response = Set(value);
	Ok(active.update(db).await?)
}

/// Blocks of a response in schema order.
pub async fn response_blocks(
	db: &DatabaseConnection,
	response_id: i32,
) -> Result<Vec<schema_response_block::Model>, CoreError> {
	Ok(schema_response_block::Entity::find()
		.filter(schema_response_block::Column::SchemaResponseId.eq(response_id))
		.order_by_asc(schema_response_block::Column::Id)
		.all(db)
		.await?)
}
