//! Preprint permissions and institutional affiliations

use chrono::Utc;
use sea_orm::{
	ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
	EntityTrait, ModelTrait, QueryFilter, TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

use crate::common::errors::CoreError;
use crate::domain::{LogAction, Permission};
use crate::infra::db::entities::{
	institution, preprint, preprint_contributor, preprint_institution, preprint_log,
	user, user_institution,
};

/// Look up a preprint by its external id.
pub async fn get_preprint(
	db: &DatabaseConnection,
	uuid: Uuid,
) -> Result<preprint::Model, CoreError> {
	preprint::Entity::find()
		.filter(preprint::Column::Uuid.eq(uuid))
		.one(db)
		.await?
		.ok_or_else(|| CoreError::NotFound(format!("preprint {uuid}")))
}

/// Permission tier the user holds on the preprint, if any.
pub async fn permission_for(
	db: &DatabaseConnection,
	user_id: i32,
	preprint_id: i32,
) -> Result<Option<Permission>, CoreError> {
	let contributor = preprint_contributor::Entity::find()
		.filter(preprint_contributor::Column::PreprintId.eq(preprint_id))
		.filter(preprint_contributor::Column::UserId.eq(user_id))
		.one(db)
		.await?;

	Ok(contributor.and_then(|c| c.permission()))
}

/// Gate read access to a preprint: public preprints are open, private ones
/// need a contributor row of any tier.
pub async fn ensure_can_view(
	db: &DatabaseConnection,
	preprint: &preprint::Model,
	viewer: Option<&user::Model>,
) -> Result<(), CoreError> {
	if preprint.is_public {
		return Ok(());
	}

	let viewer = viewer.ok_or(CoreError::Unauthorized)?;

	match permission_for(db, viewer.id, preprint.id).await? {
		Some(_) => Ok(()),
		None => Err(CoreError::Forbidden(
			"You do not have permission to view this preprint".into(),
		)),
	}
}

/// Institutions currently affiliated with the preprint.
pub async fn affiliated_institutions(
	db: &DatabaseConnection,
	preprint: &preprint::Model,
) -> Result<Vec<institution::Model>, CoreError> {
	Ok(preprint.find_related(institution::Entity).all(db).await?)
}

/// Institutions the user is personally affiliated with.
async fn user_institution_ids(
	db: &impl ConnectionTrait,
	user_id: i32,
) -> Result<Vec<i32>, CoreError> {
	Ok(user_institution::Entity::find()
		.filter(user_institution::Column::UserId.eq(user_id))
		.all(db)
		.await?
		.into_iter()
		.map(|ui| ui.institution_id)
		.collect())
}

/// Replace the preprint's affiliated-institution set (PUT semantics).
///
/// Only admin contributors may touch affiliations. Every institution being
/// added must be one the actor personally belongs to; removals carry no such
/// requirement so an admin who changed employers can still clean up. Each
/// change is recorded in the preprint log.
pub async fn update_affiliations(
	db: &DatabaseConnection,
	preprint: &preprint::Model,
	actor: &user::Model,
	new_set: &[Uuid],
) -> Result<Vec<institution::Model>, CoreError> {
	let permission = permission_for(db, actor.id, preprint.id).await?;
	if permission != Some(Permission::Admin) {
		return Err(CoreError::Forbidden(
			"Only admin contributors may update institutional affiliations".into(),
		));
	}

	let mut wanted = Vec::with_capacity(new_set.len());
	for uuid in new_set {
		let inst = institution::Entity::find()
			.filter(institution::Column::Uuid.eq(*uuid))
			.one(db)
			.await?
			.ok_or_else(|| CoreError::NotFound(format!("institution {uuid}")))?;
		wanted.push(inst);
	}

	let current = affiliated_institutions(db, preprint).await?;
	let actor_institutions = user_institution_ids(db, actor.id).await?;

	let to_add: Vec<&institution::Model> = wanted
		.iter()
		.filter(|inst| !current.iter().any(|c| c.id == inst.id))
		.collect();
	let to_remove: Vec<&institution::Model> = current
		.iter()
		.filter(|inst| !wanted.iter().any(|w| w.id == inst.id))
		.collect();

	for inst in &to_add {
		if !actor_institutions.contains(&inst.id) {
			return Err(CoreError::Forbidden(format!(
				"User needs to be affiliated with {}",
				inst.name
			)));
		}
	}

	let txn = db.begin().await?;

	for inst in &to_add {
		// Composite-key join row; skip the post-insert fetch.
		preprint_institution::Entity::insert(preprint_institution::ActiveModel {
			preprint_id: Set(preprint.id),
			institution_id: Set(inst.id),
			created_at: Set(Utc::now()),
		})
		.exec_without_returning(&txn)
		.await?;

		log_affiliation_change(&txn, preprint, actor, inst, LogAction::AffiliatedInstitutionAdded)
			.await?;
	}

	for inst in &to_remove {
		preprint_institution::Entity::delete_many()
			.filter(preprint_institution::Column::PreprintId.eq(preprint.id))
			.filter(preprint_institution::Column::InstitutionId.eq(inst.id))
			.exec(&txn)
			.await?;

		log_affiliation_change(
			&txn,
			preprint,
			actor,
			inst,
			LogAction::AffiliatedInstitutionRemoved,
		)
		.await?;
	}

	txn.commit().await?;

	affiliated_institutions(db, preprint).await
}

async fn log_affiliation_change(
	db: &impl ConnectionTrait,
	preprint: &preprint::Model,
	actor: &user::Model,
	inst: &institution::Model,
	action: LogAction,
) -> Result<(), CoreError> {
	preprint_log::ActiveModel {
		preprint_id: Set(preprint.id),
		user_id: Set(actor.id),
		action: Set(action.to_string()),
		params: Set(json!({
			"preprint": preprint.uuid,
			"institution": {
				"id": inst.uuid,
				"name": inst.name,
			},
		})),
		created_at: Set(Utc::now()),
		..Default::default()
	}
	.insert(db)
	.await?;

	Ok(())
}

/// Most recent log entry for a preprint, if any.
pub async fn latest_log(
	db: &DatabaseConnection,
	preprint_id: i32,
) -> Result<Option<preprint_log::Model>, CoreError> {
	use sea_orm::QueryOrder;

	Ok(preprint_log::Entity::find()
		.filter(preprint_log::Column::PreprintId.eq(preprint_id))
		.order_by_desc(preprint_log::Column::Id)
		.one(db)
		.await?)
}
