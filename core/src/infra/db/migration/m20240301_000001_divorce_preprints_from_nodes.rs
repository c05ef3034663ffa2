//! Decouple preprints from their supplemental nodes
//!
//! One-time data migration. Preprints used to borrow title, description,
//! creator and contributors from the project node they were filed under.
//! This copies those fields onto the preprint rows and materializes
//! preprint contributors from the node contributor set, so a preprint no
//! longer needs a node at all.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		let conn = manager.get_connection();

		// Copy node fields onto preprints that still point at a node.
		conn.execute_unprepared(
			r#"
			UPDATE preprints
			SET title = (SELECT nodes.title FROM nodes WHERE nodes.id = preprints.node_id),
				description = (SELECT nodes.description FROM nodes WHERE nodes.id = preprints.node_id),
				creator_id = (SELECT nodes.creator_id FROM nodes WHERE nodes.id = preprints.node_id)
			WHERE preprints.node_id IS NOT NULL
			"#,
		)
		.await?;

		// Materialize preprint contributor rows from the node contributor
		// set, keeping the same permission flags and visibility. Rows that
		// already exist (partial re-run) are left untouched.
		conn.execute_unprepared(
			r#"
			INSERT INTO preprint_contributors (preprint_id, user_id, read, write, admin, visible)
			SELECT p.id, c.user_id, c.read, c.write, c.admin, c.visible
			FROM preprints p
			JOIN contributors c ON c.node_id = p.node_id
			WHERE p.node_id IS NOT NULL
				AND NOT EXISTS (
					SELECT 1 FROM preprint_contributors pc
					WHERE pc.preprint_id = p.id AND pc.user_id = c.user_id
				)
			"#,
		)
		.await?;

		Ok(())
	}

	async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
		// Irreversible data migration: the copied fields and contributor rows
		// are indistinguishable from ones created after the divorce.
		Ok(())
	}
}
