//! Seed the provider permission catalog
//!
//! Inserts the moderation permission codenames providers are governed by.

use sea_orm_migration::prelude::*;

const PERMISSIONS: &[(&str, &str)] = &[
	("view_submissions", "Can view all submissions to this provider"),
	(
		"add_moderator",
		"Can add other users as moderators for this provider",
	),
	("update_moderator", "Can elevate or lower other moderators/admins"),
	(
		"view_actions",
		"Can view actions on submissions to this provider",
	),
	(
		"add_reviewer",
		"Can add other users as reviewers for this provider",
	),
	(
		"review_assigned_submissions",
		"Can submit reviews for submissions to this provider which have been assigned to this user",
	),
	(
		"assign_reviewer",
		"Can assign reviewers to review specific submissions to this provider",
	),
	(
		"remove_moderator",
		"Can remove moderators from this provider. Implicitly granted to self",
	),
	("set_up_moderation", "Can set up moderation for this provider"),
	(
		"view_assigned_submissions",
		"Can view submissions to this provider which have been assigned to this user",
	),
	(
		"edit_reviews_settings",
		"Can edit reviews settings for this provider",
	),
	("accept_submissions", "Can accept submissions to this provider"),
	("reject_submissions", "Can reject submissions to this provider"),
	(
		"edit_review_comments",
		"Can edit comments on actions for this provider",
	),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		let mut insert = Query::insert()
			.into_table(ProviderPermissions::Table)
			.columns([ProviderPermissions::Codename, ProviderPermissions::Name])
			.to_owned();

		for (codename, name) in PERMISSIONS {
			insert.values_panic([(*codename).into(), (*name).into()]);
		}

		manager.exec_stmt(insert).await?;

		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.exec_stmt(
				Query::delete()
					.from_table(ProviderPermissions::Table)
					.cond_where(
						Expr::col(ProviderPermissions::Codename)
							.is_in(PERMISSIONS.iter().map(|(codename, _)| *codename)),
					)
					.to_owned(),
			)
			.await?;

		Ok(())
	}
}

#[derive(DeriveIden)]
enum ProviderPermissions {
	Table,
	Codename,
	Name,
}
