//! Expand the provider permission catalog
//!
//! Providers gained a read-only detail permission so institutional staff can
//! inspect provider settings without moderation rights.

use sea_orm_migration::prelude::*;

const CODENAME: &str = "view_preprintprovider";
const NAME: &str = "Can view preprint provider details";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.exec_stmt(
				Query::insert()
					.into_table(ProviderPermissions::Table)
					.columns([ProviderPermissions::Codename, ProviderPermissions::Name])
					.values_panic([CODENAME.into(), NAME.into()])
					.on_conflict(
						OnConflict::column(ProviderPermissions::Codename)
							.do_nothing()
							.to_owned(),
					)
					.to_owned(),
			)
			.await?;

		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.exec_stmt(
				Query::delete()
					.from_table(ProviderPermissions::Table)
					.cond_where(Expr::col(ProviderPermissions::Codename).eq(CODENAME))
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
