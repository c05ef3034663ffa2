//! Database migrations

use sea_orm_migration::prelude::*;

mod m20240101_000001_initial_schema;
mod m20240102_000001_seed_provider_permissions;
mod m20240215_000001_expand_provider_permissions;
mod m20240301_000001_divorce_preprints_from_nodes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
	fn migrations() -> Vec<Box<dyn MigrationTrait>> {
		vec![
			Box::new(m20240101_000001_initial_schema::Migration),
			Box::new(m20240102_000001_seed_provider_permissions::Migration),
			Box::new(m20240215_000001_expand_provider_permissions::Migration),
			Box::new(m20240301_000001_divorce_preprints_from_nodes::Migration),
		]
	}
}
