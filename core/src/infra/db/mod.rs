//! Database access
//!
//! Opens the sqlite database and keeps it migrated to the latest schema.

use std::path::Path;

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::common::errors::CoreError;

pub mod entities;
pub mod migration;

pub use migration::Migrator;

/// Handle on the open database connection.
pub struct Db {
	conn: DatabaseConnection,
}

impl Db {
	/// Open the database at the given path, creating it if missing, and run
	/// any pending migrations.
	pub async fn open(path: &Path) -> Result<Self, CoreError> {
		let database_url = format!("sqlite://{}?mode=rwc", path.display());
		Self::connect(&database_url).await
	}

	/// Connect to an arbitrary database URL and run pending migrations.
	/// Tests use this with tempdir-backed sqlite files.
	pub async fn connect(database_url: &str) -> Result<Self, CoreError> {
		let conn = Database::connect(database_url).await?;
		Migrator::up(&conn, None).await?;
		info!("Database ready at {database_url}");
		Ok(Self { conn })
	}

	pub fn conn(&self) -> &DatabaseConnection {
		&self.conn
	}
}
