//! osf-core
//!
//! Core library for the open science platform: relational data model and
//! migrations, meeting/preprint/schema-response services, and the osfstorage
//! file tree that backs the storage-worker webhook hooks.

use std::path::Path;
use std::sync::Arc;

use crate::common::errors::CoreError;
use crate::config::AppConfig;
use crate::infra::db::Db;

pub mod common;
pub mod config;
pub mod domain;
pub mod infra;
pub mod service;
pub mod webhook;

/// Shared application core: configuration plus an open, migrated database.
#[derive(Clone)]
pub struct Core {
	pub config: Arc<AppConfig>,
	pub db: Arc<Db>,
}

impl Core {
	/// Open (or create) the data directory, load configuration and bring the
	/// database up to the latest migration.
	pub async fn new(data_dir: impl AsRef<Path>) -> Result<Self, CoreError> {
		let data_dir = data_dir.as_ref();
		tokio::fs::create_dir_all(data_dir).await?;

		let config = AppConfig::load_or_create(data_dir)?;
		let db = Db::open(&config.database_path(data_dir)).await?;

		Ok(Self {
			config: Arc::new(config),
			db: Arc::new(db),
		})
	}

	pub fn conn(&self) -> &sea_orm::DatabaseConnection {
		self.db.conn()
	}
}
