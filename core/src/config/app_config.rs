//! Application configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::common::errors::CoreError;

const CONFIG_FILE: &str = "osf.json";
const DATABASE_FILE: &str = "osf.db";

/// Main application configuration, persisted as JSON in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
	/// Config schema version
	pub version: u32,

	/// Logging level
	pub log_level: String,

	/// Shared secret used to validate storage-worker webhook signatures
	pub webhook_secret: String,

	/// Name the API advertises for itself
	#[serde(default = "default_platform_name")]
	pub platform_name: String,
}

fn default_platform_name() -> String {
	"Open Science Platform".to_string()
}

impl AppConfig {
	const TARGET_VERSION: u32 = 1;

	/// Load configuration from the data directory, creating a default config
	/// on first run.
	pub fn load_or_create(data_dir: &Path) -> Result<Self, CoreError> {
		let config_path = data_dir.join(CONFIG_FILE);

		if config_path.exists() {
			info!("Loading config from {:?}", config_path);
			let json = fs::read_to_string(&config_path)?;
			let config: AppConfig = serde_json::from_str(&json)
				.map_err(|e| CoreError::InvalidOperation(format!("invalid config file: {e}")))?;

			if config.version > Self::TARGET_VERSION {
				return Err(CoreError::InvalidOperation(format!(
					"config version {} is newer than supported version {}",
					config.version,
					Self::TARGET_VERSION
				)));
			}

			Ok(config)
		} else {
			warn!("No config found, creating default at {:?}", config_path);
			let config = Self::default_config();
			config.save_to(data_dir)?;
			Ok(config)
		}
	}

	fn default_config() -> Self {
		Self {
			version: Self::TARGET_VERSION,
			log_level: "info".to_string(),
			// Placeholder credential; deployments override it in osf.json
			webhook_secret: uuid::Uuid::new_v4().to_string(),
			platform_name: default_platform_name(),
		}
	}

	/// Save configuration to disk
	pub fn save_to(&self, data_dir: &Path) -> Result<(), CoreError> {
		fs::create_dir_all(data_dir)?;

		let config_path = data_dir.join(CONFIG_FILE);
		let json = serde_json::to_string_pretty(self)
			.map_err(|e| CoreError::InvalidOperation(format!("serialize config: {e}")))?;
		fs::write(&config_path, json)?;
		info!("Saved config to {:?}", config_path);
		Ok(())
	}

	/// Path of the sqlite database inside the data directory
	pub fn database_path(&self, data_dir: &Path) -> PathBuf {
		data_dir.join(DATABASE_FILE)
	}

	/// Path of the logs directory inside the data directory
	pub fn logs_dir(&self, data_dir: &Path) -> PathBuf {
		data_dir.join("logs")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[test]
	fn creates_default_config_on_first_load() {
		let dir = TempDir::new().unwrap();
		let config = AppConfig::load_or_create(dir.path()).unwrap();
		assert_eq!(config.version, AppConfig::TARGET_VERSION);
		assert!(dir.path().join(CONFIG_FILE).exists());

		// Second load round-trips the persisted file, secret included.
		let reloaded = AppConfig::load_or_create(dir.path()).unwrap();
		assert_eq!(reloaded.webhook_secret, config.webhook_secret);
	}
}
