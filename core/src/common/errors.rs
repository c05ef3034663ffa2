//! Unified error handling for the core

use thiserror::Error;

use crate::service::storage::StorageError;

/// Main error type for core operations
#[derive(Error, Debug)]
pub enum CoreError {
	#[error("Database error: {0}")]
	Database(#[from] sea_orm::DbErr),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Gone: {0}")]
	Gone(String),

	#[error("Unauthorized")]
	Unauthorized,

	#[error("{0}")]
	Forbidden(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Invalid operation: {0}")]
	InvalidOperation(String),

	#[error("Other error: {0}")]
	Other(#[from] anyhow::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
