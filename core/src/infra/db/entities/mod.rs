//! SeaORM entities for the platform data model

pub mod conference;
pub mod contributor;
pub mod file_node;
pub mod file_version;
pub mod institution;
pub mod node;
pub mod node_log;
pub mod node_tag;
pub mod preprint;
pub mod preprint_contributor;
pub mod preprint_institution;
pub mod preprint_log;
pub mod provider;
pub mod provider_permission;
pub mod registration_schema;
pub mod schema_response;
pub mod schema_response_block;
pub mod tag;
pub mod user;
pub mod user_institution;
