//! Initial database schema
//!
//! This migration creates all the tables for the platform data model:
//! users and institutions, project/registration nodes with contributors and
//! tags, meetings, preprints, schema responses and the osfstorage file tree.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		// Create users table
		manager
			.create_table(
				Table::create()
					.table(Users::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(Users::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(Users::Uuid).uuid().not_null().unique_key())
					.col(ColumnDef::new(Users::FullName).string().not_null())
					.col(ColumnDef::new(Users::Username).string().not_null().unique_key())
					.col(ColumnDef::new(Users::ApiToken).string().unique_key())
					.col(
						ColumnDef::new(Users::IsActive)
							.boolean()
							.not_null()
							.default(true),
					)
					.col(
						ColumnDef::new(Users::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.col(
						ColumnDef::new(Users::ModifiedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.to_owned(),
			)
			.await?;

		// Create institutions table
		manager
			.create_table(
				Table::create()
					.table(Institutions::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(Institutions::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(
						ColumnDef::new(Institutions::Uuid)
							.uuid()
							.not_null()
							.unique_key(),
					)
					.col(ColumnDef::new(Institutions::Name).string().not_null())
					.col(
						ColumnDef::new(Institutions::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.col(
						ColumnDef::new(Institutions::ModifiedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.to_owned(),
			)
			.await?;

		// Create user_institutions join table (user affiliations)
		manager
			.create_table(
				Table::create()
					.table(UserInstitutions::Table)
					.if_not_exists()
					.col(ColumnDef::new(UserInstitutions::UserId).integer().not_null())
					.col(
						ColumnDef::new(UserInstitutions::InstitutionId)
							.integer()
							.not_null(),
					)
					.col(
						ColumnDef::new(UserInstitutions::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.primary_key(
						Index::create()
							.col(UserInstitutions::UserId)
							.col(UserInstitutions::InstitutionId),
					)
					.foreign_key(
						ForeignKey::create()
							.from(UserInstitutions::Table, UserInstitutions::UserId)
							.to(Users::Table, Users::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.foreign_key(
						ForeignKey::create()
							.from(UserInstitutions::Table, UserInstitutions::InstitutionId)
							.to(Institutions::Table, Institutions::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.to_owned(),
			)
			.await?;

		// Create registration_schemas table (lookup table)
		manager
			.create_table(
				Table::create()
					.table(RegistrationSchemas::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(RegistrationSchemas::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(RegistrationSchemas::Name).string().not_null())
					.col(
						ColumnDef::new(RegistrationSchemas::SchemaVersion)
							.integer()
							.not_null()
							.default(1),
					)
					.col(ColumnDef::new(RegistrationSchemas::Blocks).json().not_null())
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_registration_schemas_name_version")
					.table(RegistrationSchemas::Table)
					.col(RegistrationSchemas::Name)
					.col(RegistrationSchemas::SchemaVersion)
					.unique()
					.to_owned(),
			)
			.await?;

		// Create nodes table (projects and registrations)
		manager
			.create_table(
				Table::create()
					.table(Nodes::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(Nodes::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(Nodes::Uuid).uuid().not_null().unique_key())
					.col(ColumnDef::new(Nodes::Title).string().not_null())
					.col(ColumnDef::new(Nodes::Description).text())
					.col(ColumnDef::new(Nodes::Kind).integer().not_null().default(0))
					.col(ColumnDef::new(Nodes::CreatorId).integer().not_null())
					.col(
						ColumnDef::new(Nodes::IsPublic)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(
						ColumnDef::new(Nodes::IsDeleted)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(ColumnDef::new(Nodes::RegisteredSchemaId).integer())
					.col(
						ColumnDef::new(Nodes::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.col(
						ColumnDef::new(Nodes::ModifiedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.foreign_key(
						ForeignKey::create()
							.from(Nodes::Table, Nodes::CreatorId)
							.to(Users::Table, Users::Id)
							.on_delete(ForeignKeyAction::Restrict),
					)
					.foreign_key(
						ForeignKey::create()
							.from(Nodes::Table, Nodes::RegisteredSchemaId)
							.to(RegistrationSchemas::Table, RegistrationSchemas::Id)
							.on_delete(ForeignKeyAction::SetNull),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_nodes_creator_id")
					.table(Nodes::Table)
					.col(Nodes::CreatorId)
					.to_owned(),
			)
			.await?;

		// Create contributors table
		manager
			.create_table(
				Table::create()
					.table(Contributors::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(Contributors::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(Contributors::NodeId).integer().not_null())
					.col(ColumnDef::new(Contributors::UserId).integer().not_null())
					.col(
						ColumnDef::new(Contributors::Read)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(
						ColumnDef::new(Contributors::Write)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(
						ColumnDef::new(Contributors::Admin)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(
						ColumnDef::new(Contributors::Visible)
							.boolean()
							.not_null()
							.default(true),
					)
					.foreign_key(
						ForeignKey::create()
							.from(Contributors::Table, Contributors::NodeId)
							.to(Nodes::Table, Nodes::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.foreign_key(
						ForeignKey::create()
							.from(Contributors::Table, Contributors::UserId)
							.to(Users::Table, Users::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_contributors_node_user")
					.table(Contributors::Table)
					.col(Contributors::NodeId)
					.col(Contributors::UserId)
					.unique()
					.to_owned(),
			)
			.await?;

		// Create tags table
		manager
			.create_table(
				Table::create()
					.table(Tags::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(Tags::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(Tags::Name).string().not_null())
					.col(ColumnDef::new(Tags::System).boolean().not_null().default(false))
					.col(
						ColumnDef::new(Tags::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_tags_name_system")
					.table(Tags::Table)
					.col(Tags::Name)
					.col(Tags::System)
					.unique()
					.to_owned(),
			)
			.await?;

		// Create node_tags join table
		manager
			.create_table(
				Table::create()
					.table(NodeTags::Table)
					.if_not_exists()
					.col(ColumnDef::new(NodeTags::NodeId).integer().not_null())
					.col(ColumnDef::new(NodeTags::TagId).integer().not_null())
					.primary_key(Index::create().col(NodeTags::NodeId).col(NodeTags::TagId))
					.foreign_key(
						ForeignKey::create()
							.from(NodeTags::Table, NodeTags::NodeId)
							.to(Nodes::Table, Nodes::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.foreign_key(
						ForeignKey::create()
							.from(NodeTags::Table, NodeTags::TagId)
							.to(Tags::Table, Tags::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.to_owned(),
			)
			.await?;

		// Create conferences table
		manager
			.create_table(
				Table::create()
					.table(Conferences::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(Conferences::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(
						ColumnDef::new(Conferences::Endpoint)
							.string()
							.not_null()
							.unique_key(),
					)
					.col(ColumnDef::new(Conferences::Name).string().not_null())
					.col(ColumnDef::new(Conferences::Location).string())
					.col(
						ColumnDef::new(Conferences::IsMeeting)
							.boolean()
							.not_null()
							.default(true),
					)
					.col(
						ColumnDef::new(Conferences::Active)
							.boolean()
							.not_null()
							.default(true),
					)
					.col(ColumnDef::new(Conferences::FieldNames).json().not_null())
					.col(
						ColumnDef::new(Conferences::NumSubmissions)
							.integer()
							.not_null()
							.default(0),
					)
					.col(
						ColumnDef::new(Conferences::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.col(
						ColumnDef::new(Conferences::ModifiedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.to_owned(),
			)
			.await?;

		// Create providers table
		manager
			.create_table(
				Table::create()
					.table(Providers::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(Providers::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(Providers::Uuid).uuid().not_null().unique_key())
					.col(ColumnDef::new(Providers::Name).string().not_null())
					.col(ColumnDef::new(Providers::Description).text())
					.col(
						ColumnDef::new(Providers::IsModerated)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(
						ColumnDef::new(Providers::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.col(
						ColumnDef::new(Providers::ModifiedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.to_owned(),
			)
			.await?;

		// Create provider_permissions catalog (seeded by a later migration)
		manager
			.create_table(
				Table::create()
					.table(ProviderPermissions::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(ProviderPermissions::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(
						ColumnDef::new(ProviderPermissions::Codename)
							.string()
							.not_null()
							.unique_key(),
					)
					.col(ColumnDef::new(ProviderPermissions::Name).string().not_null())
					.to_owned(),
			)
			.await?;

		// Create preprints table
		manager
			.create_table(
				Table::create()
					.table(Preprints::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(Preprints::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(Preprints::Uuid).uuid().not_null().unique_key())
					.col(ColumnDef::new(Preprints::Title).string().not_null().default(""))
					.col(ColumnDef::new(Preprints::Description).text())
					.col(ColumnDef::new(Preprints::CreatorId).integer().not_null())
					.col(ColumnDef::new(Preprints::NodeId).integer())
					.col(ColumnDef::new(Preprints::ProviderId).integer().not_null())
					.col(
						ColumnDef::new(Preprints::IsPublic)
							.boolean()
							.not_null()
							.default(true),
					)
					.col(
						ColumnDef::new(Preprints::IsPublished)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(ColumnDef::new(Preprints::DatePublished).timestamp_with_time_zone())
					.col(
						ColumnDef::new(Preprints::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.col(
						ColumnDef::new(Preprints::ModifiedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.foreign_key(
						ForeignKey::create()
							.from(Preprints::Table, Preprints::CreatorId)
							.to(Users::Table, Users::Id)
							.on_delete(ForeignKeyAction::Restrict),
					)
					.foreign_key(
						ForeignKey::create()
							.from(Preprints::Table, Preprints::NodeId)
							.to(Nodes::Table, Nodes::Id)
							.on_delete(ForeignKeyAction::SetNull),
					)
					.foreign_key(
						ForeignKey::create()
							.from(Preprints::Table, Preprints::ProviderId)
							.to(Providers::Table, Providers::Id)
							.on_delete(ForeignKeyAction::Restrict),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_preprints_node_id")
					.table(Preprints::Table)
					.col(Preprints::NodeId)
					.to_owned(),
			)
			.await?;

		// Create preprint_contributors table
		manager
			.create_table(
				Table::create()
					.table(PreprintContributors::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(PreprintContributors::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(
						ColumnDef::new(PreprintContributors::PreprintId)
							.integer()
							.not_null(),
					)
					.col(ColumnDef::new(PreprintContributors::UserId).integer().not_null())
					.col(
						ColumnDef::new(PreprintContributors::Read)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(
						ColumnDef::new(PreprintContributors::Write)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(
						ColumnDef::new(PreprintContributors::Admin)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(
						ColumnDef::new(PreprintContributors::Visible)
							.boolean()
							.not_null()
							.default(true),
					)
					.foreign_key(
						ForeignKey::create()
							.from(PreprintContributors::Table, PreprintContributors::PreprintId)
							.to(Preprints::Table, Preprints::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.foreign_key(
						ForeignKey::create()
							.from(PreprintContributors::Table, PreprintContributors::UserId)
							.to(Users::Table, Users::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_preprint_contributors_preprint_user")
					.table(PreprintContributors::Table)
					.col(PreprintContributors::PreprintId)
					.col(PreprintContributors::UserId)
					.unique()
					.to_owned(),
			)
			.await?;

		// Create preprint_institutions join table
		manager
			.create_table(
				Table::create()
					.table(PreprintInstitutions::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(PreprintInstitutions::PreprintId)
							.integer()
							.not_null(),
					)
					.col(
						ColumnDef::new(PreprintInstitutions::InstitutionId)
							.integer()
							.not_null(),
					)
					.col(
						ColumnDef::new(PreprintInstitutions::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.primary_key(
						Index::create()
							.col(PreprintInstitutions::PreprintId)
							.col(PreprintInstitutions::InstitutionId),
					)
					.foreign_key(
						ForeignKey::create()
							.from(PreprintInstitutions::Table, PreprintInstitutions::PreprintId)
							.to(Preprints::Table, Preprints::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.foreign_key(
						ForeignKey::create()
							.from(
								PreprintInstitutions::Table,
								PreprintInstitutions::InstitutionId,
							)
							.to(Institutions::Table, Institutions::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.to_owned(),
			)
			.await?;

		// Create preprint_logs table
		manager
			.create_table(
				Table::create()
					.table(PreprintLogs::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(PreprintLogs::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(PreprintLogs::PreprintId).integer().not_null())
					.col(ColumnDef::new(PreprintLogs::UserId).integer().not_null())
					.col(ColumnDef::new(PreprintLogs::Action).string().not_null())
					.col(ColumnDef::new(PreprintLogs::Params).json().not_null())
					.col(
						ColumnDef::new(PreprintLogs::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.foreign_key(
						ForeignKey::create()
							.from(PreprintLogs::Table, PreprintLogs::PreprintId)
							.to(Preprints::Table, Preprints::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.foreign_key(
						ForeignKey::create()
							.from(PreprintLogs::Table, PreprintLogs::UserId)
							.to(Users::Table, Users::Id)
							.on_delete(ForeignKeyAction::Restrict),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_preprint_logs_preprint_id")
					.table(PreprintLogs::Table)
					.col(PreprintLogs::PreprintId)
					.to_owned(),
			)
			.await?;

		// Create schema_responses table
		manager
			.create_table(
				Table::create()
					.table(SchemaResponses::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(SchemaResponses::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(
						ColumnDef::new(SchemaResponses::Uuid)
							.uuid()
							.not_null()
							.unique_key(),
					)
					.col(ColumnDef::new(SchemaResponses::NodeId).integer().not_null())
					.col(ColumnDef::new(SchemaResponses::SchemaId).integer().not_null())
					.col(ColumnDef::new(SchemaResponses::InitiatorId).integer().not_null())
					.col(
						ColumnDef::new(SchemaResponses::State)
							.string()
							.not_null()
							.default("in_progress"),
					)
					.col(ColumnDef::new(SchemaResponses::RevisionJustification).text())
					.col(ColumnDef::new(SchemaResponses::PreviousResponseId).integer())
					.col(ColumnDef::new(SchemaResponses::SubmittedAt).timestamp_with_time_zone())
					.col(
						ColumnDef::new(SchemaResponses::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.col(
						ColumnDef::new(SchemaResponses::ModifiedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.foreign_key(
						ForeignKey::create()
							.from(SchemaResponses::Table, SchemaResponses::NodeId)
							.to(Nodes::Table, Nodes::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.foreign_key(
						ForeignKey::create()
							.from(SchemaResponses::Table, SchemaResponses::SchemaId)
							.to(RegistrationSchemas::Table, RegistrationSchemas::Id)
							.on_delete(ForeignKeyAction::Restrict),
					)
					.foreign_key(
						ForeignKey::create()
							.from(SchemaResponses::Table, SchemaResponses::InitiatorId)
							.to(Users::Table, Users::Id)
							.on_delete(ForeignKeyAction::Restrict),
					)
					.foreign_key(
						ForeignKey::create()
							.from(SchemaResponses::Table, SchemaResponses::PreviousResponseId)
							.to(SchemaResponses::Table, SchemaResponses::Id)
							.on_delete(ForeignKeyAction::SetNull),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_schema_responses_node_id")
					.table(SchemaResponses::Table)
					.col(SchemaResponses::NodeId)
					.to_owned(),
			)
			.await?;

		// Create schema_response_blocks table
		manager
			.create_table(
				Table::create()
					.table(SchemaResponseBlocks::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(SchemaResponseBlocks::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(
						ColumnDef::new(SchemaResponseBlocks::SchemaResponseId)
							.integer()
							.not_null(),
					)
					.col(
						ColumnDef::new(SchemaResponseBlocks::SchemaKey)
							.string()
							.not_null(),
					)
					.col(ColumnDef::new(SchemaResponseBlocks::Response).json())
					.foreign_key(
						ForeignKey::create()
							.from(
								SchemaResponseBlocks::Table,
								SchemaResponseBlocks::SchemaResponseId,
							)
							.to(SchemaResponses::Table, SchemaResponses::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_schema_response_blocks_response_key")
					.table(SchemaResponseBlocks::Table)
					.col(SchemaResponseBlocks::SchemaResponseId)
					.col(SchemaResponseBlocks::SchemaKey)
					.unique()
					.to_owned(),
			)
			.await?;

		// Create file_nodes table (osfstorage tree)
		manager
			.create_table(
				Table::create()
					.table(FileNodes::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(FileNodes::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(FileNodes::Uuid).uuid().not_null().unique_key())
					.col(ColumnDef::new(FileNodes::NodeId).integer().not_null())
					.col(ColumnDef::new(FileNodes::ParentId).integer())
					.col(ColumnDef::new(FileNodes::Kind).integer().not_null().default(0))
					.col(ColumnDef::new(FileNodes::Name).string().not_null())
					.col(
						ColumnDef::new(FileNodes::IsRoot)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(
						ColumnDef::new(FileNodes::IsDeleted)
							.boolean()
							.not_null()
							.default(false),
					)
					.col(
						ColumnDef::new(FileNodes::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.col(
						ColumnDef::new(FileNodes::ModifiedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.foreign_key(
						ForeignKey::create()
							.from(FileNodes::Table, FileNodes::NodeId)
							.to(Nodes::Table, Nodes::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.foreign_key(
						ForeignKey::create()
							.from(FileNodes::Table, FileNodes::ParentId)
							.to(FileNodes::Table, FileNodes::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_file_nodes_node_id")
					.table(FileNodes::Table)
					.col(FileNodes::NodeId)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_file_nodes_parent_id")
					.table(FileNodes::Table)
					.col(FileNodes::ParentId)
					.to_owned(),
			)
			.await?;

		// Create file_versions table
		manager
			.create_table(
				Table::create()
					.table(FileVersions::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(FileVersions::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(
						ColumnDef::new(FileVersions::Uuid)
							.uuid()
							.not_null()
							.unique_key(),
					)
					.col(ColumnDef::new(FileVersions::FileId).integer().not_null())
					.col(ColumnDef::new(FileVersions::CreatorId).integer().not_null())
					.col(ColumnDef::new(FileVersions::Identifier).integer().not_null())
					.col(ColumnDef::new(FileVersions::Location).json().not_null())
					.col(ColumnDef::new(FileVersions::Metadata).json().not_null())
					.col(
						ColumnDef::new(FileVersions::Size)
							.big_integer()
							.not_null()
							.default(0),
					)
					.col(ColumnDef::new(FileVersions::ContentHash).string())
					.col(
						ColumnDef::new(FileVersions::DownloadCount)
							.big_integer()
							.not_null()
							.default(0),
					)
					.col(
						ColumnDef::new(FileVersions::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.foreign_key(
						ForeignKey::create()
							.from(FileVersions::Table, FileVersions::FileId)
							.to(FileNodes::Table, FileNodes::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.foreign_key(
						ForeignKey::create()
							.from(FileVersions::Table, FileVersions::CreatorId)
							.to(Users::Table, Users::Id)
							.on_delete(ForeignKeyAction::Restrict),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_file_versions_file_identifier")
					.table(FileVersions::Table)
					.col(FileVersions::FileId)
					.col(FileVersions::Identifier)
					.unique()
					.to_owned(),
			)
			.await?;

		// Create node_logs table
		manager
			.create_table(
				Table::create()
					.table(NodeLogs::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(NodeLogs::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(NodeLogs::NodeId).integer().not_null())
					.col(ColumnDef::new(NodeLogs::UserId).integer().not_null())
					.col(ColumnDef::new(NodeLogs::Action).string().not_null())
					.col(ColumnDef::new(NodeLogs::Params).json().not_null())
					.col(
						ColumnDef::new(NodeLogs::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.foreign_key(
						ForeignKey::create()
							.from(NodeLogs::Table, NodeLogs::NodeId)
							.to(Nodes::Table, Nodes::Id)
							.on_delete(ForeignKeyAction::Cascade),
					)
					.foreign_key(
						ForeignKey::create()
							.from(NodeLogs::Table, NodeLogs::UserId)
							.to(Users::Table, Users::Id)
							.on_delete(ForeignKeyAction::Restrict),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_node_logs_node_id")
					.table(NodeLogs::Table)
					.col(NodeLogs::NodeId)
					.to_owned(),
			)
			.await?;

		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		// Drop in reverse dependency order
		manager
			.drop_table(Table::drop().table(NodeLogs::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(FileVersions::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(FileNodes::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(SchemaResponseBlocks::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(SchemaResponses::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(PreprintLogs::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(PreprintInstitutions::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(PreprintContributors::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(Preprints::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(ProviderPermissions::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(Providers::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(Conferences::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(NodeTags::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(Tags::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(Contributors::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(Nodes::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(RegistrationSchemas::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(UserInstitutions::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(Institutions::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(Users::Table).to_owned())
			.await?;

		Ok(())
	}
}

#[derive(DeriveIden)]
enum Users {
	Table,
	Id,
	Uuid,
	FullName,
	Username,
	ApiToken,
	IsActive,
	CreatedAt,
	ModifiedAt,
}

#[derive(DeriveIden)]
enum Institutions {
	Table,
	Id,
	Uuid,
	Name,
	CreatedAt,
	ModifiedAt,
}

#[derive(DeriveIden)]
enum UserInstitutions {
	Table,
	UserId,
	InstitutionId,
	CreatedAt,
}

#[derive(DeriveIden)]
enum Nodes {
	Table,
	Id,
	Uuid,
	Title,
	Description,
	Kind,
	CreatorId,
	IsPublic,
	IsDeleted,
	RegisteredSchemaId,
	CreatedAt,
	ModifiedAt,
}

#[derive(DeriveIden)]
enum Contributors {
	Table,
	Id,
	NodeId,
	UserId,
	Read,
	Write,
	Admin,
	Visible,
}

#[derive(DeriveIden)]
enum Tags {
	Table,
	Id,
	Name,
	System,
	CreatedAt,
}

#[derive(DeriveIden)]
enum NodeTags {
	Table,
	NodeId,
	TagId,
}

#[derive(DeriveIden)]
enum Conferences {
	Table,
	Id,
	Endpoint,
	Name,
	Location,
	IsMeeting,
	Active,
	FieldNames,
	NumSubmissions,
	CreatedAt,
	ModifiedAt,
}

#[derive(DeriveIden)]
enum Providers {
	Table,
	Id,
	Uuid,
	Name,
	Description,
	IsModerated,
	CreatedAt,
	ModifiedAt,
}

#[derive(DeriveIden)]
enum ProviderPermissions {
	Table,
	Id,
	Codename,
	Name,
}

#[derive(DeriveIden)]
enum Preprints {
	Table,
	Id,
	Uuid,
	Title,
	Description,
	CreatorId,
	NodeId,
	ProviderId,
	IsPublic,
	IsPublished,
	DatePublished,
	CreatedAt,
	ModifiedAt,
}

#[derive(DeriveIden)]
enum PreprintContributors {
	Table,
	Id,
	PreprintId,
	UserId,
	Read,
	Write,
	Admin,
	Visible,
}

#[derive(DeriveIden)]
enum PreprintInstitutions {
	Table,
	PreprintId,
	InstitutionId,
	CreatedAt,
}

#[derive(DeriveIden)]
enum PreprintLogs {
	Table,
	Id,
	PreprintId,
	UserId,
	Action,
	Params,
	CreatedAt,
}

#[derive(DeriveIden)]
enum RegistrationSchemas {
	Table,
	Id,
	Name,
	SchemaVersion,
	Blocks,
}

#[derive(DeriveIden)]
enum SchemaResponses {
	Table,
	Id,
	Uuid,
	NodeId,
	SchemaId,
	InitiatorId,
	State,
	RevisionJustification,
	PreviousResponseId,
	SubmittedAt,
	CreatedAt,
	ModifiedAt,
}

#[derive(DeriveIden)]
enum SchemaResponseBlocks {
	Table,
	Id,
	SchemaResponseId,
	SchemaKey,
	Response,
}

#[derive(DeriveIden)]
enum FileNodes {
	Table,
	Id,
	Uuid,
	NodeId,
	ParentId,
	Kind,
	Name,
	IsRoot,
	IsDeleted,
	CreatedAt,
	ModifiedAt,
}

#[derive(DeriveIden)]
enum FileVersions {
	Table,
	Id,
	Uuid,
	FileId,
	CreatorId,
	Identifier,
	Location,
	Metadata,
	Size,
	ContentHash,
	DownloadCount,
	CreatedAt,
}

#[derive(DeriveIden)]
enum NodeLogs {
	Table,
	Id,
	NodeId,
	UserId,
	Action,
	Params,
	CreatedAt,
}
