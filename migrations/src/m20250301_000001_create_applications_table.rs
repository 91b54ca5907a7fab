use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub enum Applications {
	Table,
	Internal,
	Name,
	Email,
	CitizenshipNumber,
	Ethnicity,
	University,
	Program,
	PaymentMethod,
	PaymentStatus,
	SeeCertificate,
	PlusTwoCertificate,
	CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.create_table(
				Table::create()
					.table(Applications::Table)
					.comment("scholarship applications, each referencing its two stored certificates")
					.col(
						ColumnDef::new(Applications::Internal)
							.big_integer()
							.not_null()
							.primary_key()
							.auto_increment()
					)
					.col(ColumnDef::new(Applications::Name).string().not_null())
					.col(ColumnDef::new(Applications::Email).string().not_null())
					.col(ColumnDef::new(Applications::CitizenshipNumber).string().not_null())
					.col(ColumnDef::new(Applications::Ethnicity).string().not_null())
					.col(ColumnDef::new(Applications::University).string().not_null())
					.col(ColumnDef::new(Applications::Program).string().not_null())
					.col(ColumnDef::new(Applications::PaymentMethod).string().not_null())
					.col(ColumnDef::new(Applications::PaymentStatus).string().not_null().default("pending"))
					.col(ColumnDef::new(Applications::SeeCertificate).string().not_null())
					.col(ColumnDef::new(Applications::PlusTwoCertificate).string().not_null())
					.col(ColumnDef::new(Applications::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
					.to_owned()
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("index-applications-created-at")
					.table(Applications::Table)
					.col((Applications::CreatedAt, IndexOrder::Desc))
					.to_owned()
			)
			.await?;

		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.drop_table(Table::drop().table(Applications::Table).to_owned())
			.await?;

		Ok(())
	}
}
