use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========================================
        // DOMAINS TABLE
        // ========================================
        manager
            .create_table(
                Table::create()
                    .table(Domains::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Domains::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Domains::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Domains::Master).string_len(128).null())
                    .col(ColumnDef::new(Domains::LastCheck).integer().null())
                    .col(ColumnDef::new(Domains::Type).string_len(8).not_null())
                    .col(ColumnDef::new(Domains::NotifiedSerial).big_integer().null())
                    .col(ColumnDef::new(Domains::Account).string_len(40).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("name_index")
                    .table(Domains::Table)
                    .col(Domains::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ========================================
        // RECORDS TABLE
        // ========================================
        manager
            .create_table(
                Table::create()
                    .table(Records::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Records::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Records::DomainId).integer().null())
                    .col(ColumnDef::new(Records::Name).string_len(255).null())
                    .col(ColumnDef::new(Records::Type).string_len(10).null())
                    .col(ColumnDef::new(Records::Content).text().null())
                    .col(ColumnDef::new(Records::Ttl).integer().null())
                    .col(ColumnDef::new(Records::Prio).integer().null())
                    .col(
                        ColumnDef::new(Records::Disabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Records::Ordername).string_len(255).null())
                    .col(
                        ColumnDef::new(Records::Auth)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups PowerDNS performs on every query
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("nametype_index")
                    .table(Records::Table)
                    .col(Records::Name)
                    .col(Records::Type)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("domain_id")
                    .table(Records::Table)
                    .col(Records::DomainId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Indexes go with their tables
        manager
            .drop_table(Table::drop().table(Records::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Domains::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Domains {
    Table,
    Id,
    Name,
    Master,
    LastCheck,
    Type,
    NotifiedSerial,
    Account,
}

#[derive(DeriveIden)]
enum Records {
    Table,
    Id,
    DomainId,
    Name,
    Type,
    Content,
    Ttl,
    Prio,
    Disabled,
    Ordername,
    Auth,
}
