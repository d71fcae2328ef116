use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inquiry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inquiry::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inquiry::Name).string().not_null())
                    .col(ColumnDef::new(Inquiry::Email).string().not_null())
                    .col(ColumnDef::new(Inquiry::InquiryType).string().not_null())
                    .col(ColumnDef::new(Inquiry::Message).text().not_null())
                    .col(
                        ColumnDef::new(Inquiry::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_inquiries_email")
                    .table(Inquiry::Table)
                    .col(Inquiry::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_inquiries_email").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Inquiry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Inquiry {
    #[sea_orm(iden = "inquiries")]
    Table,
    Id,
    Name,
    Email,
    InquiryType,
    Message,
    CreatedAt,
}
