use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 leads 表
        manager
            .create_table(
                Table::create()
                    .table(Lead::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lead::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Lead::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Lead::FirstName).string().null())
                    .col(ColumnDef::new(Lead::ZipCode).string().null())
                    .col(ColumnDef::new(Lead::DateOfBirth).date().null())
                    .col(
                        ColumnDef::new(Lead::VerificationToken)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Lead::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Lead::CouponCode).string().not_null())
                    .col(
                        ColumnDef::new(Lead::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 验证回调按 token 查找，建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_leads_verification_token")
                    .table(Lead::Table)
                    .col(Lead::VerificationToken)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_leads_created_at")
                    .table(Lead::Table)
                    .col(Lead::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_leads_created_at").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_leads_verification_token")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Lead::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Lead {
    #[sea_orm(iden = "leads")]
    Table,
    Id,
    Email,
    FirstName,
    ZipCode,
    DateOfBirth,
    VerificationToken,
    IsVerified,
    CouponCode,
    CreatedAt,
}
