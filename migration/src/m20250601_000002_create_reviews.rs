use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Review::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Review::ProductSlug).string().not_null())
                    .col(ColumnDef::new(Review::AuthorName).string().not_null())
                    .col(ColumnDef::new(Review::Rating).integer().not_null())
                    .col(ColumnDef::new(Review::ReviewText).text().not_null())
                    .col(
                        ColumnDef::new(Review::Status)
                            .string()
                            .not_null()
                            .default("Approved"),
                    )
                    .col(
                        ColumnDef::new(Review::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 公开读按 (product_slug, status) 过滤并按时间倒序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reviews_product_status")
                    .table(Review::Table)
                    .col(Review::ProductSlug)
                    .col(Review::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reviews_created_at")
                    .table(Review::Table)
                    .col(Review::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_reviews_created_at").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_reviews_product_status").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Review {
    #[sea_orm(iden = "reviews")]
    Table,
    Id,
    ProductSlug,
    AuthorName,
    Rating,
    ReviewText,
    Status,
    CreatedAt,
}
