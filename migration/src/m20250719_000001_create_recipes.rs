use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recipe::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Recipe::Slug)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Recipe::Name).string().not_null())
                    .col(ColumnDef::new(Recipe::ProductSlug).string().not_null())
                    .col(ColumnDef::new(Recipe::Ingredients).text().not_null())
                    .col(ColumnDef::new(Recipe::Instructions).text().not_null())
                    .col(
                        ColumnDef::new(Recipe::CreatedAt)
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
                    .name("idx_recipes_product_slug")
                    .table(Recipe::Table)
                    .col(Recipe::ProductSlug)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_recipes_product_slug").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Recipe::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Recipe {
    #[sea_orm(iden = "recipes")]
    Table,
    Slug,
    Name,
    ProductSlug,
    Ingredients,
    Instructions,
    CreatedAt,
}
