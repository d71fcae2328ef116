use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Store::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Store::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Store::Name).string().not_null())
                    .col(ColumnDef::new(Store::AddressLine1).string().not_null())
                    .col(ColumnDef::new(Store::City).string().not_null())
                    .col(ColumnDef::new(Store::State).string().not_null())
                    .col(ColumnDef::new(Store::ZipCode).string().not_null())
                    .col(ColumnDef::new(Store::Phone).string().null())
                    .col(ColumnDef::new(Store::Lat).double().not_null())
                    .col(ColumnDef::new(Store::Lng).double().not_null())
                    .to_owned(),
            )
            .await?;

        // 关联表：复合主键 (store_id, product_slug)
        manager
            .create_table(
                Table::create()
                    .table(StoreProduct::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StoreProduct::StoreId).string().not_null())
                    .col(
                        ColumnDef::new(StoreProduct::ProductSlug)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(StoreProduct::StoreId)
                            .col(StoreProduct::ProductSlug),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_store_products_product_slug")
                    .table(StoreProduct::Table)
                    .col(StoreProduct::ProductSlug)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_store_products_product_slug")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(StoreProduct::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Store::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Store {
    #[sea_orm(iden = "stores")]
    Table,
    Id,
    Name,
    AddressLine1,
    City,
    State,
    ZipCode,
    Phone,
    Lat,
    Lng,
}

#[derive(DeriveIden)]
enum StoreProduct {
    #[sea_orm(iden = "store_products")]
    Table,
    StoreId,
    ProductSlug,
}
