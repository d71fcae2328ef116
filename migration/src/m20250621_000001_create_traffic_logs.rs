use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 流量日志：只写不读，geo 字段可空（上游查询可能失败）
        manager
            .create_table(
                Table::create()
                    .table(TrafficLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrafficLog::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TrafficLog::City).string().null())
                    .col(ColumnDef::new(TrafficLog::Country).string().null())
                    .col(ColumnDef::new(TrafficLog::ZipCode).string().null())
                    .col(ColumnDef::new(TrafficLog::Path).string().not_null())
                    .col(ColumnDef::new(TrafficLog::DeviceType).string().not_null())
                    .col(
                        ColumnDef::new(TrafficLog::CreatedAt)
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
                    .name("idx_traffic_logs_created_at")
                    .table(TrafficLog::Table)
                    .col(TrafficLog::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_traffic_logs_created_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TrafficLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TrafficLog {
    #[sea_orm(iden = "traffic_logs")]
    Table,
    Id,
    City,
    Country,
    ZipCode,
    Path,
    DeviceType,
    CreatedAt,
}
