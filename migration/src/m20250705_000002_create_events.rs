use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Event::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Event::Name).string().not_null())
                    .col(ColumnDef::new(Event::Slug).string().not_null())
                    .col(ColumnDef::new(Event::ImageUrl).string().null())
                    .col(
                        ColumnDef::new(Event::EventDatetime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Event::Location).string().not_null())
                    .col(ColumnDef::new(Event::Category).string().not_null())
                    .col(ColumnDef::new(Event::CtaLink).string().null())
                    .col(
                        ColumnDef::new(Event::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 列表页按活动时间升序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_event_datetime")
                    .table(Event::Table)
                    .col(Event::EventDatetime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_events_event_datetime").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Event {
    #[sea_orm(iden = "events")]
    Table,
    Id,
    Name,
    Slug,
    ImageUrl,
    EventDatetime,
    Location,
    Category,
    CtaLink,
    CreatedAt,
}
