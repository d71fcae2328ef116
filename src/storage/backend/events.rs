//! 活动列表查询与种子数据写入

use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, QueryOrder};

use super::SeaOrmStorage;
use super::converters::model_to_event;
use crate::errors::{Result, TikaramError};
use crate::storage::models::EventItem;

use migration::entities::event;

impl SeaOrmStorage {
    /// 全部活动，按活动时间升序
    pub async fn all_events(&self) -> Result<Vec<EventItem>> {
        let models = event::Entity::find()
            .order_by_asc(event::Column::EventDatetime)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(model_to_event).collect())
    }

    /// 活动 upsert（按 id），种子导入用
    pub async fn upsert_event(&self, entry: EventItem) -> Result<()> {
        let active = event::ActiveModel {
            id: Set(entry.id),
            name: Set(entry.name),
            slug: Set(entry.slug),
            image_url: Set(entry.image_url),
            event_datetime: Set(entry.event_datetime),
            location: Set(entry.location),
            category: Set(entry.category),
            cta_link: Set(entry.cta_link),
            created_at: Set(chrono::Utc::now()),
        };

        event::Entity::insert(active)
            .on_conflict(
                OnConflict::column(event::Column::Id)
                    .update_columns([
                        event::Column::Name,
                        event::Column::Slug,
                        event::Column::ImageUrl,
                        event::Column::EventDatetime,
                        event::Column::Location,
                        event::Column::Category,
                        event::Column::CtaLink,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| {
                TikaramError::database_operation(format!("Failed to upsert event: {}", e))
            })?;

        Ok(())
    }
}
