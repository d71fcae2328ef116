//! 门店查询与种子数据写入

use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter};

use super::SeaOrmStorage;
use super::converters::model_to_store;
use crate::errors::{Result, TikaramError};
use crate::storage::models::Store;

use migration::entities::{store, store_product};

impl SeaOrmStorage {
    pub async fn all_stores(&self) -> Result<Vec<Store>> {
        let models = store::Entity::find().all(&self.db).await?;
        Ok(models.into_iter().map(model_to_store).collect())
    }

    /// 通过 store_products 关联表查"哪些门店有这个产品"
    pub async fn stores_by_product_slug(&self, slug: &str) -> Result<Vec<Store>> {
        let store_ids: Vec<String> = store_product::Entity::find()
            .filter(store_product::Column::ProductSlug.eq(slug))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| m.store_id)
            .collect();

        if store_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = store::Entity::find()
            .filter(store::Column::Id.is_in(store_ids))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(model_to_store).collect())
    }

    /// 门店 upsert（按 id），种子导入用
    pub async fn upsert_store(&self, entry: Store) -> Result<()> {
        let active = store::ActiveModel {
            id: Set(entry.id),
            name: Set(entry.name),
            address_line1: Set(entry.address_line1),
            city: Set(entry.city),
            state: Set(entry.state),
            zip_code: Set(entry.zip_code),
            phone: Set(entry.phone),
            lat: Set(entry.lat),
            lng: Set(entry.lng),
        };

        store::Entity::insert(active)
            .on_conflict(
                OnConflict::column(store::Column::Id)
                    .update_columns([
                        store::Column::Name,
                        store::Column::AddressLine1,
                        store::Column::City,
                        store::Column::State,
                        store::Column::ZipCode,
                        store::Column::Phone,
                        store::Column::Lat,
                        store::Column::Lng,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| {
                TikaramError::database_operation(format!("Failed to upsert store: {}", e))
            })?;

        Ok(())
    }

    /// 记录"门店 X 有产品 Y"，重复关联静默跳过
    pub async fn link_store_product(&self, store_id: &str, product_slug: &str) -> Result<()> {
        let active = store_product::ActiveModel {
            store_id: Set(store_id.to_string()),
            product_slug: Set(product_slug.to_string()),
        };

        let result = store_product::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([
                    store_product::Column::StoreId,
                    store_product::Column::ProductSlug,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec(&self.db)
            .await;

        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(TikaramError::database_operation(format!(
                "Failed to link store {} to product {}: {}",
                store_id, product_slug, e
            ))),
        }
    }
}
