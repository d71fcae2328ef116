//! 配方存取
//!
//! ingredients 以 JSON 文本落库，导入时按 slug upsert，
//! 重跑导入不会产生重复行。

use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::model_to_recipe;
use crate::errors::{Result, TikaramError};
use crate::storage::models::{NewRecipe, Recipe};

use migration::entities::recipe;

impl SeaOrmStorage {
    /// 按 slug 原子 upsert
    pub async fn upsert_recipe(&self, new_recipe: NewRecipe) -> Result<()> {
        let ingredients_json = serde_json::to_string(&new_recipe.ingredients)?;

        let active = recipe::ActiveModel {
            slug: Set(new_recipe.slug.clone()),
            name: Set(new_recipe.name),
            product_slug: Set(new_recipe.product_slug),
            ingredients: Set(ingredients_json),
            instructions: Set(new_recipe.instructions),
            created_at: Set(chrono::Utc::now()),
        };

        recipe::Entity::insert(active)
            .on_conflict(
                OnConflict::column(recipe::Column::Slug)
                    .update_columns([
                        recipe::Column::Name,
                        recipe::Column::ProductSlug,
                        recipe::Column::Ingredients,
                        recipe::Column::Instructions,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| {
                TikaramError::database_operation(format!(
                    "Failed to upsert recipe '{}': {}",
                    new_recipe.slug, e
                ))
            })?;

        info!("Recipe upserted: {}", new_recipe.slug);
        Ok(())
    }

    pub async fn all_recipes(&self) -> Result<Vec<Recipe>> {
        let models = recipe::Entity::find()
            .order_by_asc(recipe::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(model_to_recipe).collect())
    }

    pub async fn recipes_by_product_slug(&self, slug: &str) -> Result<Vec<Recipe>> {
        let models = recipe::Entity::find()
            .filter(recipe::Column::ProductSlug.eq(slug))
            .order_by_asc(recipe::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(model_to_recipe).collect())
    }
}
