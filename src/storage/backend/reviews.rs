//! 评论写入与查询

use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::SeaOrmStorage;
use super::converters::model_to_review;
use crate::errors::{Result, TikaramError};
use crate::storage::models::{NewReview, Review, ReviewStatus};

use migration::entities::review;

impl SeaOrmStorage {
    /// 插入评论，状态用当前默认（Approved）
    pub async fn insert_review(&self, new_review: NewReview) -> Result<Review> {
        self.insert_review_with_status(new_review, ReviewStatus::default())
            .await
    }

    /// 带显式状态的插入（审核流程用）
    pub async fn insert_review_with_status(
        &self,
        new_review: NewReview,
        status: ReviewStatus,
    ) -> Result<Review> {
        let id = Uuid::new_v4().to_string();

        let active = review::ActiveModel {
            id: Set(id.clone()),
            product_slug: Set(new_review.product_slug),
            author_name: Set(new_review.author_name),
            rating: Set(new_review.rating),
            review_text: Set(new_review.review_text),
            status: Set(status.to_string()),
            created_at: Set(chrono::Utc::now()),
        };

        review::Entity::insert(active)
            .exec(&self.db)
            .await
            .map_err(|e| {
                TikaramError::database_operation(format!("Failed to insert review: {}", e))
            })?;

        let model = review::Entity::find_by_id(id.clone())
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                TikaramError::database_operation(format!(
                    "Inserted review {} not found on read-back",
                    id
                ))
            })?;

        Ok(model_to_review(model))
    }

    /// 某产品的全部已审核评论，新的在前。空结果是正常结果
    pub async fn approved_reviews_by_slug(&self, slug: &str) -> Result<Vec<Review>> {
        let models = review::Entity::find()
            .filter(review::Column::ProductSlug.eq(slug))
            .filter(review::Column::Status.eq(ReviewStatus::Approved.as_ref()))
            .order_by_desc(review::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(model_to_review).collect())
    }
}
