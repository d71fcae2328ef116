//! 联系表单写入

use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::info;

use super::SeaOrmStorage;
use crate::errors::{Result, TikaramError};
use crate::storage::models::NewInquiry;

use migration::entities::inquiry;

impl SeaOrmStorage {
    /// 插入联系表单记录
    ///
    /// 同一邮箱重复提交同一内容按重复处理（表上没有唯一约束，
    /// TEXT 列跨后端没法建，这里用插入前点查）。
    pub async fn insert_inquiry(&self, new_inquiry: NewInquiry) -> Result<()> {
        let existing = inquiry::Entity::find()
            .filter(inquiry::Column::Email.eq(&new_inquiry.email))
            .filter(inquiry::Column::Message.eq(&new_inquiry.message))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(TikaramError::duplicate_entry(
                "An inquiry with this information already exists.",
            ));
        }

        let active = inquiry::ActiveModel {
            name: Set(new_inquiry.name),
            email: Set(new_inquiry.email),
            inquiry_type: Set(new_inquiry.inquiry_type),
            message: Set(new_inquiry.message),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        inquiry::Entity::insert(active)
            .exec(&self.db)
            .await
            .map_err(|e| {
                TikaramError::database_operation(format!("Failed to insert inquiry: {}", e))
            })?;

        info!("Inquiry submitted");
        Ok(())
    }
}
