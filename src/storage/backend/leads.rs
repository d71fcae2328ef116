//! Lead 写入与验证操作

use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, SqlErr};
use tracing::info;
use uuid::Uuid;

use super::SeaOrmStorage;
use super::converters::model_to_lead;
use crate::errors::{Result, TikaramError};
use crate::storage::models::{Lead, NewLead};

use migration::entities::lead;

impl SeaOrmStorage {
    /// 插入新 lead
    ///
    /// verification token 和 id 都在这里生成（每条恰好一次），调用方必须
    /// 从返回的记录里回读 token。email 撞唯一约束时返回 DuplicateEmail，
    /// 和其它存储错误区分开。
    pub async fn insert_lead(&self, new_lead: NewLead, coupon_code: &str) -> Result<Lead> {
        let id = Uuid::new_v4().to_string();

        let active = lead::ActiveModel {
            id: Set(id.clone()),
            email: Set(new_lead.email),
            first_name: Set(new_lead.first_name),
            zip_code: Set(new_lead.zip_code),
            date_of_birth: Set(new_lead.date_of_birth),
            verification_token: Set(Uuid::new_v4().to_string()),
            is_verified: Set(false),
            coupon_code: Set(coupon_code.to_string()),
            created_at: Set(chrono::Utc::now()),
        };

        if let Err(e) = lead::Entity::insert(active).exec(&self.db).await {
            return Err(match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    TikaramError::duplicate_email("Email already exists")
                }
                _ => TikaramError::database_operation(format!("Failed to insert lead: {}", e)),
            });
        }

        // 回读插入结果，token 必须来自库里的行
        let model = lead::Entity::find_by_id(id.clone())
            .one(&self.db)
            .await
            .map_err(|e| {
                TikaramError::database_operation(format!("Failed to read back lead: {}", e))
            })?
            .ok_or_else(|| {
                TikaramError::database_operation(format!(
                    "Inserted lead {} not found on read-back",
                    id
                ))
            })?;

        info!("Lead created: {}", model.email);
        Ok(model_to_lead(model))
    }

    /// 按 token 无条件置 is_verified = true
    ///
    /// 不检查当前值，重复验证天然幂等。返回影响行数；0 行（token 不存在）
    /// 不是错误，由调用方决定如何呈现。
    pub async fn verify_lead(&self, token: &str) -> Result<u64> {
        let result = lead::Entity::update_many()
            .col_expr(lead::Column::IsVerified, Expr::value(true))
            .filter(lead::Column::VerificationToken.eq(token))
            .exec(&self.db)
            .await
            .map_err(|e| {
                TikaramError::database_operation(format!("Failed to update verification: {}", e))
            })?;

        Ok(result.rows_affected)
    }

    pub async fn find_lead_by_email(&self, email: &str) -> Result<Option<Lead>> {
        let model = lead::Entity::find()
            .filter(lead::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(model_to_lead))
    }
}
