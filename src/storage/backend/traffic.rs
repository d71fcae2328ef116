//! 流量日志 sink
//!
//! 只写不读的观测数据。写失败永远不能影响请求的响应，所以这里的
//! 错误类型是 BestEffortError，调用方只能 log_and_discard。

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder};

use super::SeaOrmStorage;
use crate::errors::{BestEffortError, BestEffortResult, Result};
use crate::storage::models::NewTrafficLog;

use migration::entities::traffic_log;

#[async_trait]
pub trait TrafficSink: Send + Sync {
    /// 写一条页面访问记录
    async fn log_visit(&self, entry: NewTrafficLog) -> BestEffortResult<()>;
}

#[async_trait]
impl TrafficSink for SeaOrmStorage {
    async fn log_visit(&self, entry: NewTrafficLog) -> BestEffortResult<()> {
        let active = traffic_log::ActiveModel {
            city: Set(entry.city),
            country: Set(entry.country),
            zip_code: Set(entry.zip_code),
            path: Set(entry.path),
            device_type: Set(entry.device_type),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        traffic_log::Entity::insert(active)
            .exec(&self.db)
            .await
            .map_err(|e| BestEffortError::new("traffic log write", e.to_string()))?;

        Ok(())
    }
}

impl SeaOrmStorage {
    pub async fn count_traffic_logs(&self) -> Result<u64> {
        Ok(traffic_log::Entity::find().count(&self.db).await?)
    }

    pub async fn latest_traffic_log(&self) -> Result<Option<traffic_log::Model>> {
        Ok(traffic_log::Entity::find()
            .order_by_desc(traffic_log::Column::Id)
            .one(&self.db)
            .await?)
    }
}
