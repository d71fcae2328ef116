//! 健康检查

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, web};

use crate::api::types::HealthResponse;
use crate::storage::SeaOrmStorage;

/// 程序启动时间，App data 注入
#[derive(Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

pub struct HealthService {}

impl HealthService {
    /// GET /health
    pub async fn health_check(
        start_time: web::Data<AppStartTime>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> impl Responder {
        let uptime = (chrono::Utc::now() - start_time.start_datetime).num_seconds();

        HttpResponse::Ok().json(HealthResponse {
            status: "ok".to_string(),
            uptime,
            backend: storage.backend_name().to_string(),
        })
    }
}

/// 健康检查路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("/health").route("", web::get().to(HealthService::health_check))
}
