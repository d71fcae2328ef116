//! 门店列表（store locator 数据源）

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::error;

use crate::api::helpers::error_response;
use crate::api::types::{StoreResponse, StoresListResponse, StoresQuery};
use crate::storage::SeaOrmStorage;

pub struct StoreService {}

impl StoreService {
    /// GET /stores?productSlug=<slug>，不带参数返回全部门店
    pub async fn get_stores(
        query: web::Query<StoresQuery>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> impl Responder {
        let result = match query.product_slug.as_deref().filter(|s| !s.is_empty()) {
            Some(slug) => storage.stores_by_product_slug(slug).await,
            None => storage.all_stores().await,
        };

        match result {
            Ok(stores) => {
                let stores: Vec<StoreResponse> =
                    stores.into_iter().map(StoreResponse::from).collect();
                HttpResponse::Ok().json(StoresListResponse { stores })
            }
            Err(e) => {
                error!("Store query failed: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

/// 门店路由配置
pub fn store_routes() -> actix_web::Scope {
    web::scope("/stores").route("", web::get().to(StoreService::get_stores))
}
