//! 活动列表

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::error;

use crate::api::helpers::error_response;
use crate::api::types::{EventResponse, EventsListResponse};
use crate::storage::SeaOrmStorage;

pub struct EventService {}

impl EventService {
    /// GET /events，按活动时间升序
    pub async fn get_events(storage: web::Data<Arc<SeaOrmStorage>>) -> impl Responder {
        match storage.all_events().await {
            Ok(events) => {
                let events: Vec<EventResponse> =
                    events.into_iter().map(EventResponse::from).collect();
                HttpResponse::Ok().json(EventsListResponse { events })
            }
            Err(e) => {
                error!("Event query failed: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

/// 活动路由配置
pub fn event_routes() -> actix_web::Scope {
    web::scope("/events").route("", web::get().to(EventService::get_events))
}
