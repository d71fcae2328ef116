//! 页面访问打点
//!
//! 这个端点对浏览器永远是 200 + 位置元组，哪怕 geo 外呼和日志写入
//! 全部失败——所有失败路径都在 LocationTracker 里折叠成 fallback。

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use uuid::Uuid;

use crate::api::types::TrackLocationResponse;
use crate::services::LocationTracker;
use crate::utils::ip::extract_client_ip;

/// 会话 cookie 名；浏览器第一次打点时下发
pub const SESSION_COOKIE_NAME: &str = "tikaram_session";

pub struct TrackService {}

impl TrackService {
    /// POST /track-location
    pub async fn track_location(
        req: HttpRequest,
        tracker: web::Data<Arc<LocationTracker>>,
    ) -> impl Responder {
        let (session_id, is_new_session) = match req.cookie(SESSION_COOKIE_NAME) {
            Some(cookie) => (cookie.value().to_string(), false),
            None => (Uuid::new_v4().to_string(), true),
        };

        let user_agent = req
            .headers()
            .get("user-agent")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);
        let client_ip = extract_client_ip(&req);

        let location = tracker
            .track(
                &session_id,
                req.path(),
                user_agent.as_deref(),
                client_ip.as_deref(),
            )
            .await;

        let mut builder = HttpResponse::Ok();
        if is_new_session {
            builder.cookie(
                Cookie::build(SESSION_COOKIE_NAME, session_id)
                    .path("/")
                    .finish(),
            );
        }
        builder.json(TrackLocationResponse::from(location))
    }
}

/// 打点路由配置
pub fn track_routes() -> actix_web::Scope {
    web::scope("/track-location").route("", web::post().to(TrackService::track_location))
}
