//! 联系表单提交

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use tracing::{debug, error};

use crate::api::helpers::{error_from_tikaram, error_response, success_response};
use crate::api::types::PostInquiryRequest;
use crate::errors::TikaramError;
use crate::storage::{NewInquiry, SeaOrmStorage};

pub struct InquiryService {}

impl InquiryService {
    /// POST /inquiries
    pub async fn post_inquiry(
        body: web::Json<PostInquiryRequest>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> impl Responder {
        let body = body.into_inner();

        let (Some(name), Some(email), Some(inquiry_type), Some(message)) = (
            body.name.filter(|s| !s.is_empty()),
            body.email.filter(|s| !s.is_empty()),
            body.inquiry_type.filter(|s| !s.is_empty()),
            body.message.filter(|s| !s.is_empty()),
        ) else {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Missing required fields: name, email, inquiryType, message",
            );
        };

        let new_inquiry = NewInquiry {
            name,
            email,
            inquiry_type,
            message,
        };

        match storage.insert_inquiry(new_inquiry).await {
            Ok(()) => success_response(StatusCode::CREATED),
            Err(e @ TikaramError::DuplicateEntry(_)) => {
                debug!("Inquiry rejected as duplicate");
                error_from_tikaram(&e)
            }
            Err(e) => {
                error!("Inquiry insert failed: {}", e);
                error_from_tikaram(&e)
            }
        }
    }
}

/// 联系表单路由配置
pub fn inquiry_routes() -> actix_web::Scope {
    web::scope("/inquiries").route("", web::post().to(InquiryService::post_inquiry))
}
