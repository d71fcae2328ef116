//! Lead 报名与验证回调
//!
//! 入库是关键路径，邮件是尽力而为：lead 插入成功后无论邮件发没发
//! 出去，结果都是 success。验证回调永远只做跳转，不渲染错误页。

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use tracing::{debug, error};

use crate::api::helpers::{error_from_tikaram, error_response, redirect_to, success_response};
use crate::api::types::{PostLeadRequest, VerifyQuery};
use crate::config::get_config;
use crate::errors::TikaramError;
use crate::services::mailer::{render_verification_email, verification_link};
use crate::services::Mailer;
use crate::storage::{NewLead, SeaOrmStorage};
use crate::utils::{is_of_legal_age, parse_date_of_birth};

pub struct LeadService {}

impl LeadService {
    /// POST /leads
    pub async fn post_lead(
        body: web::Json<PostLeadRequest>,
        storage: web::Data<Arc<SeaOrmStorage>>,
        mailer: web::Data<Arc<dyn Mailer>>,
    ) -> impl Responder {
        let body = body.into_inner();

        // email 必填，缺了不碰存储
        let Some(email) = body
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
        else {
            return error_response(StatusCode::BAD_REQUEST, "Email is required");
        };

        // 出生日期可选，填了就必须合法且满 21
        let date_of_birth = match body.date_of_birth.as_deref().filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => match parse_date_of_birth(raw) {
                Ok(dob) => {
                    if !is_of_legal_age(dob, chrono::Utc::now().date_naive()) {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            "You must be 21 or older to sign up",
                        );
                    }
                    Some(dob)
                }
                Err(e) => return error_from_tikaram(&e),
            },
        };

        let config = get_config();
        let new_lead = NewLead {
            email: email.to_string(),
            first_name: body.first_name,
            zip_code: body.zip_code,
            date_of_birth,
        };

        let lead = match storage.insert_lead(new_lead, &config.site.coupon_code).await {
            Ok(lead) => lead,
            Err(e @ TikaramError::DuplicateEmail(_)) => {
                debug!("Lead intake rejected: {}", e.message());
                return error_from_tikaram(&e);
            }
            Err(e) => {
                error!("Lead insert failed: {}", e);
                return error_from_tikaram(&e);
            }
        };

        // token 必须出现在插入结果里，不在就是存储配置坏了，这个不吞
        if lead.verification_token.is_empty() {
            error!("No verification token on inserted lead {}", lead.id);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate verification token",
            );
        }

        // 发验证邮件：恰好尝试一次，失败记日志但不改变已经成立的结果
        let url = verification_link(&config.site.origin, &lead.verification_token);
        let html = render_verification_email(&url);
        if let Err(e) = mailer
            .send(&lead.email, &config.email.verify_subject, &html)
            .await
        {
            e.log_and_discard();
        }

        success_response(StatusCode::OK)
    }

    /// GET /leads/verify?token=<t>
    ///
    /// 所有非成功路径都安静跳回站点首页；token 没匹配到行也走成功
    /// 跳转，外部观察不到 token 是否有效。
    pub async fn verify(
        query: web::Query<VerifyQuery>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> impl Responder {
        let config = get_config();
        let root = config.site.origin.clone();

        let Some(token) = query.token.as_deref().filter(|t| !t.is_empty()) else {
            return redirect_to(&root);
        };

        match storage.verify_lead(token).await {
            Ok(rows_affected) => {
                if rows_affected == 0 {
                    debug!("Verification token matched no lead");
                }
                let destination = format!(
                    "{}{}",
                    root.trim_end_matches('/'),
                    config.site.verification_success_path
                );
                redirect_to(&destination)
            }
            Err(e) => {
                error!("Error updating verification: {}", e);
                redirect_to(&root)
            }
        }
    }
}

/// Lead 路由配置
pub fn lead_routes() -> actix_web::Scope {
    web::scope("/leads")
        .route("", web::post().to(LeadService::post_lead))
        .route("/verify", web::get().to(LeadService::verify))
}
