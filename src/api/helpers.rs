//! API 响应帮助函数

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use crate::errors::TikaramError;

use super::types::{ErrorResponse, SuccessResponse};

/// 构建 `{error}` 形式的错误响应
pub fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorResponse {
            error: message.into(),
        })
}

/// 从 TikaramError 构建错误响应（自动映射 HTTP 状态码）
pub fn error_from_tikaram(err: &TikaramError) -> HttpResponse {
    error_response(err.http_status(), err.message())
}

/// 构建 `{success: true}` 响应
pub fn success_response(status: StatusCode) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(SuccessResponse::ok())
}

/// 307 跳转
pub fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header(("Location", location))
        .finish()
}

/// JSON body 解析失败也走 `{error}` 契约，不落到框架默认错误页
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_response(StatusCode::BAD_REQUEST, err.to_string());
    actix_web::error::InternalError::from_response(err, response).into()
}

/// 应用级 JsonConfig
pub fn json_config() -> actix_web::web::JsonConfig {
    actix_web::web::JsonConfig::default().error_handler(json_error_handler)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status() {
        let response = error_response(StatusCode::BAD_REQUEST, "Something went wrong");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_from_tikaram_maps_conflict() {
        let err = TikaramError::duplicate_email("Email already exists");
        let response = error_from_tikaram(&err);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_success_response_status() {
        let response = success_response(StatusCode::CREATED);
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_redirect_has_location() {
        let response = redirect_to("https://example.com/");
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get("Location").unwrap(),
            "https://example.com/"
        );
    }
}
