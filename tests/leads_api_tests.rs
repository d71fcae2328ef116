//! Lead 工作流集成测试
//!
//! 用临时 SQLite 数据库跑完整的报名 → 验证回调流程。

use std::sync::{Arc, Mutex, Once};

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use tempfile::TempDir;

use tikaram_api::api::helpers::json_config;
use tikaram_api::api::services::lead_routes;
use tikaram_api::config::init_config;
use tikaram_api::errors::{BestEffortError, BestEffortResult};
use tikaram_api::services::Mailer;
use tikaram_api::storage::SeaOrmStorage;

// 确保 config 只初始化一次
static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (Arc::new(storage), temp_dir)
}

/// 记录所有发送调用的 mailer 测试替身
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> BestEffortResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), html.to_string()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Recording"
    }
}

/// 永远失败的 mailer，模拟邮件服务故障
struct FailingMailer;

#[async_trait::async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _to: &str, _subject: &str, _html: &str) -> BestEffortResult<()> {
        Err(BestEffortError::new("email dispatch", "simulated outage"))
    }

    fn name(&self) -> &'static str {
        "Failing"
    }
}

macro_rules! lead_app {
    ($storage:expr, $mailer:expr) => {
        test::init_service(
            App::new()
                .app_data(json_config())
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new($mailer.clone()))
                .service(lead_routes()),
        )
        .await
    };
}

#[actix_web::test]
async fn test_post_lead_creates_unverified_lead_with_token() {
    let (storage, _tmp) = create_temp_storage().await;
    let recorder = Arc::new(RecordingMailer::default());
    let mailer: Arc<dyn Mailer> = recorder.clone();
    let app = lead_app!(storage, mailer);

    let req = test::TestRequest::post()
        .uri("/leads")
        .set_json(serde_json::json!({ "email": "a@b.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    // 新记录未验证、token 非空
    let lead = storage
        .find_lead_by_email("a@b.com")
        .await
        .unwrap()
        .expect("lead should exist");
    assert!(!lead.is_verified);
    assert!(!lead.verification_token.is_empty());
    assert_eq!(lead.coupon_code, "TIKARAM-FIRST-2025");

    // 验证邮件发过一次，链接里带 token
    let sent = recorder.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "a@b.com");
    assert!(sent[0].2.contains(&lead.verification_token));
}

#[actix_web::test]
async fn test_post_lead_missing_email_is_rejected_before_storage() {
    let (storage, _tmp) = create_temp_storage().await;
    let mailer: Arc<dyn Mailer> = Arc::new(RecordingMailer::default());
    let app = lead_app!(storage, mailer);

    let req = test::TestRequest::post()
        .uri("/leads")
        .set_json(serde_json::json!({ "first_name": "Ana" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Email is required");
}

#[actix_web::test]
async fn test_duplicate_email_yields_conflict_and_single_record() {
    let (storage, _tmp) = create_temp_storage().await;
    let mailer: Arc<dyn Mailer> = Arc::new(RecordingMailer::default());
    let app = lead_app!(storage, mailer);

    let first = test::TestRequest::post()
        .uri("/leads")
        .set_json(serde_json::json!({ "email": "dup@b.com" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, first).await.status(),
        StatusCode::OK
    );

    let token_before = storage
        .find_lead_by_email("dup@b.com")
        .await
        .unwrap()
        .unwrap()
        .verification_token;

    let second = test::TestRequest::post()
        .uri("/leads")
        .set_json(serde_json::json!({ "email": "dup@b.com", "first_name": "Again" }))
        .to_request();
    let resp = test::call_service(&app, second).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Email already exists");

    // 第一条记录原样保留，没有被覆盖
    let lead = storage
        .find_lead_by_email("dup@b.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(lead.verification_token, token_before);
    assert_eq!(lead.first_name, None);
}

#[actix_web::test]
async fn test_email_dispatch_failure_does_not_change_outcome() {
    let (storage, _tmp) = create_temp_storage().await;
    let mailer: Arc<dyn Mailer> = Arc::new(FailingMailer);
    let app = lead_app!(storage, mailer);

    let req = test::TestRequest::post()
        .uri("/leads")
        .set_json(serde_json::json!({ "email": "nomail@b.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // 邮件挂了，lead 照样创建成功
    assert_eq!(resp.status(), StatusCode::OK);
    let lead = storage.find_lead_by_email("nomail@b.com").await.unwrap();
    assert!(lead.is_some());
}

#[actix_web::test]
async fn test_verify_flow_end_to_end_and_idempotent() {
    let (storage, _tmp) = create_temp_storage().await;
    let mailer: Arc<dyn Mailer> = Arc::new(RecordingMailer::default());
    let app = lead_app!(storage, mailer);

    let req = test::TestRequest::post()
        .uri("/leads")
        .set_json(serde_json::json!({ "email": "verify@b.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let token = storage
        .find_lead_by_email("verify@b.com")
        .await
        .unwrap()
        .unwrap()
        .verification_token;

    // 第一次验证：跳成功页，记录翻为已验证
    let verify = test::TestRequest::get()
        .uri(&format!("/leads/verify?token={}", token))
        .to_request();
    let resp = test::call_service(&app, verify).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = resp.headers().get("Location").unwrap().to_str().unwrap();
    assert!(location.ends_with("/verification-success"));

    let lead = storage
        .find_lead_by_email("verify@b.com")
        .await
        .unwrap()
        .unwrap();
    assert!(lead.is_verified);

    // 再验证一次：同样的跳转，状态保持 true，无错误
    let verify_again = test::TestRequest::get()
        .uri(&format!("/leads/verify?token={}", token))
        .to_request();
    let resp = test::call_service(&app, verify_again).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = resp.headers().get("Location").unwrap().to_str().unwrap();
    assert!(location.ends_with("/verification-success"));

    let lead = storage
        .find_lead_by_email("verify@b.com")
        .await
        .unwrap()
        .unwrap();
    assert!(lead.is_verified);
}

#[actix_web::test]
async fn test_verify_unknown_token_is_indistinguishable_from_valid() {
    let (storage, _tmp) = create_temp_storage().await;
    let mailer: Arc<dyn Mailer> = Arc::new(RecordingMailer::default());
    let app = lead_app!(storage, mailer);

    // 形似合法但不存在的 token，跳转行为和有效 token 一致
    let req = test::TestRequest::get()
        .uri("/leads/verify?token=5ea33a85-0000-4000-8000-000000000000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = resp.headers().get("Location").unwrap().to_str().unwrap();
    assert!(location.ends_with("/verification-success"));
}

#[actix_web::test]
async fn test_verify_missing_token_redirects_to_root() {
    let (storage, _tmp) = create_temp_storage().await;
    let mailer: Arc<dyn Mailer> = Arc::new(RecordingMailer::default());
    let app = lead_app!(storage, mailer);

    let req = test::TestRequest::get().uri("/leads/verify").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = resp.headers().get("Location").unwrap().to_str().unwrap();
    assert!(!location.contains("verification-success"));
}

#[actix_web::test]
async fn test_post_lead_date_of_birth_validation() {
    let (storage, _tmp) = create_temp_storage().await;
    let mailer: Arc<dyn Mailer> = Arc::new(RecordingMailer::default());
    let app = lead_app!(storage, mailer);

    // 未成年 → 拒绝
    let underage = test::TestRequest::post()
        .uri("/leads")
        .set_json(serde_json::json!({ "email": "kid@b.com", "date_of_birth": "2010-01-01" }))
        .to_request();
    let resp = test::call_service(&app, underage).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(
        storage
            .find_lead_by_email("kid@b.com")
            .await
            .unwrap()
            .is_none()
    );

    // 格式错误 → 拒绝
    let malformed = test::TestRequest::post()
        .uri("/leads")
        .set_json(serde_json::json!({ "email": "odd@b.com", "date_of_birth": "01/01/1990" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, malformed).await.status(),
        StatusCode::BAD_REQUEST
    );

    // 合法成年 DOB → 接受
    let adult = test::TestRequest::post()
        .uri("/leads")
        .set_json(serde_json::json!({ "email": "adult@b.com", "date_of_birth": "1990-05-20" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, adult).await.status(),
        StatusCode::OK
    );
}
