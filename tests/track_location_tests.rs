//! 访问打点集成测试
//!
//! 覆盖固定 fallback、设备分类、会话级去重（singleflight）。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use tempfile::TempDir;

use tikaram_api::api::services::track_routes;
use tikaram_api::config::{GeoIpConfig, init_config};
use tikaram_api::services::geoip::{GeoInfo, GeoIpLookup, GeoIpProvider};
use tikaram_api::services::LocationTracker;
use tikaram_api::storage::{SeaOrmStorage, TrafficSink};

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

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

/// 统计外呼次数的 lookup 测试替身
struct CountingLookup {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl GeoIpLookup for CountingLookup {
    async fn lookup(&self, _ip: &str) -> Option<GeoInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // 故意放慢，让并发请求有机会重叠
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        Some(GeoInfo {
            city: Some("Miami".to_string()),
            postal: Some("33139".to_string()),
            region: Some("FL".to_string()),
            country: Some("US".to_string()),
        })
    }

    fn name(&self) -> &'static str {
        "Counting"
    }
}

fn build_tracker(geoip: GeoIpProvider, storage: &Arc<SeaOrmStorage>) -> Arc<LocationTracker> {
    let sink = storage.clone() as Arc<dyn TrafficSink>;
    Arc::new(LocationTracker::new(geoip, sink, &GeoIpConfig::default()))
}

macro_rules! track_app {
    ($tracker:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($tracker.clone()))
                .service(track_routes()),
        )
        .await
    };
}

#[actix_web::test]
async fn test_unreachable_geo_service_returns_fallback_tuple() {
    let (storage, _tmp) = create_temp_storage().await;

    // 127.0.0.1:1 连接立即被拒，模拟上游不可达
    let geoip = GeoIpProvider::new(&GeoIpConfig {
        api_url: "http://127.0.0.1:1/{ip}/json/".to_string(),
        ..GeoIpConfig::default()
    });
    let tracker = build_tracker(geoip, &storage);
    let app = track_app!(tracker);

    let req = test::TestRequest::post()
        .uri("/track-location")
        .peer_addr("8.8.8.8:443".parse().unwrap())
        .to_request();
    let resp = test::call_service(&app, req).await;

    // 上游全挂也必须 200 + 固定 fallback
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["zip_code"], "33606");
    assert_eq!(body["city"], "Tampa");

    // fallback 数据照样落一条日志
    assert_eq!(storage.count_traffic_logs().await.unwrap(), 1);
    let log = storage.latest_traffic_log().await.unwrap().unwrap();
    assert_eq!(log.city.as_deref(), Some("Tampa"));
    assert_eq!(log.zip_code.as_deref(), Some("33606"));
    assert_eq!(log.path, "/track-location");
}

#[actix_web::test]
async fn test_mobile_user_agent_classified_in_log() {
    let (storage, _tmp) = create_temp_storage().await;
    let geoip = GeoIpProvider::with_lookup(Arc::new(CountingLookup {
        calls: AtomicUsize::new(0),
    }));
    let tracker = build_tracker(geoip, &storage);
    let app = track_app!(tracker);

    let req = test::TestRequest::post()
        .uri("/track-location")
        .peer_addr("8.8.8.8:443".parse().unwrap())
        .insert_header((
            "User-Agent",
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)",
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let log = storage.latest_traffic_log().await.unwrap().unwrap();
    assert_eq!(log.device_type, "mobile");
    assert_eq!(log.city.as_deref(), Some("Miami"));
}

#[actix_web::test]
async fn test_concurrent_same_session_fires_single_lookup() {
    let (storage, _tmp) = create_temp_storage().await;
    let lookup = Arc::new(CountingLookup {
        calls: AtomicUsize::new(0),
    });
    let geoip = GeoIpProvider::with_lookup(lookup.clone());
    let tracker = build_tracker(geoip, &storage);
    let app = track_app!(tracker);

    let make_req = || {
        test::TestRequest::post()
            .uri("/track-location")
            .peer_addr("8.8.8.8:443".parse().unwrap())
            .cookie(Cookie::new("tikaram_session", "session-1"))
            .to_request()
    };

    // 同一会话的并发调用只有一个真正外呼
    let (resp1, resp2) = tokio::join!(
        test::call_service(&app, make_req()),
        test::call_service(&app, make_req())
    );
    assert_eq!(resp1.status(), StatusCode::OK);
    assert_eq!(resp2.status(), StatusCode::OK);
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    assert_eq!(storage.count_traffic_logs().await.unwrap(), 1);

    // 会话标记还在，后续调用也不再外呼
    let resp3 = test::call_service(&app, make_req()).await;
    assert_eq!(resp3.status(), StatusCode::OK);
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);

    // 换个会话才会重新外呼
    let other = test::TestRequest::post()
        .uri("/track-location")
        .peer_addr("8.8.8.8:443".parse().unwrap())
        .cookie(Cookie::new("tikaram_session", "session-2"))
        .to_request();
    let resp4 = test::call_service(&app, other).await;
    assert_eq!(resp4.status(), StatusCode::OK);
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
    assert_eq!(storage.count_traffic_logs().await.unwrap(), 2);
}

#[actix_web::test]
async fn test_first_visit_sets_session_cookie() {
    let (storage, _tmp) = create_temp_storage().await;
    let geoip = GeoIpProvider::with_lookup(Arc::new(CountingLookup {
        calls: AtomicUsize::new(0),
    }));
    let tracker = build_tracker(geoip, &storage);
    let app = track_app!(tracker);

    let req = test::TestRequest::post()
        .uri("/track-location")
        .peer_addr("8.8.8.8:443".parse().unwrap())
        .to_request();
    let resp = test::call_service(&app, req).await;

    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();
    assert!(set_cookie.contains("tikaram_session="));

    // 已带 cookie 的请求不再下发
    let req = test::TestRequest::post()
        .uri("/track-location")
        .peer_addr("8.8.8.8:443".parse().unwrap())
        .cookie(Cookie::new("tikaram_session", "existing"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().get("set-cookie").is_none());
}

#[actix_web::test]
async fn test_private_client_ip_uses_fallback_without_lookup() {
    let (storage, _tmp) = create_temp_storage().await;
    let lookup = Arc::new(CountingLookup {
        calls: AtomicUsize::new(0),
    });
    let geoip = GeoIpProvider::with_lookup(lookup.clone());
    let tracker = build_tracker(geoip, &storage);
    let app = track_app!(tracker);

    // 内网 IP 不值得外呼，直接 fallback
    let req = test::TestRequest::post()
        .uri("/track-location")
        .peer_addr("192.168.1.10:50000".parse().unwrap())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["city"], "Tampa");
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
}
