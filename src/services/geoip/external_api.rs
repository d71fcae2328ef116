//! 外部 GeoIP API 实现
//!
//! 使用外部 HTTP API 进行 IP 地理位置查询（如 ipapi.co）
//! 内置 LRU 缓存 + Singleflight 语义，避免重复查询

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::{trace, warn};
use ureq::Agent;

use super::provider::{GeoInfo, GeoIpLookup};

/// GeoIP 缓存 TTL（15 分钟）
const GEOIP_CACHE_TTL_SECS: u64 = 15 * 60;
/// GeoIP 缓存最大容量
const GEOIP_CACHE_MAX_CAPACITY: u64 = 10_000;
/// HTTP 请求超时时间
const HTTP_TIMEOUT_SECS: u64 = 2;

/// 全局 HTTP Agent（ureq 的 Agent 是 Send + Sync）
static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn get_agent() -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            .build()
            .into()
    })
}

/// 外部 API GeoIP Provider
///
/// 内置 Moka 缓存：
/// - LRU 淘汰策略，最大 10000 条
/// - TTL 15 分钟
/// - Singleflight：同一 IP 的并发请求只发一次 HTTP
pub struct ExternalApiProvider {
    api_url_template: String,
    /// IP → GeoInfo 缓存（Option 用于负缓存）
    cache: Cache<String, Option<GeoInfo>>,
}

impl ExternalApiProvider {
    /// 创建外部 API Provider
    ///
    /// `api_url_template` 使用 `{ip}` 作为占位符
    /// 例如: `https://ipapi.co/{ip}/json/`
    pub fn new(api_url_template: &str) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(GEOIP_CACHE_TTL_SECS))
            .max_capacity(GEOIP_CACHE_MAX_CAPACITY)
            .build();

        Self {
            api_url_template: api_url_template.to_string(),
            cache,
        }
    }

    /// 从外部 API 获取 GeoIP 信息（同步，在 spawn_blocking 中调用）
    fn fetch_from_api_sync(url: String) -> Option<GeoInfo> {
        let agent = get_agent();

        let resp = match agent.get(&url).call() {
            Ok(r) => r,
            Err(e) => {
                warn!("GeoIP API request to \"{}\" failed: {}", url, e);
                return None;
            }
        };

        let json: serde_json::Value = match resp.into_body().read_json() {
            Ok(j) => j,
            Err(e) => {
                warn!("GeoIP API response from \"{}\" parse failed: {}", url, e);
                return None;
            }
        };

        // ipapi.co 成功格式: {"city": "Tampa", "postal": "33606",
        //                     "region_code": "FL", "country_code": "US"}
        // 失败时返回: {"error": true, "reason": "..."}
        // 也兼容 ip-api.com 的 {"status": "fail"} 形式
        if json["error"].as_bool() == Some(true) || json["status"].as_str() == Some("fail") {
            trace!("External API returned fail status");
            return None;
        }

        let city = json["city"].as_str().map(String::from);
        let postal = json["postal"]
            .as_str()
            .or_else(|| json["zip"].as_str())
            .map(String::from);
        let region = json["region_code"]
            .as_str()
            .or_else(|| json["region"].as_str())
            .map(String::from);
        let country = json["country_code"]
            .as_str()
            .or_else(|| json["countryCode"].as_str())
            .map(String::from);

        trace!(
            "External API lookup: city={:?}, postal={:?}, country={:?}",
            city, postal, country
        );

        Some(GeoInfo {
            city,
            postal,
            region,
            country,
        })
    }

    /// 从外部 API 获取 GeoIP 信息（异步包装）
    async fn fetch_from_api(&self, ip: &str) -> Option<GeoInfo> {
        let url = self.api_url_template.replace("{ip}", ip);

        // 使用 spawn_blocking 在线程池中执行同步 HTTP 请求
        tokio::task::spawn_blocking(move || Self::fetch_from_api_sync(url))
            .await
            .unwrap_or_else(|e| {
                warn!("GeoIP spawn_blocking failed: {}", e);
                None
            })
    }
}

#[async_trait]
impl GeoIpLookup for ExternalApiProvider {
    /// 查询 IP 地理位置（带缓存 + Singleflight）
    async fn lookup(&self, ip: &str) -> Option<GeoInfo> {
        let ip_key = ip.to_string();

        // get_with 自带 singleflight 语义：
        // 同一 key 的并发调用只会执行一次闭包，其他等待结果
        self.cache
            .get_with(ip_key, async {
                trace!("GeoIP cache miss for {}, fetching from API", ip);
                self.fetch_from_api(ip).await
            })
            .await
    }

    fn name(&self) -> &'static str {
        "ExternalAPI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 不可达地址应该快速失败并返回 None
    #[tokio::test]
    async fn test_unreachable_api_returns_none() {
        // 127.0.0.1:1 基本不可能有服务监听，连接立即被拒
        let provider = ExternalApiProvider::new("http://127.0.0.1:1/{ip}/json/");

        let result = provider.lookup("8.8.8.8").await;
        assert!(result.is_none(), "unreachable API should yield None");
    }

    /// 依赖外部网络服务，CI 环境可能失败
    #[tokio::test]
    #[ignore]
    async fn test_external_api_provider_lookup_real() {
        let provider = ExternalApiProvider::new("https://ipapi.co/{ip}/json/");

        let result1 = provider.lookup("8.8.8.8").await;
        assert!(result1.is_some(), "First lookup should succeed");
        assert_eq!(
            result1.as_ref().unwrap().country,
            Some("US".to_string()),
            "Google DNS should be in US"
        );

        // 第二次查询（缓存命中，不发起 HTTP 请求）
        let result2 = provider.lookup("8.8.8.8").await;
        assert_eq!(result1, result2, "Cached result should match");
    }
}
