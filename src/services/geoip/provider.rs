//! GeoIP Provider 抽象层
//!
//! 统一的 GeoIP 查询接口。查询失败不向上传播——返回 None，
//! 由调用方决定降级行为（track 流程里是固定 fallback 元组）。

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::external_api::ExternalApiProvider;
use crate::config::GeoIpConfig;

/// 地理位置信息
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoInfo {
    /// 城市名称
    pub city: Option<String>,
    /// 邮编
    pub postal: Option<String>,
    /// 州/省代码 (e.g., "FL")
    pub region: Option<String>,
    /// ISO 3166-1 alpha-2 国家代码 (e.g., "US")
    pub country: Option<String>,
}

/// GeoIP 查询 trait
#[async_trait]
pub trait GeoIpLookup: Send + Sync {
    /// 查询 IP 地址的地理位置，失败返回 None
    async fn lookup(&self, ip: &str) -> Option<GeoInfo>;

    /// 获取 provider 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 统一 GeoIP Provider
pub struct GeoIpProvider {
    inner: Arc<dyn GeoIpLookup>,
}

impl GeoIpProvider {
    /// 根据 GeoIpConfig 初始化外部 API provider
    pub fn new(config: &GeoIpConfig) -> Self {
        let inner: Arc<dyn GeoIpLookup> = Arc::new(ExternalApiProvider::new(&config.api_url));
        info!("GeoIP: Initialized with {} provider", inner.name());
        Self { inner }
    }

    /// 用指定实现构造（测试注入用）
    pub fn with_lookup(inner: Arc<dyn GeoIpLookup>) -> Self {
        Self { inner }
    }

    /// 查询 IP 地址的地理位置
    pub async fn lookup(&self, ip: &str) -> Option<GeoInfo> {
        self.inner.lookup(ip).await
    }

    /// 获取当前使用的 provider 名称
    pub fn provider_name(&self) -> &'static str {
        self.inner.name()
    }
}

impl Clone for GeoIpProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
