//! 页面访问打点 + 会话去重
//!
//! 每个浏览会话最多外呼一次 geo 查询、落一条流量日志。去重状态是
//! 这个组件自己持有的缓存，不是全局可变量。

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::trace;

use crate::config::GeoIpConfig;
use crate::services::geoip::{GeoInfo, GeoIpProvider};
use crate::storage::{NewTrafficLog, TrafficSink};
use crate::utils::device::classify_device;
use crate::utils::ip::is_private_or_local;

/// 会话缓存容量上限
const SESSION_CACHE_MAX_CAPACITY: u64 = 100_000;

/// 打点返回给前端的位置元组（真实或 fallback）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedLocation {
    pub zip_code: Option<String>,
    pub city: Option<String>,
}

/// 会话级去重的位置跟踪器
pub struct LocationTracker {
    geoip: GeoIpProvider,
    sink: Arc<dyn TrafficSink>,
    /// 会话 id → 本会话已返回的位置。条目存在即视为"本会话已打点"
    sessions: Cache<String, TrackedLocation>,
    fallback: GeoInfo,
}

impl LocationTracker {
    pub fn new(geoip: GeoIpProvider, sink: Arc<dyn TrafficSink>, config: &GeoIpConfig) -> Self {
        let sessions = Cache::builder()
            .time_to_live(Duration::from_secs(config.session_ttl_secs))
            .max_capacity(SESSION_CACHE_MAX_CAPACITY)
            .build();

        let fallback = GeoInfo {
            city: Some(config.fallback_city.clone()),
            postal: Some(config.fallback_zip.clone()),
            region: Some(config.fallback_region.clone()),
            country: Some(config.fallback_country.clone()),
        };

        Self {
            geoip,
            sink,
            sessions,
            fallback,
        }
    }

    /// 固定 fallback 元组（handler 的最外层兜底也用它）
    pub fn fallback_location(&self) -> TrackedLocation {
        TrackedLocation {
            zip_code: self.fallback.postal.clone(),
            city: self.fallback.city.clone(),
        }
    }

    /// 为一次页面访问打点，返回位置元组
    ///
    /// get_with 的 singleflight 语义就是这里的重入锁：同一会话的并发
    /// 调用只有第一个执行闭包（geo 外呼 + 写日志），其余等待同一个
    /// 结果；无论成败锁都会释放，而缓存条目本身就是会话级标记，
    /// TTL 内的后续调用直接命中。
    pub async fn track(
        &self,
        session_id: &str,
        path: &str,
        user_agent: Option<&str>,
        client_ip: Option<&str>,
    ) -> TrackedLocation {
        let path = path.to_string();
        let user_agent = user_agent.map(str::to_string);
        let client_ip = client_ip.map(str::to_string);

        self.sessions
            .get_with(session_id.to_string(), async move {
                self.resolve_and_log(path, user_agent, client_ip).await
            })
            .await
    }

    async fn resolve_and_log(
        &self,
        path: String,
        user_agent: Option<String>,
        client_ip: Option<String>,
    ) -> TrackedLocation {
        let geo = self.lookup_geo(client_ip.as_deref()).await;
        let device = classify_device(user_agent.as_deref().unwrap_or(""));

        let entry = NewTrafficLog {
            city: geo.city.clone(),
            country: geo.country.clone(),
            zip_code: geo.postal.clone(),
            path,
            device_type: device.to_string(),
        };

        // 写日志失败只记录，位置照常返回
        if let Err(e) = self.sink.log_visit(entry).await {
            e.log_and_discard();
        }

        TrackedLocation {
            zip_code: geo.postal,
            city: geo.city,
        }
    }

    /// geo 外呼；没有 IP、私有 IP、查询失败都落到固定 fallback
    async fn lookup_geo(&self, client_ip: Option<&str>) -> GeoInfo {
        if let Some(ip) = client_ip
            && let Ok(ip_addr) = ip.parse::<std::net::IpAddr>()
            && !is_private_or_local(&ip_addr)
            && let Some(geo) = self.geoip.lookup(ip).await
        {
            return geo;
        }

        trace!("Geo lookup unavailable, using fallback tuple");
        self.fallback.clone()
    }
}
