use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML + 环境变量加载，启动时固定）
///
/// - server: 监听地址、端口、CORS
/// - database: 数据库连接配置
/// - logging: 日志配置
/// - email: Resend 邮件发送配置
/// - geoip: IP 地理位置查询与会话去重配置
/// - site: 站点 origin、跳转路径、优惠码
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub geoip: GeoIpConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：TIKARAM，分隔符：__
    /// 示例：TIKARAM__SERVER__PORT=9999
    pub fn load() -> Self {
        use config::{Config, Environment, File};

        let path = "config.toml";

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("TIKARAM")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件内容
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
    /// 允许的前端 origin；空 = 仅同源（permissive 开发模式用 "*"）
    #[serde(default)]
    pub cors_allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
            cors_allowed_origin: None,
        }
    }
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

/// 邮件发送配置（Resend HTTP API）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_email_api_url")]
    pub api_url: String,
    /// 为空时邮件发送降级为 no-op
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_email_from")]
    pub from: String,
    #[serde(default = "default_email_verify_subject")]
    pub verify_subject: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            api_url: default_email_api_url(),
            api_key: String::new(),
            from: default_email_from(),
            verify_subject: default_email_verify_subject(),
        }
    }
}

/// GeoIP 查询配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoIpConfig {
    /// 外部 API URL 模板，`{ip}` 为占位符
    #[serde(default = "default_geoip_api_url")]
    pub api_url: String,
    #[serde(default = "default_fallback_city")]
    pub fallback_city: String,
    #[serde(default = "default_fallback_zip")]
    pub fallback_zip: String,
    #[serde(default = "default_fallback_region")]
    pub fallback_region: String,
    #[serde(default = "default_fallback_country")]
    pub fallback_country: String,
    /// 会话标记 TTL（秒），同一会话内 track 只触发一次外呼
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        GeoIpConfig {
            api_url: default_geoip_api_url(),
            fallback_city: default_fallback_city(),
            fallback_zip: default_fallback_zip(),
            fallback_region: default_fallback_region(),
            fallback_country: default_fallback_country(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

/// 站点配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// 验证链接和跳转都基于这个 origin
    #[serde(default = "default_site_origin")]
    pub origin: String,
    #[serde(default = "default_verification_success_path")]
    pub verification_success_path: String,
    /// 当前版本对所有 lead 发同一个固定优惠码
    #[serde(default = "default_coupon_code")]
    pub coupon_code: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            origin: default_site_origin(),
            verification_success_path: default_verification_success_path(),
            coupon_code: default_coupon_code(),
        }
    }
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "tikaram.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "plain".to_string()
}

fn default_max_backups() -> u32 {
    7
}

fn default_enable_rotation() -> bool {
    true
}

fn default_email_api_url() -> String {
    "https://api.resend.com/emails".to_string()
}

fn default_email_from() -> String {
    "welcome@tikaramspirits.com".to_string()
}

fn default_email_verify_subject() -> String {
    "Verify your Tikaram Email".to_string()
}

fn default_geoip_api_url() -> String {
    "https://ipapi.co/{ip}/json/".to_string()
}

fn default_fallback_city() -> String {
    "Tampa".to_string()
}

fn default_fallback_zip() -> String {
    "33606".to_string()
}

fn default_fallback_region() -> String {
    "FL".to_string()
}

fn default_fallback_country() -> String {
    "US".to_string()
}

fn default_session_ttl_secs() -> u64 {
    30 * 60
}

fn default_site_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_verification_success_path() -> String {
    "/verification-success".to_string()
}

fn default_coupon_code() -> String {
    "TIKARAM-FIRST-2025".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = StaticConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.database_url, "tikaram.db");
        assert_eq!(config.site.coupon_code, "TIKARAM-FIRST-2025");
        assert_eq!(config.geoip.fallback_city, "Tampa");
        assert_eq!(config.geoip.fallback_zip, "33606");
        assert!(config.email.api_key.is_empty());
    }

    #[test]
    fn test_generate_sample_config_is_valid_toml() {
        let sample = StaticConfig::generate_sample_config();
        let parsed: std::result::Result<StaticConfig, _> = toml::from_str(&sample);
        assert!(parsed.is_ok(), "sample config should round-trip");
    }
}
