//! 客户端 IP 提取工具
//!
//! 服务通常部署在反向代理后面，优先从 X-Forwarded-For / X-Real-IP
//! 取原始客户端 IP；公网直连时用连接 IP，防止伪造。

use std::net::IpAddr;

use actix_web::HttpRequest;

/// 检查 IP 是否为私有地址或 localhost
pub fn is_private_or_local(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        IpAddr::V6(v6) => {
            // IPv6 私有地址：
            // - fc00::/7 (ULA, RFC 4193)
            // - fe80::/10 (Link-local)
            // - ::1 (Loopback)
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00) == 0xfc00
                || (v6.segments()[0] & 0xffc0) == 0xfe80
        }
    }
}

/// 从 HttpRequest 提取真实客户端 IP
///
/// 策略（按优先级）：
/// 1. 连接来自私有 IP/localhost 且带转发头 → 假设有反向代理，用转发头
/// 2. 默认 → 使用连接 IP
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    let conn_info = req.connection_info();
    let peer_ip = conn_info.peer_addr()?;

    if let Ok(ip_addr) = peer_ip.parse::<IpAddr>()
        && is_private_or_local(&ip_addr)
        && let Some(forwarded) = extract_forwarded_ip_from_headers(req.headers())
    {
        return Some(forwarded);
    }

    Some(peer_ip.to_string())
}

/// 从 HeaderMap 提取转发的 IP（X-Forwarded-For 优先，取第一跳）
pub fn extract_forwarded_ip_from_headers(
    headers: &actix_web::http::header::HeaderMap,
) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_private_or_local_ipv4() {
        // 私有地址
        assert!(is_private_or_local(&"10.0.0.1".parse().unwrap()));
        assert!(is_private_or_local(&"172.16.0.1".parse().unwrap()));
        assert!(is_private_or_local(&"192.168.1.1".parse().unwrap()));
        // localhost
        assert!(is_private_or_local(&"127.0.0.1".parse().unwrap()));
        // 公网地址
        assert!(!is_private_or_local(&"8.8.8.8".parse().unwrap()));
        assert!(!is_private_or_local(&"1.1.1.1".parse().unwrap()));
    }

    #[test]
    fn test_is_private_or_local_ipv6() {
        assert!(is_private_or_local(&"::1".parse().unwrap()));
        assert!(is_private_or_local(&"fd00::1".parse().unwrap()));
        assert!(is_private_or_local(&"fe80::1".parse().unwrap()));
        assert!(!is_private_or_local(
            &"2001:4860:4860::8888".parse().unwrap()
        ));
    }

    #[test]
    fn test_extract_forwarded_ip_prefers_x_forwarded_for() {
        let mut headers = actix_web::http::header::HeaderMap::new();
        headers.insert(
            actix_web::http::header::HeaderName::from_static("x-forwarded-for"),
            actix_web::http::header::HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert(
            actix_web::http::header::HeaderName::from_static("x-real-ip"),
            actix_web::http::header::HeaderValue::from_static("198.51.100.1"),
        );

        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("203.0.113.7".to_string())
        );
    }

    #[test]
    fn test_extract_forwarded_ip_falls_back_to_x_real_ip() {
        let mut headers = actix_web::http::header::HeaderMap::new();
        headers.insert(
            actix_web::http::header::HeaderName::from_static("x-real-ip"),
            actix_web::http::header::HeaderValue::from_static("198.51.100.1"),
        );

        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("198.51.100.1".to_string())
        );
    }

    #[test]
    fn test_extract_forwarded_ip_none_when_absent() {
        let headers = actix_web::http::header::HeaderMap::new();
        assert_eq!(extract_forwarded_ip_from_headers(&headers), None);
    }
}
