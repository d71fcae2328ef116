//! User-Agent 设备分类
//!
//! 固定 token 列表的大小写不敏感子串匹配，命中即 mobile，否则 desktop。
//! 只是启发式，不做精确 UA 解析。

use strum::AsRefStr;

/// 流量日志用的设备类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// 移动端 UA 特征 token
const MOBILE_UA_TOKENS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// 按 UA 子串分类设备；空 UA 归为 desktop
pub fn classify_device(user_agent: &str) -> DeviceClass {
    let ua_lower = user_agent.to_lowercase();

    if MOBILE_UA_TOKENS.iter().any(|token| ua_lower.contains(token)) {
        DeviceClass::Mobile
    } else {
        DeviceClass::Desktop
    }
}
