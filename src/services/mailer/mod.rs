//! 邮件发送
//!
//! 验证邮件走 Resend HTTP API。发送失败属于尽力而为级别：lead 已经
//! 落库，邮件没发出去不改变请求结果，所以 send 的错误类型是
//! BestEffortError。没配 API key 时降级为 NoopMailer。

mod resend;
mod template;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::EmailConfig;
use crate::errors::BestEffortResult;

pub use resend::ResendMailer;
pub use template::{render_verification_email, verification_link};

/// 邮件发送 trait
#[async_trait]
pub trait Mailer: Send + Sync {
    /// 发送一封 HTML 邮件，每次调用只尝试一次，不重试
    async fn send(&self, to: &str, subject: &str, html: &str) -> BestEffortResult<()>;

    /// 获取 mailer 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 空实现：未配置 API key 时使用
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, to: &str, _subject: &str, _html: &str) -> BestEffortResult<()> {
        debug!("Mailer disabled, skipping email to {}", to);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Noop"
    }
}

/// 根据配置构建 mailer
pub fn build_mailer(config: &EmailConfig) -> Arc<dyn Mailer> {
    if config.api_key.is_empty() {
        debug!("Email API key not set, mailer disabled");
        Arc::new(NoopMailer)
    } else {
        Arc::new(ResendMailer::new(config))
    }
}
