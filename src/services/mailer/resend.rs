//! Resend HTTP API mailer

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;
use ureq::Agent;

use super::Mailer;
use crate::config::EmailConfig;
use crate::errors::{BestEffortError, BestEffortResult};

/// 发信请求超时时间
const SEND_TIMEOUT_SECS: u64 = 10;

/// 全局 HTTP Agent（ureq 的 Agent 是 Send + Sync）
static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn get_agent() -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(SEND_TIMEOUT_SECS)))
            .build()
            .into()
    })
}

/// Resend 发信请求体
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// 通过 Resend HTTP API 发送邮件
pub struct ResendMailer {
    api_url: String,
    api_key: String,
    from: String,
}

impl ResendMailer {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        }
    }

    /// 同步发送（在 spawn_blocking 中调用）
    fn send_sync(
        api_url: String,
        api_key: String,
        body: serde_json::Value,
    ) -> BestEffortResult<()> {
        let agent = get_agent();

        let resp = agent
            .post(&api_url)
            .header("Authorization", &format!("Bearer {}", api_key))
            .send_json(&body)
            .map_err(|e| BestEffortError::new("email dispatch", e.to_string()))?;

        if !resp.status().is_success() {
            return Err(BestEffortError::new(
                "email dispatch",
                format!("Resend API returned status {}", resp.status()),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> BestEffortResult<()> {
        let request = SendEmailRequest {
            from: &self.from,
            to,
            subject,
            html,
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| BestEffortError::new("email dispatch", e.to_string()))?;

        let api_url = self.api_url.clone();
        let api_key = self.api_key.clone();
        let recipient = to.to_string();

        tokio::task::spawn_blocking(move || Self::send_sync(api_url, api_key, body))
            .await
            .map_err(|e| BestEffortError::new("email dispatch", e.to_string()))??;

        info!("Verification email sent to {}", recipient);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Resend"
    }
}
