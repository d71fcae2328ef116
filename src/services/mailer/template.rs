//! 验证邮件模板
//!
//! 自包含的内联样式 HTML，邮件客户端不认外部样式表。

/// 拼验证回调链接
pub fn verification_link(origin: &str, token: &str) -> String {
    format!("{}/leads/verify?token={}", origin.trim_end_matches('/'), token)
}

/// 渲染验证邮件正文
pub fn render_verification_email(verification_url: &str) -> String {
    format!(
        r#"<html>
  <body style="background-color:#F8F8F8;font-family:Montserrat,sans-serif;margin:0;padding:0;">
    <div style="background-color:#FFFFFF;margin:0 auto;padding:40px 20px;max-width:600px;">
      <h1 style="color:#004225;font-size:32px;font-weight:700;font-family:'Playfair Display',serif;margin-bottom:24px;text-align:center;">
        Verify your email to unlock your Tikaram Coupon
      </h1>
      <p style="color:#36454F;font-size:16px;line-height:24px;margin-bottom:32px;text-align:center;">
        Click the button below to verify your email address and receive your exclusive first-bottle discount.
      </p>
      <div style="text-align:center;">
        <a href="{url}" style="background-color:#D4AF37;color:#004225;font-size:14px;font-weight:600;text-decoration:none;padding:14px 32px;display:inline-block;">
          Verify Email
        </a>
      </div>
    </div>
  </body>
</html>"#,
        url = verification_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_link_format() {
        let link = verification_link("https://tikaramspirits.com", "abc-123");
        assert_eq!(
            link,
            "https://tikaramspirits.com/leads/verify?token=abc-123"
        );
    }

    #[test]
    fn test_verification_link_strips_trailing_slash() {
        let link = verification_link("http://localhost:3000/", "t");
        assert_eq!(link, "http://localhost:3000/leads/verify?token=t");
    }

    #[test]
    fn test_render_contains_url() {
        let html = render_verification_email("https://example.com/leads/verify?token=x");
        assert!(html.contains("https://example.com/leads/verify?token=x"));
        assert!(html.contains("Verify Email"));
    }
}
