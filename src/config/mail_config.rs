//! 메일 발송(SMTP) 설정

use std::env;
use std::time::Duration;

/// SMTP 발송 설정
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub from_password: String,
    pub insecure_skip_verify: bool,
    /// 메일 본문 마지막에 붙는 서명
    pub signature: String,
    /// 백그라운드 발송 작업 하나에 허용되는 최대 시간
    pub send_timeout: Duration,
}

impl MailConfig {
    /// 환경 변수에서 SMTP 설정을 읽습니다.
    ///
    /// ```bash
    /// EMAIL_SMTP_HOST=smtp.gmail.com
    /// EMAIL_SMTP_PORT=587
    /// EMAIL_FROM_ADDRESS=noreply@example.com
    /// EMAIL_FROM_PASSWORD=app-password
    /// EMAIL_TLS_INSECURE_SKIP_VERIFY=false
    /// ```
    pub fn from_env() -> Self {
        Self {
            smtp_host: env::var("EMAIL_SMTP_HOST").unwrap_or_default(),
            smtp_port: env::var("EMAIL_SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            from_address: env::var("EMAIL_FROM_ADDRESS").unwrap_or_default(),
            from_password: env::var("EMAIL_FROM_PASSWORD").unwrap_or_default(),
            insecure_skip_verify: env::var("EMAIL_TLS_INSECURE_SKIP_VERIFY")
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
            signature: env::var("EMAIL_SIGNATURE")
                .unwrap_or_else(|_| "Regards,\nThe Accounts Team".to_string()),
            send_timeout: Duration::from_secs(
                env::var("EMAIL_SEND_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }

    /// SMTP 호스트가 설정되어 있는지 여부
    pub fn is_smtp_configured(&self) -> bool {
        !self.smtp_host.trim().is_empty()
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "t" | "true" | "yes")
}
