use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Message, SmtpTransport, Transport};
use log::info;

use crate::config::MailConfig;
use crate::core::errors::{AppError, AppResult};

/// implicit TLS(SMTPS) 포트
const SMTPS_PORT: u16 = 465;

/// 발송할 메일 한 통
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// 메일 발송 추상화
///
/// 구현체는 블로킹 호출이어도 됩니다. [`MailDispatcher`](super::MailDispatcher) 가
/// 블로킹 스레드 풀에서 실행합니다.
pub trait Mailer: Send + Sync {
    fn send(&self, message: &MailMessage) -> AppResult<()>;
}

/// SMTP 메일 발송기
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    /// 설정으로부터 SMTP 전송 객체를 구성합니다. 연결은 발송 시점에 맺어집니다.
    ///
    /// 465 포트는 implicit TLS, 그 외 포트는 STARTTLS(opportunistic) 를 사용합니다.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| AppError::MailError(format!("잘못된 발신 주소: {}", e)))?;

        let tls_parameters = TlsParameters::builder(config.smtp_host.clone())
            .dangerous_accept_invalid_certs(config.insecure_skip_verify)
            .build_rustls()
            .map_err(|e| AppError::MailError(format!("TLS 설정 실패: {}", e)))?;

        let tls = if config.smtp_port == SMTPS_PORT {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let transport = SmtpTransport::builder_dangerous(config.smtp_host.as_str())
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.from_address.clone(),
                config.from_password.clone(),
            ))
            .tls(tls)
            .timeout(Some(config.send_timeout))
            .build();

        info!("📧 SMTP 메일 발송기 구성: {}:{}", config.smtp_host, config.smtp_port);

        Ok(Self { transport, from })
    }

    fn build_message(&self, message: &MailMessage) -> AppResult<Message> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| AppError::MailError(format!("잘못된 수신 주소 {}: {}", message.to, e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| AppError::MailError(e.to_string()))
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, message: &MailMessage) -> AppResult<()> {
        let email = self.build_message(message)?;

        self.transport
            .send(&email)
            .map_err(|e| AppError::MailError(e.to_string()))?;

        Ok(())
    }
}

/// 로컬 개발용 발송기. 실제로 보내지 않고 내용을 로그로 남깁니다.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, message: &MailMessage) -> AppResult<()> {
        info!(
            "📧 [LogMailer] to={}, subject={}\n{}",
            message.to, message.subject, message.body
        );
        Ok(())
    }
}
