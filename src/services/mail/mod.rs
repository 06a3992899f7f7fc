//! 메일 발송 모듈
//!
//! - [`Mailer`] - 발송 추상화 (동기 호출, 블로킹 스레드에서 실행)
//! - [`SmtpMailer`] - `lettre` 기반 SMTP 발송
//! - [`LogMailer`] - SMTP 가 설정되지 않은 환경에서 로그로 대체
//! - [`MailDispatcher`] - 요청과 분리된 백그라운드 작업으로 발송

pub mod dispatcher;
pub mod mailer;
pub mod templates;

pub use dispatcher::MailDispatcher;
pub use mailer::{LogMailer, MailMessage, Mailer, SmtpMailer};
