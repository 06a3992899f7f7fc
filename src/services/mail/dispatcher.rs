//! 백그라운드 메일 발송
//!
//! 발송 작업은 요청 처리와 분리되어 실행됩니다. 핸들러는 발송 완료를 기다리지 않고 응답하며,
//! 작업은 요청 ID 사본과 자체 타임아웃을 가집니다. 실패는 로그로만 남기고 재시도하지 않습니다.

use std::sync::Arc;
use std::time::Duration;

use actix_web::rt;
use log::{error, info, warn};

use crate::services::mail::{MailMessage, Mailer};

#[derive(Clone)]
pub struct MailDispatcher {
    mailer: Arc<dyn Mailer>,
    timeout: Duration,
}

impl MailDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>, timeout: Duration) -> Self {
        Self { mailer, timeout }
    }

    /// 메일 한 통을 백그라운드 작업으로 보냅니다.
    ///
    /// 반환된 핸들은 기다리지 않아도 됩니다.
    pub fn dispatch(&self, request_id: String, message: MailMessage) -> rt::task::JoinHandle<()> {
        let mailer = self.mailer.clone();
        let timeout = self.timeout;

        rt::spawn(async move {
            let to = message.to.clone();
            let subject = message.subject.clone();
            let send = rt::task::spawn_blocking(move || mailer.send(&message));

            match rt::time::timeout(timeout, send).await {
                Ok(Ok(Ok(()))) => info!("[{}] 📧 메일 발송 완료: {} ({})", request_id, to, subject),
                Ok(Ok(Err(e))) => error!("[{}] 메일 발송 실패: {} ({}): {}", request_id, to, subject, e),
                Ok(Err(e)) => error!("[{}] 메일 발송 작업 실패: {}: {}", request_id, to, e),
                Err(_) => warn!(
                    "[{}] 메일 발송 시간 초과 ({}초): {}",
                    request_id,
                    timeout.as_secs(),
                    to
                ),
            }
        })
    }
}
