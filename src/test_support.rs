//! 테스트 공용 구성 요소
//!
//! 메모리 캐시, 메모리 사용자 저장소, 발송 기록용 메일러로 [`AppContext`] 를 구성합니다.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::rt;

use crate::caching::memory::MemoryCacheStore;
use crate::config::TokenPolicy;
use crate::core::context::{AppContext, ContextOptions};
use crate::core::errors::AppResult;
use crate::repositories::users::MemoryUserRepository;
use crate::services::mail::{MailMessage, Mailer};

/// 보낸 메일을 기록만 하는 메일러
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// 백그라운드 발송이 `count` 통에 도달할 때까지 기다립니다.
    pub async fn wait_for(&self, count: usize) -> Vec<MailMessage> {
        for _ in 0..300 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            rt::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {} mails, got {:?}", count, self.sent());
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, message: &MailMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub struct TestContext {
    pub app: AppContext,
    pub cache: Arc<MemoryCacheStore>,
    pub users: Arc<MemoryUserRepository>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestContext {
    pub fn new() -> Self {
        let cache = Arc::new(MemoryCacheStore::new());
        let users = Arc::new(MemoryUserRepository::new());
        let mailer = Arc::new(RecordingMailer::default());

        let app = AppContext::new(
            cache.clone(),
            users.clone(),
            mailer.clone(),
            ContextOptions {
                token_policy: TokenPolicy::standard(),
                bcrypt_cost: 4,
                mail_signature: "Regards".to_string(),
                mail_timeout: Duration::from_secs(5),
            },
        );

        Self {
            app,
            cache,
            users,
            mailer,
        }
    }
}
