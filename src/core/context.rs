//! 애플리케이션 컨텍스트
//!
//! 시작 시 한 번 구성되어 `web::Data<AppContext>` 로 모든 워커에 공유됩니다.
//! 핸들러는 extractor 로, 미들웨어는 `req.app_data()` 로 접근합니다.
//!
//! ```rust,ignore
//! let ctx = AppContext::new(cache, users, mailer, ContextOptions::from_env(&mail_config));
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .app_data(web::Data::new(ctx.clone()))
//!         .configure(configure_all_routes)
//! })
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::caching::CacheStore;
use crate::config::{MailConfig, PasswordConfig, TokenPolicy};
use crate::repositories::users::UserStore;
use crate::services::auth::TokenService;
use crate::services::mail::{MailDispatcher, Mailer};
use crate::services::users::UserService;

/// 서비스 구성 옵션
#[derive(Debug, Clone)]
pub struct ContextOptions {
    pub token_policy: TokenPolicy,
    pub bcrypt_cost: u32,
    pub mail_signature: String,
    pub mail_timeout: Duration,
}

impl ContextOptions {
    pub fn from_env(mail: &MailConfig) -> Self {
        Self {
            token_policy: TokenPolicy::standard(),
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
            mail_signature: mail.signature.clone(),
            mail_timeout: mail.send_timeout,
        }
    }
}

/// 공유 의존성 묶음
#[derive(Clone)]
pub struct AppContext {
    pub cache: Arc<dyn CacheStore>,
    pub users: Arc<dyn UserStore>,
    pub token_service: Arc<TokenService>,
    pub user_service: Arc<UserService>,
}

impl AppContext {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        users: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        options: ContextOptions,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(cache.clone(), options.token_policy));
        let user_service = Arc::new(UserService::new(
            users.clone(),
            token_service.clone(),
            MailDispatcher::new(mailer, options.mail_timeout),
            options.bcrypt_cost,
            options.mail_signature,
        ));

        Self {
            cache,
            users,
            token_service,
            user_service,
        }
    }
}
