//! API 라우트 설정 모듈
//!
//! 계정 엔드포인트(`/api/v1/user`)와 헬스체크 엔드포인트를 등록합니다.
//!
//! # Auth Middleware Usage
//!
//! 보호가 필요한 핸들러는 스코프가 아니라 핸들러 단위로 미들웨어를 적용합니다.
//!
//! ```rust,ignore
//! #[get("/pending-requirements", wrap = "AuthMiddleware::new()")]
//! pub async fn pending_requirements(user: AuthenticatedUser, ...) -> HttpResponse { ... }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::{error, web, HttpResponse};
use serde_json::json;

use crate::core::errors::AppError;
use crate::handlers;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_user_routes(cfg);
}

/// 계정 관련 라우트를 설정합니다
///
/// ## Public 라우트
/// - `GET /api/v1/user/signup-form-fields`
/// - `POST /api/v1/user/signup`
/// - `POST /api/v1/user/login`
/// - `POST /api/v1/user/change-password-initiate`
/// - `POST /api/v1/user/change-password`
///
/// ## Protected 라우트 (Authorization 헤더 필요)
/// - `POST /api/v1/user/verify-email`
/// - `POST /api/v1/user/resend-email-verification-otp`
/// - `GET /api/v1/user/pending-requirements`
///
/// ```bash
/// curl -X GET http://localhost:8080/api/v1/user/pending-requirements \
///   -H "Authorization: 3f2a9c0d5e..."
/// ```
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/user")
            .app_data(json_config())
            .service(handlers::users::signup_form)
            .service(handlers::users::signup)
            .service(handlers::users::login)
            .service(handlers::users::verify_email)
            .service(handlers::users::resend_email_verification_otp)
            .service(handlers::users::pending_requirements)
            .service(handlers::users::change_password_initiate)
            .service(handlers::users::change_password),
    );
}

/// 요청 본문 파싱 실패를 `{"error": "..."}` 400 응답으로 바꿉니다.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            error::JsonPayloadError::ContentType => "Content type error".to_string(),
            other => other.to_string(),
        };
        AppError::BadRequest(message).into()
    })
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "user_account_service",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z",
///   "features": { "database": "MongoDB", "cache": "Redis", "mail": "SMTP" }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "user_account_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "mail": "SMTP"
        }
    }))
}
