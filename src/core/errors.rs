//! # Application Error Handling System
//!
//! 서비스 전역에서 사용하는 에러 타입입니다.
//! `thiserror`로 `Error` trait을 구현하고, `actix_web::ResponseError`를 구현하여
//! 핸들러에서 `?` 로 전파된 에러가 그대로 HTTP 응답으로 변환됩니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `BadRequest` | 400 Bad Request | 잘못된 입력, 중복 이메일, 잘못된 ID 형식 |
//! | `ValidationError` | 400 Bad Request | `validator` 검증 실패 |
//! | `InvalidOtp` | 400 Bad Request | OTP 불일치 또는 만료 |
//! | `Forbidden` | 403 Forbidden | 인증되지 않은 요청 |
//! | `NotFound` | 404 Not Found | 문서 또는 캐시 항목 없음 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `CacheError` | 500 Internal Server Error | Redis 오류 |
//! | `MailError` | 500 Internal Server Error | 메일 전송 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! 500 계열 에러는 클라이언트에게 일반 메시지만 노출하고, 원인은 로그로만 남깁니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn signup(req: SignupRequest) -> AppResult<String> {
//!     if req.password.chars().count() < 8 {
//!         return Err(AppError::BadRequest("Password length less than 8 characters".to_string()));
//!     }
//!     // ...
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 잘못된 요청 (400 Bad Request)
    #[error("{0}")]
    BadRequest(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("{0}")]
    ValidationError(String),

    /// OTP 불일치 또는 만료 (400 Bad Request)
    #[error("Invalid OTP")]
    InvalidOtp,

    /// 인증 실패 (403 Forbidden)
    #[error("{0}")]
    Forbidden(String),

    /// 리소스 없음 (404 Not Found)
    #[error("{0}")]
    NotFound(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 캐시 저장소 관련 에러 (500 Internal Server Error)
    #[error("Cache error: {0}")]
    CacheError(String),

    /// 메일 전송 에러 (500 Internal Server Error)
    #[error("Mail error: {0}")]
    MailError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러 종류에 대응하는 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::ValidationError(_) | AppError::InvalidOtp => {
                StatusCode::BAD_REQUEST
            }
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::CacheError(_)
            | AppError::MailError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 클라이언트에게 노출할 메시지
    ///
    /// 인프라 계층 에러의 상세 내용은 숨깁니다.
    pub fn public_message(&self) -> String {
        match self {
            AppError::DatabaseError(_) => "Internal server error".to_string(),
            AppError::CacheError(_) => "Internal Server Error. Please try again later.".to_string(),
            AppError::MailError(_) | AppError::InternalError(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status())
            .json(serde_json::json!({
                "error": self.public_message()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 `InternalError` 로 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
