//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 1. 요청 컨텍스트 미들웨어 (RequestContextMiddleware)
//! - 요청 ID 발급 및 `X-Request-Id` 응답 헤더
//! - 요청 시작/종료 로그
//!
//! ### 2. 인증 미들웨어 (AuthMiddleware)
//! - Authorization 헤더의 불투명 토큰 해석
//! - 사용자 정보를 request extension 에 저장
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(RequestContextMiddleware)
//!     .service(
//!         web::scope("/api/v1/user")
//!             .service(verify_email) // #[post("/verify-email", wrap = "AuthMiddleware::new()")]
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;
pub mod request_context;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
pub use request_context::RequestContextMiddleware;
