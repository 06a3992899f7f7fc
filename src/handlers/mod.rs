//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Middlewares - 요청 컨텍스트, 인증              ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리
//! ├─────────────────────────────────────────────┤
//!   Services - 계정 워크플로, 토큰                 ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   UserStore / CacheStore - 데이터 접근           ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 핸들러는 `web::Data<AppContext>` 에서 서비스를 꺼내 쓰고,
//! `Result<HttpResponse, AppError>` 를 반환하여 에러를 `?` 로 전파합니다.

pub mod users;
