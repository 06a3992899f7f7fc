//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 시작 시 한 번 생성되어 [`AppContext`](crate::core::context::AppContext) 를 통해 공유됩니다.
//!
//! - `auth` - 토큰 생성과 캐시 기반 토큰 관리
//! - `mail` - 메일 템플릿과 백그라운드 발송
//! - `users` - 계정 워크플로

pub mod auth;
pub mod mail;
pub mod users;
