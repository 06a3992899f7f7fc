//! 사용자 계정 서비스 백엔드
//!
//! 이메일/비밀번호 계정, 이메일 OTP 인증, 비밀번호 변경을 제공하는 REST 서비스입니다.
//! 사용자 문서는 MongoDB 에, 인증 토큰과 OTP 는 TTL 과 함께 Redis 에 저장됩니다.
//!
//! # Features
//!
//! - **계정 관리**: 회원가입, 로그인, 미완료 요구사항 조회
//! - **이메일 인증**: 6자리 OTP 발송, 재발송 쿨다운
//! - **비밀번호 변경**: OTP 기반 복구
//! - **불투명 인증 토큰**: 사용할 때마다 만료가 연장되는 캐시 토큰
//! - **MongoDB**: 사용자 데이터 영구 저장
//! - **Redis**: 토큰/OTP 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Middlewares   │ ← 요청 컨텍스트, 토큰 인증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 계정 워크플로, 토큰, 메일
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use user_account_service::core::{AppContext, ContextOptions};
//!
//! let ctx = AppContext::new(cache, users, mailer, ContextOptions::from_env(&mail_config));
//! let token = ctx.user_service.signup(&request_ctx, request).await?;
//! ```

pub mod caching;
pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;
