//! 인증 토큰 서비스 모듈
//!
//! 인증 토큰과 OTP 는 모두 캐시에 저장되는 불투명 문자열입니다.
//! 서명이나 클레임은 없으며, 캐시에 남아 있는 동안만 유효합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let (user_id, token) = token_service.resolve_or_create_auth_token("", &bearer).await?;
//! let otp = token_service
//!     .issue_scoped_token(&user_id, TokenScope::EmailVerification, TokenKind::NumericCode)
//!     .await?;
//! ```

pub mod token_generator;
pub mod token_service;

pub use token_service::TokenService;
