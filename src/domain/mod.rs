//! 도메인 계층
//!
//! - [`entities`] - 영속 엔티티 (User)
//! - [`dto`] - HTTP 요청/응답 데이터
//! - [`models`] - 요청 단위 모델과 토큰 키

pub mod dto;
pub mod entities;
pub mod models;
