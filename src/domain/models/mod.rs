//! 도메인 모델
//!
//! 영속화되지 않는 요청 단위 모델과 토큰 키 모델을 정의합니다.
//!
//! - [`auth`] - 인증된 사용자, 요청 컨텍스트
//! - [`token`] - 스코프 기반 캐시 키

pub mod auth;
pub mod token;
