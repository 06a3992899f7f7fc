//! 사용자 계정 서비스 모듈
//!
//! 회원가입, 로그인, 이메일 인증, 비밀번호 변경 워크플로를 제공합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (환경별 cost)
//! - unique 인덱스 기반 이메일 중복 방지
//! - OTP 는 스코프별로 분리되어 저장

pub mod user_service;

pub use user_service::UserService;
