//! # Configuration Module
//!
//! 서비스 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 관심사별 구조체로 묶어 제공합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, MongoDB, Redis, 패스워드 해싱 설정
//! - [`mail_config`] - SMTP 메일 발송 설정
//! - [`token_config`] - 토큰 스코프별 TTL 정책
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export SERVER_ALLOW_ORIGINS="http://localhost:3000,https://app.example.com"
//!
//! # MongoDB
//! export DATABASE_HOST="localhost"
//! export DATABASE_PORT="27017"
//! export DATABASE_NAME="user_accounts"
//!
//! # Redis
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//!
//! # SMTP
//! export EMAIL_SMTP_HOST="smtp.example.com"
//! export EMAIL_SMTP_PORT="587"
//! export EMAIL_FROM_ADDRESS="noreply@example.com"
//! export EMAIL_FROM_PASSWORD="secret"
//! export EMAIL_TLS_INSECURE_SKIP_VERIFY="false"
//! ```

pub mod data_config;
pub mod mail_config;
pub mod token_config;

pub use data_config::*;
pub use mail_config::*;
pub use token_config::*;
