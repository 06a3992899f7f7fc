//! 캐싱 계층 모듈
//!
//! TTL 기반 키-값 저장소 추상화([`CacheStore`])와 두 가지 구현을 제공합니다.
//!
//! - [`redis::RedisCacheStore`] - Redis 백엔드 (운영)
//! - [`memory::MemoryCacheStore`] - 프로세스 내 저장소 (테스트, 로컬 개발)
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::{CacheEntry, CacheStore};
//!
//! cache.set_with_expiration("user_email_verification_|_64f1...", "004821", 900).await?;
//! let otp = cache.get("user_email_verification_|_64f1...").await?;
//!
//! cache.set_many_atomic(&[
//!     CacheEntry::new("user_auth_token_|_u1", "tok", 86400),
//!     CacheEntry::new("auth_token_user_|_tok", "u1", 86400),
//! ]).await?;
//! ```

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::errors::AppError;

/// 캐시 계층 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// 키가 없거나 만료됨
    #[error("cache key not found: {0}")]
    NotFound(String),

    /// 연결/전송 실패
    #[error("cache store unavailable: {0}")]
    Unavailable(String),
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::NotFound(_) => AppError::NotFound("Not Found".to_string()),
            CacheError::Unavailable(msg) => AppError::CacheError(msg),
        }
    }
}

/// 원자적 일괄 쓰기의 한 항목
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: String,
    pub value: String,
    pub ttl_seconds: u64,
}

impl CacheEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ttl_seconds,
        }
    }
}

/// TTL 을 지원하는 키-값 캐시 저장소
///
/// 구현체는 여러 워커에서 동시에 호출되어도 안전해야 합니다.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// 값을 저장하고 `ttl_seconds` 후 만료되도록 설정합니다. 기존 값은 덮어씁니다.
    async fn set_with_expiration(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), CacheError>;

    /// 저장된 값을 조회합니다. 없거나 만료된 경우 `NotFound`.
    async fn get(&self, key: &str) -> Result<String, CacheError>;

    /// 남은 TTL(초)을 조회합니다. 만료가 없는 키는 `None`, 키가 없으면 `NotFound`.
    async fn get_ttl(&self, key: &str) -> Result<Option<u64>, CacheError>;

    /// 값을 읽은 뒤 TTL 을 `ttl_seconds` 로 재설정합니다. 값은 변경하지 않습니다.
    async fn get_and_refresh_expiration(
        &self,
        key: &str,
        ttl_seconds: u64,
    ) -> Result<String, CacheError>;

    /// 모든 항목을 한 번에 쓰거나, 하나도 쓰지 않습니다.
    async fn set_many_atomic(&self, entries: &[CacheEntry]) -> Result<(), CacheError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_error_conversion_keeps_not_found_distinct() {
        let not_found: AppError = CacheError::NotFound("k".to_string()).into();
        assert!(not_found.is_not_found());

        let unavailable: AppError = CacheError::Unavailable("io".to_string()).into();
        assert!(matches!(unavailable, AppError::CacheError(_)));
    }
}
