//! # Redis 캐시 저장소
//!
//! [`CacheStore`] 의 Redis 구현입니다. 값은 문자열 그대로 저장합니다.
//! 시작 시 만든 [`ConnectionManager`] 하나를 복제해서 쓰므로 모든 요청이 같은
//! 멀티플렉싱 연결을 공유하며, 연결이 끊기면 자동으로 재연결합니다.
//!
//! 원자적 일괄 쓰기는 `MULTI/EXEC` 파이프라인으로 수행됩니다.

use ::redis::aio::ConnectionManager;
use ::redis::{AsyncCommands, Client, RedisError};
use async_trait::async_trait;
use log::info;

use crate::caching::{CacheEntry, CacheError, CacheStore};
use crate::config::CacheConfig;

/// Redis 캐시 저장소
#[derive(Clone)]
pub struct RedisCacheStore {
    manager: ConnectionManager,
}

impl RedisCacheStore {
    /// Redis 에 연결하고 PING 으로 서버 가용성을 확인합니다.
    ///
    /// ## 에러 케이스
    ///
    /// - Redis 서버에 연결할 수 없는 경우
    /// - 잘못된 URL 형식
    /// - 인증 실패
    pub async fn connect(config: &CacheConfig) -> Result<Self, RedisError> {
        let client = Client::open(config.url())?;

        let mut manager = ConnectionManager::new(client).await?;
        ::redis::cmd("PING").query_async::<()>(&mut manager).await?;

        info!("✅ Redis 연결 성공: {}:{}", config.host, config.port);

        Ok(Self { manager })
    }

    /// 공유 연결의 핸들. 복제는 같은 연결을 가리킵니다.
    fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

fn unavailable(err: RedisError) -> CacheError {
    CacheError::Unavailable(err.to_string())
}

/// Redis `TTL` 응답을 해석합니다. -2: 키 없음, -1: 만료 없음
fn interpret_ttl(key: &str, ttl: i64) -> Result<Option<u64>, CacheError> {
    match ttl {
        -2 => Err(CacheError::NotFound(key.to_string())),
        t if t < 0 => Ok(None),
        t => Ok(Some(t as u64)),
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn set_with_expiration(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), CacheError> {
        let mut conn = self.connection();
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds)
            .await
            .map_err(unavailable)
    }

    async fn get(&self, key: &str) -> Result<String, CacheError> {
        let mut conn = self.connection();
        let value: Option<String> = conn.get(key).await.map_err(unavailable)?;
        value.ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    async fn get_ttl(&self, key: &str) -> Result<Option<u64>, CacheError> {
        let mut conn = self.connection();
        let ttl: i64 = conn.ttl(key).await.map_err(unavailable)?;
        interpret_ttl(key, ttl)
    }

    async fn get_and_refresh_expiration(
        &self,
        key: &str,
        ttl_seconds: u64,
    ) -> Result<String, CacheError> {
        let mut conn = self.connection();
        let value: Option<String> = conn.get(key).await.map_err(unavailable)?;
        let value = value.ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        conn.expire::<_, ()>(key, ttl_seconds as i64)
            .await
            .map_err(unavailable)?;

        Ok(value)
    }

    async fn set_many_atomic(&self, entries: &[CacheEntry]) -> Result<(), CacheError> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut pipe = ::redis::pipe();
        pipe.atomic();
        for entry in entries {
            pipe.set_ex(&entry.key, &entry.value, entry.ttl_seconds).ignore();
        }

        let mut conn = self.connection();
        pipe.query_async::<()>(&mut conn).await.map_err(unavailable)
    }
}
