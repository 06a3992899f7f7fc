//! 프로세스 내 캐시 저장소
//!
//! 항목마다 만료 시각을 두고, 만료된 항목은 읽을 수 없으며 접근 시점에 정리됩니다.
//! 모든 쓰기는 하나의 락 아래에서 수행되므로 일괄 쓰기는 자연스럽게 원자적입니다.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::caching::{CacheEntry, CacheError, CacheStore};

#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    expires_at: Instant,
}

impl StoredValue {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// 프로세스 내 TTL 캐시
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, StoredValue>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, StoredValue>>, CacheError> {
        self.entries
            .lock()
            .map_err(|_| CacheError::Unavailable("memory cache lock poisoned".to_string()))
    }

    /// 만료되지 않은 항목 수
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .map(|entries| entries.values().filter(|v| v.is_live(now)).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live_value<'a>(
        entries: &'a mut HashMap<String, StoredValue>,
        key: &str,
        now: Instant,
    ) -> Result<&'a mut StoredValue, CacheError> {
        let expired = entries.get(key).map(|v| !v.is_live(now)).unwrap_or(false);
        if expired {
            entries.remove(key);
        }
        entries
            .get_mut(key)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }
}

/// 남은 시간을 초 단위로 올림합니다. 방금 900초로 쓴 키는 900을 반환합니다.
fn ceil_seconds(remaining: Duration) -> u64 {
    let millis = remaining.as_millis() as u64;
    millis.div_ceil(1000)
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn set_with_expiration(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), CacheError> {
        let mut entries = self.lock()?;
        entries.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String, CacheError> {
        let mut entries = self.lock()?;
        Self::live_value(&mut entries, key, Instant::now()).map(|v| v.value.clone())
    }

    async fn get_ttl(&self, key: &str) -> Result<Option<u64>, CacheError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        let stored = Self::live_value(&mut entries, key, now)?;
        Ok(Some(ceil_seconds(stored.expires_at.saturating_duration_since(now))))
    }

    async fn get_and_refresh_expiration(
        &self,
        key: &str,
        ttl_seconds: u64,
    ) -> Result<String, CacheError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        let stored = Self::live_value(&mut entries, key, now)?;
        stored.expires_at = now + Duration::from_secs(ttl_seconds);
        Ok(stored.value.clone())
    }

    async fn set_many_atomic(&self, batch: &[CacheEntry]) -> Result<(), CacheError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        for entry in batch {
            entries.insert(
                entry.key.clone(),
                StoredValue {
                    value: entry.value.clone(),
                    expires_at: now + Duration::from_secs(entry.ttl_seconds),
                },
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_set_then_get() {
        let store = MemoryCacheStore::new();
        store.set_with_expiration("k", "v", 60).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), "v");

        store.set_with_expiration("k", "v2", 60).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), "v2");
    }

    #[actix_web::test]
    async fn test_missing_key_is_not_found() {
        let store = MemoryCacheStore::new();
        assert_eq!(
            store.get("missing").await,
            Err(CacheError::NotFound("missing".to_string()))
        );
        assert!(matches!(
            store.get_ttl("missing").await,
            Err(CacheError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_expired_entry_is_unreadable() {
        let store = MemoryCacheStore::new();
        store.set_with_expiration("k", "v", 0).await.unwrap();
        assert!(matches!(store.get("k").await, Err(CacheError::NotFound(_))));
        assert!(store.is_empty());
    }

    #[actix_web::test]
    async fn test_fresh_ttl_reports_full_duration() {
        let store = MemoryCacheStore::new();
        store.set_with_expiration("otp", "004821", 900).await.unwrap();
        assert_eq!(store.get_ttl("otp").await.unwrap(), Some(900));
    }

    #[actix_web::test]
    async fn test_refresh_resets_ttl_and_keeps_value() {
        let store = MemoryCacheStore::new();
        store.set_with_expiration("k", "v", 10).await.unwrap();

        let value = store.get_and_refresh_expiration("k", 500).await.unwrap();
        assert_eq!(value, "v");
        assert_eq!(store.get_ttl("k").await.unwrap(), Some(500));
    }

    #[actix_web::test]
    async fn test_set_many_atomic_writes_every_entry() {
        let store = MemoryCacheStore::new();
        store
            .set_many_atomic(&[
                CacheEntry::new("a", "1", 100),
                CacheEntry::new("b", "2", 200),
            ])
            .await
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").await.unwrap(), "1");
        assert_eq!(store.get_ttl("b").await.unwrap(), Some(200));
    }

    #[test]
    fn test_ceil_seconds() {
        assert_eq!(ceil_seconds(Duration::from_millis(0)), 0);
        assert_eq!(ceil_seconds(Duration::from_millis(1)), 1);
        assert_eq!(ceil_seconds(Duration::from_millis(899_999)), 900);
        assert_eq!(ceil_seconds(Duration::from_secs(870)), 870);
    }
}
