//! 캐시 기반 토큰 관리 서비스
//!
//! 스코프별 토큰(OTP 등) 발급/조회와, 인증 토큰의 양방향 매핑을 담당합니다.
//!
//! 인증 세션은 별도 엔티티 없이 두 개의 캐시 레코드로 표현됩니다.
//!
//! ```text
//! user_auth_token_|_<userId>  →  <token>
//! auth_token_user_|_<token>   →  <userId>
//! ```
//!
//! 두 레코드는 항상 하나의 원자적 배치로 함께 기록되며, 기록할 때마다 TTL 이
//! 초기화되므로 인증 토큰은 사용할수록 만료가 늦춰지는 sliding expiration 자격 증명이 됩니다.

use std::sync::Arc;

use log::{debug, error};

use crate::caching::{CacheEntry, CacheError, CacheStore};
use crate::config::TokenPolicy;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::token::{ScopedKey, TokenKind, TokenScope};
use crate::services::auth::token_generator;

/// 스코프 토큰 서비스
pub struct TokenService {
    cache: Arc<dyn CacheStore>,
    policy: TokenPolicy,
}

impl TokenService {
    pub fn new(cache: Arc<dyn CacheStore>, policy: TokenPolicy) -> Self {
        Self { cache, policy }
    }

    pub fn policy(&self) -> &TokenPolicy {
        &self.policy
    }

    /// 새 토큰을 생성해 `(scope, user_id)` 키에 스코프 TTL 로 저장하고 반환합니다.
    ///
    /// 같은 키의 기존 토큰은 덮어씁니다.
    pub async fn issue_scoped_token(
        &self,
        user_id: &str,
        scope: TokenScope,
        kind: TokenKind,
    ) -> AppResult<String> {
        let token = token_generator::generate(kind);
        let key = ScopedKey::new(scope, user_id).to_string();

        self.cache
            .set_with_expiration(&key, &token, self.policy.ttl(scope))
            .await
            .map_err(|e| {
                error!("토큰 저장 실패 ({}): {}", scope, e);
                AppError::from(e)
            })?;

        debug!("토큰 발급: scope={}, user_id={}", scope, user_id);
        Ok(token)
    }

    /// `(scope, user_id)` 에 저장된 토큰을 조회합니다.
    ///
    /// 없거나 만료된 경우 [`CacheError::NotFound`] 를 그대로 돌려주어
    /// 호출자가 "발급된 적 없음/만료" 와 전송 오류를 구분할 수 있게 합니다.
    pub async fn read_scoped_token(
        &self,
        user_id: &str,
        scope: TokenScope,
    ) -> Result<String, CacheError> {
        let key = ScopedKey::new(scope, user_id).to_string();
        self.cache.get(&key).await
    }

    /// `(scope, user_id)` 토큰의 남은 TTL (초). 만료가 없는 키는 `None`.
    pub async fn scoped_token_ttl(
        &self,
        user_id: &str,
        scope: TokenScope,
    ) -> Result<Option<u64>, CacheError> {
        let key = ScopedKey::new(scope, user_id).to_string();
        self.cache.get_ttl(&key).await
    }

    /// 사용자 ID 와 인증 토큰 중 하나로부터 나머지를 찾아내고, 양방향 매핑을 갱신합니다.
    ///
    /// - 둘 다 비어 있으면 `BadRequest` 이며 아무것도 기록하지 않습니다.
    /// - 토큰이 비어 있으면 `user_auth_token` 에서 찾고, 없으면 새로 만듭니다.
    /// - 사용자 ID 가 비어 있으면 `auth_token_user` 에서 찾습니다.
    /// - 토큰으로 사용자를 찾지 못하면 빈 사용자 ID 를 돌려주며 아무것도 기록하지 않습니다.
    ///   이 경우 호출자는 인증 실패로 처리합니다.
    ///
    /// 조회 결과가 없는 것은 에러가 아니지만, 저장소 장애는 그대로 전파됩니다.
    pub async fn resolve_or_create_auth_token(
        &self,
        user_id: &str,
        token: &str,
    ) -> AppResult<(String, String)> {
        if user_id.is_empty() && token.is_empty() {
            return Err(AppError::BadRequest("Missing user_id and token".to_string()));
        }

        let mut user_id = user_id.to_string();
        let mut token = token.to_string();

        if token.is_empty() {
            token = self
                .lookup(ScopedKey::new(TokenScope::UserAuthToken, user_id.as_str()))
                .await?
                .unwrap_or_default();
        }

        if user_id.is_empty() {
            user_id = self
                .lookup(ScopedKey::new(TokenScope::AuthTokenUser, token.as_str()))
                .await?
                .unwrap_or_default();

            if user_id.is_empty() {
                debug!("알 수 없는 인증 토큰");
                return Ok((user_id, token));
            }
        }

        if token.is_empty() {
            token = token_generator::generate(TokenKind::OpaqueId);
            debug!("새 인증 토큰 생성: user_id={}", user_id);
        }

        let entries = [
            CacheEntry::new(
                ScopedKey::new(TokenScope::UserAuthToken, user_id.as_str()).to_string(),
                token.as_str(),
                self.policy.ttl(TokenScope::UserAuthToken),
            ),
            CacheEntry::new(
                ScopedKey::new(TokenScope::AuthTokenUser, token.as_str()).to_string(),
                user_id.as_str(),
                self.policy.ttl(TokenScope::AuthTokenUser),
            ),
        ];

        self.cache.set_many_atomic(&entries).await.map_err(|e| {
            error!("인증 토큰 매핑 저장 실패: {}", e);
            AppError::from(e)
        })?;

        Ok((user_id, token))
    }

    async fn lookup(&self, key: ScopedKey) -> AppResult<Option<String>> {
        match self.cache.get(&key.to_string()).await {
            Ok(value) => Ok(Some(value)),
            Err(CacheError::NotFound(_)) => Ok(None),
            Err(e) => {
                error!("캐시 조회 실패 ({}): {}", key.scope, e);
                Err(e.into())
            }
        }
    }
}
