//! 사용자 저장소
//!
//! [`UserStore`] trait 과 MongoDB / 메모리 구현을 제공합니다.
//!
//! 공통 규칙:
//! - `insert` 는 엔티티를 검증하고 생성/수정 시각을 기록한 뒤 ID 를 부여합니다.
//! - 중복 이메일은 `"email: <value> already exists in the database"` (400) 입니다.
//! - ID 문자열이 ObjectId 형식이 아니면 `"Incorrect id format"` (400) 입니다.
//! - 문서가 없으면 `"No user found"` (404) 입니다.

pub mod memory_repo;
pub mod user_repo;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::{User, UserUpdate};

pub use memory_repo::MemoryUserRepository;
pub use user_repo::UserRepository;

/// 사용자 문서 저장소
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 새 사용자를 저장하고 ID 가 부여된 엔티티를 반환합니다.
    async fn insert(&self, user: User) -> AppResult<User>;

    async fn find_by_id(&self, id: &str) -> AppResult<User>;

    async fn find_by_email(&self, email: &str) -> AppResult<User>;

    /// 변경 사항을 적용하고 갱신된 엔티티를 반환합니다.
    async fn update(&self, id: &str, changes: &UserUpdate) -> AppResult<User>;
}

pub(crate) fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::BadRequest("Incorrect id format".to_string()))
}

pub(crate) fn user_not_found() -> AppError {
    AppError::NotFound("No user found".to_string())
}

pub(crate) fn duplicate_key(field: &str, value: &str) -> AppError {
    AppError::BadRequest(format!("{}: {} already exists in the database", field, value))
}

pub(crate) fn validate_user(user: &User) -> AppResult<()> {
    user.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        assert!(parse_object_id("64f1a2b3c4d5e6f708091a2b").is_ok());
        match parse_object_id("not-an-id") {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Incorrect id format"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_key_message() {
        assert_eq!(
            duplicate_key("email", "a@b.com").to_string(),
            "email: a@b.com already exists in the database"
        );
    }
}
