//! 프로세스 내 사용자 저장소
//!
//! MongoDB 없이 로컬 개발과 테스트에서 사용합니다.
//! unique 인덱스와 같은 규칙으로 이메일 중복을 거부합니다.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::{User, UserUpdate};
use crate::repositories::users::{
    duplicate_key, parse_object_id, user_not_found, validate_user, UserStore,
};

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<ObjectId, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, HashMap<ObjectId, User>>> {
        self.users
            .lock()
            .map_err(|_| AppError::DatabaseError("user store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserStore for MemoryUserRepository {
    async fn insert(&self, mut user: User) -> AppResult<User> {
        let now = DateTime::now();
        user.created_at = now;
        user.updated_at = now;
        validate_user(&user)?;

        let mut users = self.lock()?;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(duplicate_key("email", &user.email));
        }

        let id = ObjectId::new();
        user.id = Some(id);
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<User> {
        let object_id = parse_object_id(id)?;

        self.lock()?
            .get(&object_id)
            .cloned()
            .ok_or_else(user_not_found)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        self.lock()?
            .values()
            .find(|user| user.email == email)
            .cloned()
            .ok_or_else(user_not_found)
    }

    async fn update(&self, id: &str, changes: &UserUpdate) -> AppResult<User> {
        let object_id = parse_object_id(id)?;

        let mut users = self.lock()?;
        let user = users.get_mut(&object_id).ok_or_else(user_not_found)?;
        changes.apply(user, DateTime::now());

        Ok(user.clone())
    }
}
