//! MongoDB 사용자 리포지토리
//!
//! `users` 컬렉션에 대한 CRUD 를 담당합니다.
//! 이메일 유일성은 애플리케이션 수준 조회가 아니라 unique 인덱스로 보장하며,
//! 중복 삽입은 드라이버의 duplicate key(11000) 에러로 감지합니다.

use async_trait::async_trait;
use log::{error, info};
use mongodb::bson::{doc, DateTime};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::users::{User, UserUpdate};
use crate::repositories::users::{
    duplicate_key, parse_object_id, user_not_found, validate_user, UserStore,
};

const COLLECTION_NAME: &str = "users";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB 사용자 리포지토리
#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<User>(COLLECTION_NAME),
        }
    }

    /// 컬렉션 인덱스를 생성합니다. 애플리케이션 시작 시 한 번 호출됩니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        // 이메일 유니크 인덱스
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        // 생성일 인덱스
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        info!("✅ users 컬렉션 인덱스 생성 완료");
        Ok(())
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, mut user: User) -> AppResult<User> {
        let now = DateTime::now();
        user.created_at = now;
        user.updated_at = now;
        validate_user(&user)?;

        let result = self.collection
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    duplicate_key("email", &user.email)
                } else {
                    error!("사용자 저장 실패: {}", e);
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError("inserted_id is not an ObjectId".to_string())
        })?;
        user.id = Some(id);

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<User> {
        let object_id = parse_object_id(id)?;

        self.collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(user_not_found)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(user_not_found)
    }

    async fn update(&self, id: &str, changes: &UserUpdate) -> AppResult<User> {
        let object_id = parse_object_id(id)?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": changes.to_set_document(DateTime::now()) },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(user_not_found)
    }
}
