//! User Entity Implementation
//!
//! 사용자 계정 엔티티입니다. 이메일/패스워드 기반 로컬 계정만 지원하며,
//! 이메일 인증 여부를 `status` 로 관리합니다.

use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 이메일 인증 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Unverified,
    Verified,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Unverified => "UNVERIFIED",
            UserStatus::Verified => "VERIFIED",
        }
    }
}

/// 사용자 엔티티
///
/// `id` 는 저장소가 생성 시 부여하며 이후 변경되지 않습니다.
/// `email` 은 전체 사용자 사이에서 유일합니다 (unique 인덱스).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    /// 사용자 이메일 (unique)
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// bcrypt 해시된 비밀번호
    #[serde(rename = "password")]
    #[validate(length(min = 1, message = "Password hash is required"))]
    pub password_hash: String,
    #[serde(default)]
    pub status: UserStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime>,
}

impl User {
    /// 새 미인증 사용자 생성
    pub fn new(given_name: String, family_name: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            given_name,
            family_name,
            email,
            password_hash,
            status: UserStatus::Unverified,
            created_at: now,
            updated_at: now,
            verified_at: None,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_verified(&self) -> bool {
        self.status == UserStatus::Verified
    }

    /// 아직 완료되지 않은 계정 요구사항 목록
    pub fn pending_requirements(&self) -> Vec<&'static str> {
        let mut requirements = Vec::new();
        if self.status == UserStatus::Unverified {
            requirements.push("email");
        }
        requirements
    }
}

/// 사용자 부분 수정 내용
///
/// 지정된 필드만 변경하며, 적용 시 `updated_at` 은 항상 갱신됩니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub password_hash: Option<String>,
    pub status: Option<UserStatus>,
    pub verified_at: Option<DateTime>,
}

impl UserUpdate {
    /// 이메일 인증 완료 처리
    pub fn mark_verified(at: DateTime) -> Self {
        Self {
            status: Some(UserStatus::Verified),
            verified_at: Some(at),
            ..Self::default()
        }
    }

    pub fn password(password_hash: String) -> Self {
        Self {
            password_hash: Some(password_hash),
            ..Self::default()
        }
    }

    /// MongoDB `$set` 문서
    pub fn to_set_document(&self, updated_at: DateTime) -> Document {
        let mut set = doc! { "updated_at": updated_at };
        if let Some(hash) = &self.password_hash {
            set.insert("password", hash.clone());
        }
        if let Some(status) = self.status {
            set.insert("status", status.as_str());
        }
        if let Some(verified_at) = self.verified_at {
            set.insert("verified_at", verified_at);
        }
        set
    }

    /// 메모리 상의 엔티티에 적용
    pub fn apply(&self, user: &mut User, updated_at: DateTime) {
        if let Some(hash) = &self.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(status) = self.status {
            user.status = status;
        }
        if let Some(verified_at) = self.verified_at {
            user.verified_at = Some(verified_at);
        }
        user.updated_at = updated_at;
    }
}
