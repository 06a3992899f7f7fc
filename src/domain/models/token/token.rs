//! 스코프 기반 캐시 토큰 키
//!
//! 같은 subject(사용자 ID 또는 토큰 값)라도 용도(scope)별로 독립된 값을 가질 수 있도록
//! 캐시 키를 `"<scope>_|_<subject>"` 형식으로 네임스페이스화합니다.

use std::fmt;

/// 스코프 구분자
pub const SCOPE_SEPARATOR: &str = "_|_";

/// 캐시 토큰의 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenScope {
    /// 사용자 ID → 인증 토큰
    UserAuthToken,
    /// 인증 토큰 → 사용자 ID
    AuthTokenUser,
    /// 사용자 ID → 이메일 인증 OTP
    EmailVerification,
    /// 사용자 ID → 비밀번호 변경 OTP
    ChangePassword,
}

impl TokenScope {
    pub const ALL: [TokenScope; 4] = [
        TokenScope::UserAuthToken,
        TokenScope::AuthTokenUser,
        TokenScope::EmailVerification,
        TokenScope::ChangePassword,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenScope::UserAuthToken => "user_auth_token",
            TokenScope::AuthTokenUser => "auth_token_user",
            TokenScope::EmailVerification => "user_email_verification",
            TokenScope::ChangePassword => "user_change_password",
        }
    }
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 토큰 생성 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// 추측 불가능한 긴 식별자 (인증 토큰)
    OpaqueId,
    /// 6자리 숫자 코드 (OTP)
    NumericCode,
}

/// (scope, subject) 복합 캐시 키
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopedKey {
    pub scope: TokenScope,
    pub subject: String,
}

impl ScopedKey {
    pub fn new(scope: TokenScope, subject: impl Into<String>) -> Self {
        Self {
            scope,
            subject: subject.into(),
        }
    }
}

impl fmt::Display for ScopedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.scope, SCOPE_SEPARATOR, self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_format() {
        let key = ScopedKey::new(TokenScope::EmailVerification, "64f1c0ffee");
        assert_eq!(key.to_string(), "user_email_verification_|_64f1c0ffee");
    }

    #[test]
    fn test_same_subject_different_scope_never_collides() {
        let keys: HashSet<String> = TokenScope::ALL
            .iter()
            .map(|scope| ScopedKey::new(*scope, "same-subject").to_string())
            .collect();
        assert_eq!(keys.len(), TokenScope::ALL.len());
    }

    #[test]
    fn test_serialized_keys_are_injective() {
        let subjects = [
            "",
            "u1",
            "u2",
            "_|_",
            "u1_|_x",
            "user_auth_token",
            "9f86d081884c7d659a2feaa0c55ad015",
            "000034",
        ];

        let mut seen = HashSet::new();
        for scope in TokenScope::ALL {
            for subject in subjects {
                assert!(
                    seen.insert(ScopedKey::new(scope, subject).to_string()),
                    "duplicate key for {:?}/{:?}",
                    scope,
                    subject
                );
            }
        }
        assert_eq!(seen.len(), TokenScope::ALL.len() * subjects.len());
    }

    #[test]
    fn test_equal_scope_and_subject_collide() {
        assert_eq!(
            ScopedKey::new(TokenScope::ChangePassword, "u1").to_string(),
            ScopedKey::new(TokenScope::ChangePassword, "u1").to_string()
        );
    }
}
