//! 계정 관련 요청 DTO
//!
//! 누락된 문자열 필드는 빈 문자열로 역직렬화되며,
//! 필수 여부 검사는 각 워크플로우가 고정된 메시지로 수행합니다.

use serde::{Deserialize, Serialize};

/// 회원가입 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// 로그인 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// 이메일 인증 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    #[serde(default)]
    pub otp: String,
}

/// 비밀번호 변경 OTP 발송 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangePasswordInitiateRequest {
    #[serde(default)]
    pub email: String,
}

/// 비밀번호 변경 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub otp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: ChangePasswordRequest = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(req.email, "a@b.com");
        assert!(req.password.is_empty());
        assert!(req.otp.is_empty());
    }
}
