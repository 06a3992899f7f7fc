use serde::{Deserialize, Serialize};

/// 로그인/회원가입 성공 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
}

impl TokenResponse {
    pub fn login_successful(token: String) -> Self {
        Self {
            message: "User login successful".to_string(),
            token,
        }
    }
}

/// 단순 메시지 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 미완료 계정 요구사항 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRequirementsResponse {
    pub requirements: Vec<String>,
}
