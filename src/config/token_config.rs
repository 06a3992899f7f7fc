//! 토큰 스코프별 TTL 정책

use crate::domain::models::token::TokenScope;

/// 스코프별 TTL 테이블과 OTP 재전송 쿨다운
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    pub user_auth_token_ttl: u64,
    pub auth_token_user_ttl: u64,
    pub email_verification_ttl: u64,
    pub change_password_ttl: u64,
    /// 이메일 인증 OTP 재전송이 허용되기까지의 최소 경과 시간 (초)
    pub resend_email_allowed_after: u64,
}

impl TokenPolicy {
    pub const fn standard() -> Self {
        Self {
            user_auth_token_ttl: 86_400,
            auth_token_user_ttl: 86_400,
            email_verification_ttl: 900,
            change_password_ttl: 86_400,
            resend_email_allowed_after: 30,
        }
    }

    /// 스코프에 설정된 TTL (초)
    pub fn ttl(&self, scope: TokenScope) -> u64 {
        match scope {
            TokenScope::UserAuthToken => self.user_auth_token_ttl,
            TokenScope::AuthTokenUser => self.auth_token_user_ttl,
            TokenScope::EmailVerification => self.email_verification_ttl,
            TokenScope::ChangePassword => self.change_password_ttl,
        }
    }

    /// 남은 TTL 기준으로 이메일 인증 OTP 재전송 허용 여부를 판단합니다.
    ///
    /// 마지막 발급 이후 쿨다운 이상 지났을 때, 즉
    /// `remaining < ttl(EmailVerification) - resend_email_allowed_after` 일 때만 허용합니다.
    /// 만료가 없는 키(`None`)는 Redis 의 `-1` 과 같이 항상 임계값 미만으로 취급합니다.
    pub fn allow_resend_email_otp(&self, remaining_ttl: Option<u64>) -> bool {
        let threshold = self
            .ttl(TokenScope::EmailVerification)
            .saturating_sub(self.resend_email_allowed_after);
        remaining_ttl.is_none_or(|remaining| remaining < threshold)
    }
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
