//! 메일 본문 템플릿

use crate::domain::entities::users::User;
use crate::services::mail::MailMessage;

pub const EMAIL_VERIFICATION_SUBJECT: &str = "Please verify your email";
pub const CHANGE_PASSWORD_SUBJECT: &str = "OTP to change password";

/// 이메일 인증 OTP 메일
pub fn email_verification(user: &User, otp: &str, signature: &str) -> MailMessage {
    MailMessage {
        to: user.email.clone(),
        subject: EMAIL_VERIFICATION_SUBJECT.to_string(),
        body: format!(
            "Hello {} {},\n\nThe OTP to verify your email address: {}\n\n{}",
            user.given_name, user.family_name, otp, signature
        ),
    }
}

/// 비밀번호 변경 OTP 메일
pub fn change_password(user: &User, otp: &str, signature: &str) -> MailMessage {
    MailMessage {
        to: user.email.clone(),
        subject: CHANGE_PASSWORD_SUBJECT.to_string(),
        body: format!(
            "Hello {} {},\n\nThis the OTP to change password: {}\n\n{}",
            user.given_name, user.family_name, otp, signature
        ),
    }
}
