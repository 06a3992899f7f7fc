//! # 사용자 계정 서비스 구현
//!
//! 회원가입, 로그인, 이메일 인증, 비밀번호 변경 워크플로를 구현합니다.
//!
//! ## 서비스 구성
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       UserService                        │
//! │                                                          │
//! │  signup / login            → UserStore + TokenService    │
//! │  resend / verify email     → TokenService + MailDispatcher│
//! │  change password (2단계)   → UserStore + TokenService    │
//! └──────────────────────────────────────────────────────────┘
//!          │                    │                    │
//!          ▼                    ▼                    ▼
//!   ┌────────────┐      ┌──────────────┐     ┌──────────────┐
//!   │ UserStore  │      │ TokenService │     │MailDispatcher│
//!   │ (MongoDB)  │      │ (Redis)      │     │ (SMTP)       │
//!   └────────────┘      └──────────────┘     └──────────────┘
//! ```
//!
//! ## 실패 처리
//!
//! 각 단계의 실패는 그 단계의 에러를 그대로 반환하며 보상 작업은 하지 않습니다.
//! 메일 발송은 백그라운드 작업이므로 실패해도 응답에 영향을 주지 않습니다.
//! 발급된 OTP 는 그대로 유효하므로, 사용자는 쿨다운 이후 재전송으로 복구할 수 있습니다.

use std::sync::Arc;
use std::time::Instant;

use bcrypt::{hash, verify};
use log::{error, info, warn};
use mongodb::bson::DateTime;

use crate::caching::CacheError;
use crate::config::PasswordConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::dto::users::request::{
    ChangePasswordInitiateRequest, ChangePasswordRequest, LoginRequest, SignupRequest,
    VerifyEmailRequest,
};
use crate::domain::entities::users::{User, UserUpdate};
use crate::domain::models::auth::RequestContext;
use crate::domain::models::token::{TokenKind, TokenScope};
use crate::repositories::users::UserStore;
use crate::services::auth::TokenService;
use crate::services::mail::{templates, MailDispatcher};
use crate::utils::string_utils::mask_email;

/// 사용자 계정 비즈니스 로직 서비스
///
/// 모든 메서드는 요청 컨텍스트를 받아 로그를 `request_id` 로 묶습니다.
///
/// ```rust,ignore
/// let token = ctx.user_service.signup(&request_ctx, request).await?;
/// ```
pub struct UserService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    mail: MailDispatcher,
    /// bcrypt 해싱 비용
    bcrypt_cost: u32,
    /// 메일 본문 서명
    signature: String,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<TokenService>,
        mail: MailDispatcher,
        bcrypt_cost: u32,
        signature: String,
    ) -> Self {
        Self {
            users,
            tokens,
            mail,
            bcrypt_cost,
            signature,
        }
    }

    /// 새 계정을 만들고 인증 토큰을 반환합니다.
    ///
    /// # 처리 과정
    ///
    /// 1. 비밀번호 길이 검증 (8자 이상)
    /// 2. bcrypt 해싱
    /// 3. 미인증 상태로 사용자 저장 (중복 이메일은 400)
    /// 4. 이메일 인증 OTP 발급 및 백그라운드 발송
    /// 5. 인증 토큰 생성
    pub async fn signup(&self, ctx: &RequestContext, request: SignupRequest) -> AppResult<String> {
        let start_time = Instant::now();

        ensure_password_length(&request.password).inspect_err(|e| {
            warn!("[{}] 회원가입 거부: {}", ctx.request_id, e);
        })?;

        let password_hash = self.hash_password(&request.password)?;

        let user = User::new(
            request.given_name,
            request.family_name,
            request.email,
            password_hash,
        );

        let user = self.users.insert(user).await.inspect_err(|e| {
            error!("[{}] 사용자 저장 실패: {}", ctx.request_id, e);
        })?;
        let user_id = saved_user_id(&user)?;

        self.send_email_verification_otp(ctx, &user_id, &user).await?;

        let (_, token) = self
            .tokens
            .resolve_or_create_auth_token(&user_id, "")
            .await
            .inspect_err(|e| error!("[{}] 인증 토큰 생성 실패: {}", ctx.request_id, e))?;

        info!(
            "[{}] ✅ 회원가입 완료: user_id={} ({:?})",
            ctx.request_id,
            user_id,
            start_time.elapsed()
        );
        Ok(token)
    }

    /// 이메일/비밀번호로 로그인하고 인증 토큰을 반환합니다.
    ///
    /// 존재하지 않는 이메일은 404, 비밀번호 불일치는 400 입니다.
    pub async fn login(&self, ctx: &RequestContext, request: LoginRequest) -> AppResult<String> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await
            .inspect_err(|e| warn!("[{}] 로그인 사용자 조회 실패: {}", ctx.request_id, e))?;

        if !verify(&request.password, &user.password_hash).unwrap_or(false) {
            warn!("[{}] 비밀번호 불일치: {}", ctx.request_id, mask_email(&request.email));
            return Err(AppError::BadRequest(
                "User login password verification failed".to_string(),
            ));
        }

        let user_id = saved_user_id(&user)?;
        let (_, token) = self
            .tokens
            .resolve_or_create_auth_token(&user_id, "")
            .await
            .inspect_err(|e| error!("[{}] 인증 토큰 생성 실패: {}", ctx.request_id, e))?;

        info!("[{}] 로그인 성공: user_id={}", ctx.request_id, user_id);
        Ok(token)
    }

    /// 이메일 인증 OTP 를 다시 보냅니다.
    ///
    /// 마지막 발급 후 쿨다운(30초)이 지나지 않았으면 거부합니다.
    /// 기존 OTP 가 없거나 만료된 경우에는 바로 허용합니다.
    pub async fn resend_email_verification_otp(
        &self,
        ctx: &RequestContext,
        user: &User,
    ) -> AppResult<()> {
        if user.is_verified() {
            return Err(AppError::BadRequest("User email already verified".to_string()));
        }
        let user_id = saved_user_id(user)?;

        let allowed = match self
            .tokens
            .scoped_token_ttl(&user_id, TokenScope::EmailVerification)
            .await
        {
            Ok(remaining) => self.tokens.policy().allow_resend_email_otp(remaining),
            Err(CacheError::NotFound(_)) => true,
            Err(e) => {
                error!("[{}] OTP TTL 조회 실패: {}", ctx.request_id, e);
                return Err(e.into());
            }
        };

        if !allowed {
            warn!("[{}] OTP 재전송 쿨다운: user_id={}", ctx.request_id, user_id);
            return Err(AppError::BadRequest("Resend email otp not allowed".to_string()));
        }

        self.send_email_verification_otp(ctx, &user_id, user).await
    }

    /// OTP 를 확인하고 사용자를 인증 완료 상태로 바꿉니다.
    pub async fn verify_email(
        &self,
        ctx: &RequestContext,
        user: &User,
        request: VerifyEmailRequest,
    ) -> AppResult<User> {
        if request.otp.is_empty() {
            return Err(AppError::BadRequest("OTP not present in request".to_string()));
        }
        if user.is_verified() {
            return Err(AppError::BadRequest("User email already verified".to_string()));
        }
        let user_id = saved_user_id(user)?;

        self.check_otp(ctx, &user_id, TokenScope::EmailVerification, &request.otp)
            .await?;

        let updated = self
            .users
            .update(&user_id, &UserUpdate::mark_verified(DateTime::now()))
            .await
            .inspect_err(|e| error!("[{}] 인증 상태 갱신 실패: {}", ctx.request_id, e))?;

        info!("[{}] ✅ 이메일 인증 완료: user_id={}", ctx.request_id, user_id);
        Ok(updated)
    }

    /// 비밀번호 변경 OTP 를 이메일로 보냅니다. 인증이 필요 없는 복구 진입점입니다.
    pub async fn initiate_change_password(
        &self,
        ctx: &RequestContext,
        request: ChangePasswordInitiateRequest,
    ) -> AppResult<()> {
        if request.email.is_empty() {
            return Err(AppError::BadRequest("Email not provided".to_string()));
        }

        let user = self.users.find_by_email(&request.email).await?;
        let user_id = saved_user_id(&user)?;

        let otp = self
            .tokens
            .issue_scoped_token(&user_id, TokenScope::ChangePassword, TokenKind::NumericCode)
            .await?;

        self.mail.dispatch(
            ctx.request_id.clone(),
            templates::change_password(&user, &otp, &self.signature),
        );

        info!("[{}] 비밀번호 변경 OTP 발송 요청: user_id={}", ctx.request_id, user_id);
        Ok(())
    }

    /// OTP 를 확인하고 새 비밀번호를 저장합니다.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        request: ChangePasswordRequest,
    ) -> AppResult<()> {
        if request.email.is_empty() || request.password.is_empty() || request.otp.is_empty() {
            return Err(AppError::BadRequest(
                "Email or Password or OTP not provided".to_string(),
            ));
        }

        let user = self.users.find_by_email(&request.email).await?;
        let user_id = saved_user_id(&user)?;

        self.check_otp(ctx, &user_id, TokenScope::ChangePassword, &request.otp)
            .await?;

        ensure_password_length(&request.password)?;
        let password_hash = self.hash_password(&request.password)?;

        self.users
            .update(&user_id, &UserUpdate::password(password_hash))
            .await
            .inspect_err(|e| error!("[{}] 비밀번호 갱신 실패: {}", ctx.request_id, e))?;

        info!("[{}] ✅ 비밀번호 변경 완료: user_id={}", ctx.request_id, user_id);
        Ok(())
    }

    async fn send_email_verification_otp(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        user: &User,
    ) -> AppResult<()> {
        let otp = self
            .tokens
            .issue_scoped_token(user_id, TokenScope::EmailVerification, TokenKind::NumericCode)
            .await
            .inspect_err(|e| error!("[{}] 이메일 인증 OTP 발급 실패: {}", ctx.request_id, e))?;

        self.mail.dispatch(
            ctx.request_id.clone(),
            templates::email_verification(user, &otp, &self.signature),
        );
        Ok(())
    }

    /// 저장된 OTP 와 정확히 일치하는지 확인합니다. 없거나 만료된 경우도 `InvalidOtp`.
    async fn check_otp(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        scope: TokenScope,
        otp: &str,
    ) -> AppResult<()> {
        match self.tokens.read_scoped_token(user_id, scope).await {
            Ok(stored) if stored == otp => Ok(()),
            Ok(_) | Err(CacheError::NotFound(_)) => {
                warn!("[{}] OTP 불일치 ({}): user_id={}", ctx.request_id, scope, user_id);
                Err(AppError::InvalidOtp)
            }
            Err(e) => {
                error!("[{}] OTP 조회 실패: {}", ctx.request_id, e);
                Err(e.into())
            }
        }
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let hash_start = Instant::now();
        let password_hash = hash(password, self.bcrypt_cost).context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());
        Ok(password_hash)
    }
}

fn ensure_password_length(password: &str) -> AppResult<()> {
    if password.chars().count() < PasswordConfig::MIN_LENGTH {
        return Err(AppError::BadRequest(
            "Password length less than 8 characters".to_string(),
        ));
    }
    Ok(())
}

fn saved_user_id(user: &User) -> AppResult<String> {
    user.id_string()
        .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))
}
