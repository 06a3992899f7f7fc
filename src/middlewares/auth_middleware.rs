//! 인증 토큰 미들웨어
//!
//! Authorization 헤더의 불투명 토큰을 캐시에서 사용자 ID 로 되돌리고,
//! 사용자를 조회해 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser) 로
//! 요청 extension 에 저장합니다.
//!
//! 요청마다 다시 평가되며, 통과한 요청은 토큰 TTL 을 갱신합니다 (sliding expiration).
//!
//! | 상황 | 응답 |
//! |------|------|
//! | 헤더 없음 / 빈 값 | 403 `{"message":"No Authorization headers provided"}` |
//! | 토큰 해석 실패 / 알 수 없는 토큰 | 403 `{"message":"Please login!"}` |
//! | 사용자 조회 실패 | 저장소 에러의 상태 코드 |
//!
//! ```rust,ignore
//! #[post("/verify-email", wrap = "AuthMiddleware::new()")]
//! async fn verify_email(user: AuthenticatedUser, ...) -> Result<HttpResponse, AppError> { ... }
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 필수 인증 미들웨어
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthMiddleware;

impl AuthMiddleware {
    pub fn new() -> Self {
        Self
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
