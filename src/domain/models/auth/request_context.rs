//! 요청 단위 컨텍스트
//!
//! 요청마다 한 번 생성되어 extension 에 저장되는 타입 있는 값입니다.
//! 로그 상관관계를 위한 `request_id` 와, 인증 이후 채워지는 `user_id` 를 담습니다.

use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: String,
    pub user_id: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            user_id: None,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 미들웨어가 등록되지 않은 경로에서는 새 컨텍스트를 만들어 돌려줍니다.
impl FromRequest for RequestContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let ctx = req
            .extensions()
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default();
        ready(Ok(ctx))
    }
}
