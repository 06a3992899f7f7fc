//! 요청 컨텍스트 미들웨어
//!
//! 요청마다 [`RequestContext`] 를 만들어 extension 에 저장하고,
//! 응답에 `X-Request-Id` 헤더를 붙입니다. 시작/종료 시점과 처리 시간을 로그로 남깁니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use log::info;

use crate::domain::models::auth::RequestContext;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Copy, Default)]
pub struct RequestContextMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestContextMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestContextService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestContextService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestContextService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestContextService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let started = Instant::now();
            let request_ctx = RequestContext::new();
            let request_id = request_ctx.request_id.clone();

            info!("[{}] → {} {}", request_id, req.method(), req.path());
            req.extensions_mut().insert(request_ctx);

            let mut res = service.call(req).await?;

            if let Ok(value) = HeaderValue::from_str(&request_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }

            let user_id = res
                .request()
                .extensions()
                .get::<RequestContext>()
                .and_then(|rc| rc.user_id.clone())
                .unwrap_or_else(|| "-".to_string());

            info!(
                "[{}] ← {} user_id={} ({:?})",
                request_id,
                res.status().as_u16(),
                user_id,
                started.elapsed()
            );
            Ok(res)
        })
    }
}
