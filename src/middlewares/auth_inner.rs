//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;
use log::{debug, error, warn};

use crate::core::context::AppContext;
use crate::domain::models::auth::{AuthenticatedUser, RequestContext};
use crate::utils::string_utils::bearer_token;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let Some(ctx) = req.app_data::<web::Data<AppContext>>().cloned() else {
                error!("AppContext 가 등록되지 않았습니다");
                let response = HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Internal server error" }));
                return Ok(reject(req, response));
            };

            let request_id = req
                .extensions()
                .get::<RequestContext>()
                .map(|rc| rc.request_id.clone())
                .unwrap_or_default();

            let token = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .map(bearer_token)
                .unwrap_or_default()
                .to_string();

            if token.is_empty() {
                warn!("[{}] Authorization 헤더 없음", request_id);
                let response = HttpResponse::Forbidden()
                    .json(serde_json::json!({ "message": "No Authorization headers provided" }));
                return Ok(reject(req, response));
            }

            let user_id = match ctx.token_service.resolve_or_create_auth_token("", &token).await {
                Ok((user_id, _)) if !user_id.is_empty() => user_id,
                Ok(_) => {
                    warn!("[{}] 알 수 없는 인증 토큰", request_id);
                    return Ok(reject(req, please_login()));
                }
                Err(e) => {
                    warn!("[{}] 인증 토큰 해석 실패: {}", request_id, e);
                    return Ok(reject(req, please_login()));
                }
            };

            let user = match ctx.users.find_by_id(&user_id).await {
                Ok(user) => user,
                Err(e) => {
                    warn!("[{}] 인증 사용자 조회 실패: {}", request_id, e);
                    return Ok(reject(req, e.error_response()));
                }
            };

            // 사용자 정보를 Request Extensions에 저장
            {
                let mut extensions = req.extensions_mut();
                if let Some(request_ctx) = extensions.get_mut::<RequestContext>() {
                    request_ctx.user_id = Some(user_id.clone());
                }
                extensions.insert(AuthenticatedUser(user));
            }
            debug!("[{}] 인증 성공: user_id={}", request_id, user_id);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn please_login() -> HttpResponse {
    HttpResponse::Forbidden().json(serde_json::json!({ "message": "Please login!" }))
}

fn reject<B>(req: ServiceRequest, response: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}
