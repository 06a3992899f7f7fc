//! # User Account HTTP Handlers
//!
//! `/api/v1/user` 아래의 계정 엔드포인트를 처리하는 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `GET` | `/signup-form-fields` | - | 회원가입 폼 메타데이터 |
//! | `POST` | `/signup` | - | 계정 생성, 인증 토큰 반환 |
//! | `POST` | `/login` | - | 로그인, 인증 토큰 반환 |
//! | `POST` | `/verify-email` | 필요 | OTP 확인 후 인증 완료 처리 |
//! | `POST` | `/resend-email-verification-otp` | 필요 | 쿨다운 이후 OTP 재발송 |
//! | `GET` | `/pending-requirements` | 필요 | 미완료 요구사항 목록 |
//! | `POST` | `/change-password-initiate` | - | 비밀번호 변경 OTP 발송 |
//! | `POST` | `/change-password` | - | OTP 확인 후 비밀번호 변경 |
//!
//! 인증이 필요한 엔드포인트는 `wrap = "AuthMiddleware::new()"` 로 보호되며,
//! 핸들러는 [`AuthenticatedUser`] extractor 로 사용자를 받습니다.
//!
//! 모든 에러는 [`AppError`] 로 전파되어 `{"error": "..."}` 응답으로 변환됩니다.

use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::core::context::AppContext;
use crate::core::errors::AppError;
use crate::domain::dto::users::request::{
    signup_form_fields, ChangePasswordInitiateRequest, ChangePasswordRequest, LoginRequest,
    SignupRequest, VerifyEmailRequest,
};
use crate::domain::dto::users::response::{
    MessageResponse, PendingRequirementsResponse, TokenResponse,
};
use crate::domain::models::auth::{AuthenticatedUser, RequestContext};
use crate::middlewares::AuthMiddleware;

/// 회원가입 폼 필드 메타데이터
///
/// ```json
/// { "fields": { "email": { "form_field_type": "email", "display_name": "Email" }, ... } }
/// ```
#[get("/signup-form-fields")]
pub async fn signup_form() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "fields": signup_form_fields() }))
}

/// 회원가입 핸들러
///
/// 미인증 상태의 계정을 만들고, 인증 OTP 메일을 백그라운드로 보낸 뒤
/// 바로 사용할 수 있는 인증 토큰을 반환합니다.
///
/// # 응답
///
/// ## 성공 (200 OK)
/// ```json
/// { "message": "User login successful", "token": "3f2a9c..." }
/// ```
///
/// ## 실패 사례
/// - 400 `"Password length less than 8 characters"`
/// - 400 `"email: a@b.com already exists in the database"`
///
/// # 사용 예제
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/user/signup \
///   -H "Content-Type: application/json" \
///   -d '{"given_name":"Ada","family_name":"Lovelace","email":"ada@example.com","password":"longenough1"}'
/// ```
#[post("/signup")]
pub async fn signup(
    ctx: web::Data<AppContext>,
    request_ctx: RequestContext,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let token = ctx
        .user_service
        .signup(&request_ctx, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(TokenResponse::login_successful(token)))
}

/// 로그인 핸들러
///
/// 같은 사용자의 유효한 토큰이 남아 있으면 그 토큰을 그대로 돌려주고 만료를 연장합니다.
#[post("/login")]
pub async fn login(
    ctx: web::Data<AppContext>,
    request_ctx: RequestContext,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let token = ctx
        .user_service
        .login(&request_ctx, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(TokenResponse::login_successful(token)))
}

#[post("/verify-email", wrap = "AuthMiddleware::new()")]
pub async fn verify_email(
    ctx: web::Data<AppContext>,
    request_ctx: RequestContext,
    user: AuthenticatedUser,
    payload: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.user_service
        .verify_email(&request_ctx, user.user(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Email verified successfully")))
}

/// 이메일 인증 OTP 재발송
///
/// 마지막 발급 후 30초가 지나지 않았으면 400 `"Resend email otp not allowed"`.
#[post("/resend-email-verification-otp", wrap = "AuthMiddleware::new()")]
pub async fn resend_email_verification_otp(
    ctx: web::Data<AppContext>,
    request_ctx: RequestContext,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    ctx.user_service
        .resend_email_verification_otp(&request_ctx, user.user())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Email verification otp resent")))
}

#[get("/pending-requirements", wrap = "AuthMiddleware::new()")]
pub async fn pending_requirements(
    request_ctx: RequestContext,
    user: AuthenticatedUser,
) -> HttpResponse {
    let requirements: Vec<String> = user
        .user()
        .pending_requirements()
        .into_iter()
        .map(String::from)
        .collect();

    log::info!(
        "[{}] Pending requirements: {:?}",
        request_ctx.request_id,
        requirements
    );
    HttpResponse::Ok().json(PendingRequirementsResponse { requirements })
}

/// 비밀번호 변경 OTP 발송
///
/// 로그인할 수 없는 사용자를 위한 복구 진입점이므로 인증이 필요 없습니다.
#[post("/change-password-initiate")]
pub async fn change_password_initiate(
    ctx: web::Data<AppContext>,
    request_ctx: RequestContext,
    payload: web::Json<ChangePasswordInitiateRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.user_service
        .initiate_change_password(&request_ctx, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Change password otp sent")))
}

#[post("/change-password")]
pub async fn change_password(
    ctx: web::Data<AppContext>,
    request_ctx: RequestContext,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    ctx.user_service
        .change_password(&request_ctx, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password changed successfully")))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use mongodb::bson::oid::ObjectId;
    use serde_json::{json, Value};

    use crate::caching::CacheStore;
    use crate::middlewares::RequestContextMiddleware;
    use crate::repositories::users::UserStore;
    use crate::routes::configure_all_routes;
    use crate::test_support::TestContext;

    macro_rules! init_app {
        ($ctx:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($ctx.app.clone()))
                    .wrap(RequestContextMiddleware)
                    .configure(configure_all_routes),
            )
            .await
        };
    }

    fn signup_body(email: &str, password: &str) -> Value {
        json!({
            "given_name": "Ada",
            "family_name": "Lovelace",
            "email": email,
            "password": password,
        })
    }

    #[actix_web::test]
    async fn test_signup_form_fields() {
        let ctx = TestContext::new();
        let app = init_app!(ctx);

        let req = test::TestRequest::get()
            .uri("/api/v1/user/signup-form-fields")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["fields"]["email"]["form_field_type"], "email");
        assert_eq!(body["fields"]["password"]["display_name"], "Password");
    }

    #[actix_web::test]
    async fn test_signup_short_password_is_rejected() {
        let ctx = TestContext::new();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/user/signup")
            .set_json(signup_body("a@b.com", "short"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Password length less than 8 characters");
        assert!(ctx.users.is_empty());
    }

    #[actix_web::test]
    async fn test_signup_then_token_passes_auth() {
        let ctx = TestContext::new();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/user/signup")
            .set_json(signup_body("a@b.com", "longenough1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("x-request-id"));

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "User login successful");
        let token = body["token"].as_str().unwrap().to_string();
        assert!(!token.is_empty());

        let user = ctx.users.find_by_email("a@b.com").await.unwrap();
        assert!(!user.is_verified());

        let sent = ctx.mailer.wait_for(1).await;
        assert_eq!(sent[0].to, "a@b.com");

        let req = test::TestRequest::get()
            .uri("/api/v1/user/pending-requirements")
            .insert_header(("Authorization", token.as_str()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["requirements"], json!(["email"]));

        // 토큰은 같은 사용자 ID 로 해석됩니다.
        let resolved = ctx
            .cache
            .get(&format!("auth_token_user_|_{}", token))
            .await
            .unwrap();
        assert_eq!(resolved, user.id_string().unwrap());
    }

    #[actix_web::test]
    async fn test_duplicate_signup_is_rejected() {
        let ctx = TestContext::new();
        let app = init_app!(ctx);

        for expected in [StatusCode::OK, StatusCode::BAD_REQUEST] {
            let req = test::TestRequest::post()
                .uri("/api/v1/user/signup")
                .set_json(signup_body("a@b.com", "longenough1"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);

            if expected == StatusCode::BAD_REQUEST {
                let body: Value = test::read_body_json(resp).await;
                assert_eq!(body["error"], "email: a@b.com already exists in the database");
            }
        }
    }

    #[actix_web::test]
    async fn test_login_wrong_then_right_password() {
        let ctx = TestContext::new();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/user/signup")
            .set_json(signup_body("a@b.com", "longenough1"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/v1/user/login")
            .set_json(json!({ "email": "a@b.com", "password": "wrong-password" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "User login password verification failed");

        let req = test::TestRequest::post()
            .uri("/api/v1/user/login")
            .set_json(json!({ "email": "a@b.com", "password": "longenough1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let token = body["token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/v1/user/pending-requirements")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_login_unknown_email_is_not_found() {
        let ctx = TestContext::new();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/user/login")
            .set_json(json!({ "email": "nobody@example.com", "password": "whatever1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "No user found");
    }

    #[actix_web::test]
    async fn test_protected_route_without_header() {
        let ctx = TestContext::new();
        let app = init_app!(ctx);

        let req = test::TestRequest::get()
            .uri("/api/v1/user/pending-requirements")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "No Authorization headers provided");
    }

    #[actix_web::test]
    async fn test_protected_route_with_unknown_token() {
        let ctx = TestContext::new();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/user/resend-email-verification-otp")
            .insert_header(("Authorization", "not-a-real-token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Please login!");
        assert!(ctx.cache.is_empty());
    }

    #[actix_web::test]
    async fn test_token_for_missing_user_is_not_found() {
        let ctx = TestContext::new();
        let app = init_app!(ctx);

        let (_, token) = ctx
            .app
            .token_service
            .resolve_or_create_auth_token(&ObjectId::new().to_hex(), "")
            .await
            .unwrap();

        let req = test::TestRequest::get()
            .uri("/api/v1/user/pending-requirements")
            .insert_header(("Authorization", token.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "No user found");
    }

    #[actix_web::test]
    async fn test_authenticated_request_refreshes_both_token_keys() {
        let ctx = TestContext::new();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/user/signup")
            .set_json(signup_body("a@b.com", "longenough1"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let token = body["token"].as_str().unwrap().to_string();

        let user = ctx.users.find_by_email("a@b.com").await.unwrap();
        let user_id = user.id_string().unwrap();
        let token_key = format!("auth_token_user_|_{}", token);
        let user_key = format!("user_auth_token_|_{}", user_id);

        ctx.cache.set_with_expiration(&token_key, &user_id, 10).await.unwrap();
        ctx.cache.set_with_expiration(&user_key, &token, 10).await.unwrap();

        let req = test::TestRequest::get()
            .uri("/api/v1/user/pending-requirements")
            .insert_header(("Authorization", token.as_str()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        assert!(ctx.cache.get_ttl(&token_key).await.unwrap().unwrap() > 86_000);
        assert!(ctx.cache.get_ttl(&user_key).await.unwrap().unwrap() > 86_000);
        assert_eq!(ctx.cache.get(&token_key).await.unwrap(), user_id);
        assert_eq!(ctx.cache.get(&user_key).await.unwrap(), token);
    }

    #[actix_web::test]
    async fn test_verify_email_and_resend_cooldown() {
        let ctx = TestContext::new();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/user/signup")
            .set_json(signup_body("a@b.com", "longenough1"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let token = body["token"].as_str().unwrap().to_string();

        // 방금 발급된 OTP 는 재발송할 수 없습니다.
        let req = test::TestRequest::post()
            .uri("/api/v1/user/resend-email-verification-otp")
            .insert_header(("Authorization", token.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Resend email otp not allowed");

        let req = test::TestRequest::post()
            .uri("/api/v1/user/verify-email")
            .insert_header(("Authorization", token.as_str()))
            .set_json(json!({ "otp": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "OTP not present in request");

        let req = test::TestRequest::post()
            .uri("/api/v1/user/verify-email")
            .insert_header(("Authorization", token.as_str()))
            .set_json(json!({ "otp": "not-the-otp" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid OTP");

        let user = ctx.users.find_by_email("a@b.com").await.unwrap();
        let otp = ctx
            .cache
            .get(&format!("user_email_verification_|_{}", user.id_string().unwrap()))
            .await
            .unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/user/verify-email")
            .insert_header(("Authorization", token.as_str()))
            .set_json(json!({ "otp": otp }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Email verified successfully");

        let user = ctx.users.find_by_email("a@b.com").await.unwrap();
        assert!(user.is_verified());

        let req = test::TestRequest::get()
            .uri("/api/v1/user/pending-requirements")
            .insert_header(("Authorization", token.as_str()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["requirements"], json!([]));

        let req = test::TestRequest::post()
            .uri("/api/v1/user/resend-email-verification-otp")
            .insert_header(("Authorization", token.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "User email already verified");
    }

    #[actix_web::test]
    async fn test_change_password_flow() {
        let ctx = TestContext::new();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/user/signup")
            .set_json(signup_body("a@b.com", "longenough1"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/v1/user/change-password-initiate")
            .set_json(json!({ "email": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Email not provided");

        let req = test::TestRequest::post()
            .uri("/api/v1/user/change-password-initiate")
            .set_json(json!({ "email": "a@b.com" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Change password otp sent");

        let user = ctx.users.find_by_email("a@b.com").await.unwrap();
        let otp = ctx
            .cache
            .get(&format!("user_change_password_|_{}", user.id_string().unwrap()))
            .await
            .unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/user/change-password")
            .set_json(json!({ "email": "a@b.com", "password": "brand-new-pass" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Email or Password or OTP not provided");

        let req = test::TestRequest::post()
            .uri("/api/v1/user/change-password")
            .set_json(json!({ "email": "a@b.com", "password": "brand-new-pass", "otp": otp }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Password changed successfully");

        let req = test::TestRequest::post()
            .uri("/api/v1/user/login")
            .set_json(json!({ "email": "a@b.com", "password": "brand-new-pass" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let sent = ctx.mailer.wait_for(2).await;
        assert!(sent.iter().any(|m| m.subject == "OTP to change password"));
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let ctx = TestContext::new();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/user/login")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}
