//! 사용자 계정 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동합니다.
//! MongoDB, Redis, SMTP 연결을 구성하고 [`AppContext`] 를 모든 워커에 공유합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use user_account_service::caching::redis::RedisCacheStore;
use user_account_service::config::{CacheConfig, DatabaseConfig, MailConfig, ServerConfig};
use user_account_service::core::{AppContext, ContextOptions};
use user_account_service::db::Database;
use user_account_service::middlewares::RequestContextMiddleware;
use user_account_service::repositories::users::UserRepository;
use user_account_service::routes::configure_all_routes;
use user_account_service::services::mail::{LogMailer, Mailer, SmtpMailer};

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 사용자 계정 서비스 시작중...");

    let (database, ctx) = initialize_context().await?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    let result = start_http_server(ctx).await;

    database.shutdown().await;
    result
}

/// 데이터 스토어와 메일 발송기를 연결하고 [`AppContext`] 를 구성합니다
///
/// 어느 하나라도 연결에 실패하면 서버를 띄우지 않고 에러를 반환합니다.
async fn initialize_context() -> io::Result<(Database, AppContext)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::connect(&DatabaseConfig::from_env())
        .await
        .map_err(|e| startup_error("MongoDB 연결 실패", e))?;

    let users = UserRepository::new(&database);
    users
        .create_indexes()
        .await
        .map_err(|e| startup_error("사용자 인덱스 생성 실패", e))?;

    info!("✅ MongoDB 연결 성공: {}", database.database_name());

    let cache = RedisCacheStore::connect(&CacheConfig::from_env())
        .await
        .map_err(|e| startup_error("Redis 연결 실패", e))?;

    info!("✅ Redis 연결 성공");

    let mail_config = MailConfig::from_env();
    let mailer: Arc<dyn Mailer> = if mail_config.is_smtp_configured() {
        Arc::new(SmtpMailer::new(&mail_config).map_err(|e| startup_error("SMTP 설정 실패", e))?)
    } else {
        warn!("EMAIL_SMTP_HOST 미설정: 메일을 보내지 않고 로그로만 남깁니다");
        Arc::new(LogMailer)
    };

    let ctx = AppContext::new(
        Arc::new(cache),
        Arc::new(users),
        mailer,
        ContextOptions::from_env(&mail_config),
    );

    Ok((database, ctx))
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어는 바깥쪽부터 Rate Limiting, CORS, 요청 컨텍스트, 접근 로그, 경로 정규화 순입니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(ctx: AppContext) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
    let workers = ServerConfig::workers();
    let allow_origins = ServerConfig::allow_origins();

    info!("🌐 서버가 http://{} 에서 실행중입니다 (workers: {})", bind_address, workers);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/v1/user", bind_address);

    let per_second = ServerConfig::rate_limit_per_second();
    let burst_size = ServerConfig::rate_limit_burst_size();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(per_second)
        .burst_size(burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "Rate Limiting 설정이 올바르지 않습니다 (0 값 불가)",
            )
        })?;

    info!("🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개", per_second, burst_size);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(ctx.clone()))
            // 경로 정규화가 가장 안쪽, Rate Limiting 이 가장 바깥쪽
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .wrap(RequestContextMiddleware)
            .wrap(configure_cors(&allow_origins))
            .wrap(Governor::new(&governor_conf))
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(workers)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG` 가 없으면 "info,actix_web=debug" 를 사용합니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));

    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());
    info!("Current profile: {}", profile);
}

/// `SERVER_ALLOW_ORIGINS` 에 나열된 Origin 만 허용하는 CORS 설정
fn configure_cors(allow_origins: &[String]) -> Cors {
    allow_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::ORIGIN,
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
        .max_age(3600)
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, e);
    io::Error::other(format!("{}: {}", context, e))
}
