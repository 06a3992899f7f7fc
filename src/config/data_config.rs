//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 캐시, 서버, 환경 및 보안 관련 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며, 설정되지 않은 경우
    /// `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_name(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다. (대소문자 무관)
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 회원가입/비밀번호 변경 시 요구하는 최소 길이
    pub const MIN_LENGTH: usize = 8;

    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST` 가 4-15 범위로 지정되어 있으면 그 값을 우선합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 및 HTTP 계층 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트. 기본값: 8080 (`PORT`)
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 주소. 기본값: "0.0.0.0" (`HOST`)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// 워커 스레드 수. 기본값: 4 (`SERVER_WORKERS`)
    pub fn workers() -> usize {
        env::var("SERVER_WORKERS")
            .ok()
            .and_then(|w| w.parse().ok())
            .filter(|w| *w > 0)
            .unwrap_or(4)
    }

    /// CORS 허용 Origin 목록 (`SERVER_ALLOW_ORIGINS`, 콤마 구분)
    pub fn allow_origins() -> Vec<String> {
        Self::parse_origins(&env::var("SERVER_ALLOW_ORIGINS").unwrap_or_default())
    }

    pub fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 초당 허용 요청 수 (`RATE_LIMIT_PER_SECOND`, 기본값 100)
    pub fn rate_limit_per_second() -> u64 {
        env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100)
    }

    /// 버스트 허용량 (`RATE_LIMIT_BURST_SIZE`, 기본값 200)
    pub fn rate_limit_burst_size() -> u32 {
        env::var("RATE_LIMIT_BURST_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(200)
    }
}

/// MongoDB 연결 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database_name: String,
}

impl DatabaseConfig {
    /// 환경 변수에서 MongoDB 연결 정보를 읽습니다.
    ///
    /// `MONGODB_URI` 가 있으면 그대로 사용하고, 없으면
    /// `DATABASE_HOST`, `DATABASE_PORT`, `DATABASE_NAME` 으로 URI를 조합합니다.
    pub fn from_env() -> Self {
        let host = env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("DATABASE_PORT").unwrap_or_else(|_| "27017".to_string());
        let database_name = env::var("DATABASE_NAME").unwrap_or_else(|_| "user_accounts".to_string());

        let uri = env::var("MONGODB_URI")
            .unwrap_or_else(|_| Self::compose_uri(&host, &port, &database_name));

        Self { uri, database_name }
    }

    pub fn compose_uri(host: &str, port: &str, database_name: &str) -> String {
        format!(
            "mongodb://{}:{}/{}?retryWrites=true&w=majority",
            host, port, database_name
        )
    }
}

/// Redis 연결 설정
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
}

impl CacheConfig {
    /// `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD` 를 읽습니다.
    pub fn from_env() -> Self {
        Self {
            host: env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("REDIS_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(6379),
            password: env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()),
        }
    }

    /// 연결 URL. 비밀번호는 URL 인코딩됩니다.
    pub fn url(&self) -> String {
        match &self.password {
            Some(password) => format!(
                "redis://:{}@{}:{}/0",
                urlencoding::encode(password),
                self.host,
                self.port
            ),
            None => format!("redis://{}:{}/0", self.host, self.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_name() {
        assert_eq!(Environment::from_name("development"), Environment::Development);
        assert_eq!(Environment::from_name("test"), Environment::Test);
        assert_eq!(Environment::from_name("STAGE"), Environment::Staging);
        assert_eq!(Environment::from_name("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_parse_origins_skips_blanks() {
        assert_eq!(
            ServerConfig::parse_origins("http://a.com, http://b.com,,"),
            vec!["http://a.com".to_string(), "http://b.com".to_string()]
        );
        assert!(ServerConfig::parse_origins("").is_empty());
    }

    #[test]
    fn test_compose_mongo_uri() {
        assert_eq!(
            DatabaseConfig::compose_uri("db", "27017", "accounts"),
            "mongodb://db:27017/accounts?retryWrites=true&w=majority"
        );
    }

    #[test]
    fn test_redis_url_encodes_password() {
        let config = CacheConfig {
            host: "cache".to_string(),
            port: 6380,
            password: Some("p@ss:word".to_string()),
        };
        assert_eq!(config.url(), "redis://:p%40ss%3Aword@cache:6380/0");

        let open = CacheConfig { password: None, ..config };
        assert_eq!(open.url(), "redis://cache:6380/0");
    }
}
