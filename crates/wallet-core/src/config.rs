//! 설정 관리.
//!
//! 모든 설정은 기동 시 한 번 로드되어 불변 값으로 각 구성 요소에
//! 주입됩니다. 토큰 서비스와 오케스트레이터가 호출 시점에 프로세스
//! 환경을 읽는 일은 없습니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 애플리케이션 전체 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인드할 호스트 주소
    pub host: String,
    /// 바인드할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `API_HOST` / `API_PORT` 환경 변수에서 로드합니다.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("API_HOST").unwrap_or(defaults.host);
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }

    /// `host:port` 형태의 바인드 주소.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Postgres 연결 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// 연결 URL (보통 `DATABASE_URL`로 오버라이드)
    pub url: String,
    /// 풀의 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/wallet".to_string(),
            max_connections: 10,
            connection_timeout_secs: 10,
        }
    }
}

impl DatabaseConfig {
    /// `DATABASE_URL` / `DATABASE_MAX_CONNECTIONS` 환경 변수에서 로드합니다.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let url = std::env::var("DATABASE_URL").unwrap_or(defaults.url);
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_connections);

        Self {
            url,
            max_connections,
            connection_timeout_secs: defaults.connection_timeout_secs,
        }
    }
}

/// 인증 설정.
///
/// 토큰 서명 비밀 키, 토큰 유효 시간, 가입 보너스 금액을 묶습니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT 서명 비밀 키 (HS256 대칭)
    pub jwt_secret: String,
    /// Access Token 유효 시간 (분)
    pub token_ttl_minutes: i64,
    /// 가입 보너스 금액 (최소 화폐 단위)
    pub signup_bonus: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-key-change-in-production".to_string(),
            token_ttl_minutes: 60,
            signup_bonus: 1000,
        }
    }
}

impl AuthConfig {
    /// 환경 변수에서 로드합니다.
    ///
    /// - `JWT_SECRET`: 서명 비밀 키
    /// - `ACCESS_TOKEN_EXPIRE_MINUTES`: 토큰 유효 시간 (기본 60)
    /// - `SIGNUP_BONUS`: 가입 보너스 금액 (기본 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret);
        let token_ttl_minutes = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.token_ttl_minutes);
        let signup_bonus = std::env::var("SIGNUP_BONUS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.signup_bonus);

        Self {
            jwt_secret,
            token_ttl_minutes,
            signup_bonus,
        }
    }

    /// 개발용 기본 비밀 키를 그대로 쓰고 있는지 확인합니다.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == Self::default().jwt_secret
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 레벨 필터 문자열 (예: "info", "wallet_api=debug")
    pub level: String,
    /// 출력 형식 (pretty | json | compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// TOML 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 병합 순서는 기본값, 파일, `WALLET__` 접두사 환경 변수입니다.
    /// 예: `WALLET__AUTH__SIGNUP_BONUS=500`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("server.host", ServerConfig::default().host)?
            .set_default("server.port", ServerConfig::default().port as i64)?
            // 파일이 없으면 조용히 건너뜀
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("WALLET")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// `config/default.toml`에서 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }

    /// 관례적인 개별 환경 변수(`DATABASE_URL`, `JWT_SECRET`, ...)에서
    /// 설정을 조립합니다.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            logging: LoggingConfig::default(),
        }
    }
}
