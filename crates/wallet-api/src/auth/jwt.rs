//! Bearer 토큰 발급/검증.
//!
//! 토큰은 서버 측 상태를 갖지 않습니다. 유효성은 (토큰 바이트, 현재 시각,
//! 서버 비밀 키)만으로 결정되며, 폐기 목록이나 Refresh Token은 없습니다.
//! 비밀 키와 TTL은 생성 시점에 고정되고 호출 시점에 환경을 읽지 않습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use wallet_core::AuthConfig;

/// 토큰 페이로드.
///
/// `sub`는 계정 ID의 문자열 표현이며 그 외 클레임은 없습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 계정 ID (정수의 문자열 표현)
    pub sub: String,
    /// 발급 시각 (Unix timestamp)
    pub iat: i64,
    /// 만료 시각 (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    fn for_account(account_id: i64, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
        }
    }

    /// `sub`를 계정 ID로 파싱합니다. 양의 정수 형태가 아니면 None.
    pub fn account_id(&self) -> Option<i64> {
        self.sub.parse::<i64>().ok().filter(|id| *id > 0)
    }
}

/// 토큰 에러.
///
/// 만료와 그 외 불량은 별도 variant로 구분되지만, 호출자는 양쪽 모두
/// 인증 실패로 취급합니다.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("토큰 서명 실패: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("토큰이 만료되었습니다")]
    Expired,
    #[error("유효하지 않은 토큰")]
    Invalid,
}

/// 토큰 서비스.
///
/// HS256 대칭 서명으로 시간 제한 Bearer 토큰을 발급/검증합니다.
#[derive(Debug, Clone)]
pub struct TokenService {
    secret: String,
    ttl_minutes: i64,
}

impl TokenService {
    /// 인증 설정에서 토큰 서비스를 생성합니다.
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            secret: auth.jwt_secret.clone(),
            ttl_minutes: auth.token_ttl_minutes,
        }
    }

    /// 기본 TTL로 계정에 대한 토큰을 발급합니다.
    pub fn issue(&self, account_id: i64) -> Result<String, TokenError> {
        self.issue_with_ttl(account_id, self.ttl_minutes)
    }

    /// 지정한 TTL(분)로 토큰을 발급합니다.
    ///
    /// 음수 TTL은 이미 만료된 토큰을 만들며, 만료 동작 검증에 쓰입니다.
    pub fn issue_with_ttl(&self, account_id: i64, ttl_minutes: i64) -> Result<String, TokenError> {
        let claims = Claims::for_account(account_id, ttl_minutes);
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(TokenError::from)
    }

    /// 서명과 만료 시각을 검증하고 클레임을 돌려줍니다.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
    }
}
