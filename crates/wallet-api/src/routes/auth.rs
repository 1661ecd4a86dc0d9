//! 인증 endpoint.
//!
//! 계정 등록, 로그인, 현재 계정 조회를 위한 REST API를 제공합니다.
//!
//! # 엔드포인트
//!
//! - `POST /api/v1/auth/register` - 계정 등록 (가입 보너스 지급)
//! - `POST /api/v1/auth/login` - 로그인
//! - `GET /api/v1/auth/me` - 현재 계정 조회

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wallet_core::AccountView;

use crate::auth::CurrentAccount;
use crate::error::{error_response, ApiResult};
use crate::services::RegisterInput;
use crate::state::AppState;

// ==================== 요청/응답 타입 ====================

/// 계정 등록 요청.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// 이메일 (email 또는 phone 중 하나는 필수)
    #[serde(default)]
    pub email: Option<String>,
    /// 전화번호
    #[serde(default)]
    pub phone: Option<String>,
    /// 평문 비밀번호
    pub password: String,
    /// 인증 코드 (예약 필드, 현재 검증하지 않음)
    #[serde(default)]
    pub code: Option<String>,
}

/// 로그인 요청.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// 이메일 또는 전화번호
    pub identifier: String,
    /// 평문 비밀번호
    pub password: String,
}

/// 인증 응답 (등록/로그인 공통).
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// 계정 정보 (비밀번호 해시 제외)
    pub account: AccountView,
    /// Bearer Access Token
    pub token: String,
}

// ==================== 핸들러 ====================

/// 계정 등록.
///
/// 성공 시 가입 보너스가 지급된 계정 뷰와 Access Token을 반환합니다.
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    if payload.code.is_some() {
        // 인증 코드는 예약 필드 - 검증 없이 무시
        tracing::debug!("register code field present, ignored");
    }

    let (account, token) = state
        .accounts
        .register(RegisterInput {
            email: payload.email,
            phone: payload.phone,
            password: payload.password,
        })
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(AuthResponse {
        account: AccountView::from(&account),
        token,
    }))
}

/// 로그인.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (account, token) = state
        .accounts
        .login(&payload.identifier, &payload.password)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(AuthResponse {
        account: AccountView::from(&account),
        token,
    }))
}

/// 현재 계정 조회.
///
/// GET /api/v1/auth/me
pub async fn me(CurrentAccount(account): CurrentAccount) -> Json<AccountView> {
    Json(AccountView::from(&account))
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::error::ApiErrorResponse;
    use crate::state::create_test_state;

    fn test_app() -> Router {
        auth_router().with_state(Arc::new(create_test_state()))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_body<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_register_endpoint_grants_bonus() {
        let app = test_app();

        let response = app
            .oneshot(post_json(
                "/register",
                r#"{"email": "a@x.com", "password": "secret1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let auth: AuthResponse = read_body(response).await;
        assert_eq!(auth.account.email.as_deref(), Some("a@x.com"));
        assert_eq!(auth.account.balance, 1000);
        assert!(auth.account.is_active);
        assert!(!auth.token.is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_returns_conflict() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/register",
                r#"{"email": "a@x.com", "password": "secret1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(post_json(
                "/register",
                r#"{"email": "a@x.com", "password": "secret2"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let error: ApiErrorResponse = read_body(response).await;
        assert_eq!(error.code, "IDENTITY_ALREADY_REGISTERED");
    }

    #[tokio::test]
    async fn test_register_without_identity_is_bad_request() {
        let app = test_app();

        let response = app
            .oneshot(post_json("/register", r#"{"password": "secret1"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_and_me_flow() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/register",
                r#"{"email": "a@x.com", "password": "secret1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let registered: AuthResponse = read_body(response).await;

        // 로그인 → 토큰 발급
        let response = app
            .clone()
            .oneshot(post_json(
                "/login",
                r#"{"identifier": "a@x.com", "password": "secret1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let logged_in: AuthResponse = read_body(response).await;
        assert_eq!(logged_in.account.id, registered.account.id);

        // 발급된 토큰으로 현재 계정 조회
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header("authorization", format!("Bearer {}", logged_in.token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let view: AccountView = read_body(response).await;
        assert_eq!(view.id, registered.account.id);
        assert_eq!(view.balance, 1000);

        // 잘못된 비밀번호는 401
        let response = app
            .oneshot(post_json(
                "/login",
                r#"{"identifier": "a@x.com", "password": "wrong"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_without_token_is_unauthorized() {
        let app = test_app();

        let response = app
            .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let error: ApiErrorResponse = read_body(response).await;
        assert_eq!(error.code, "UNAUTHENTICATED");
    }

    #[test]
    fn test_register_request_with_reserved_code() {
        let json = r#"{"email": "a@x.com", "password": "secret1", "code": "123456"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.email.as_deref(), Some("a@x.com"));
        assert!(request.phone.is_none());
        assert_eq!(request.code.as_deref(), Some("123456"));
    }

    #[test]
    fn test_register_request_minimal() {
        let json = r#"{"phone": "010-1234-5678", "password": "secret1"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();

        assert!(request.email.is_none());
        assert_eq!(request.phone.as_deref(), Some("010-1234-5678"));
        assert!(request.code.is_none());
    }

    #[test]
    fn test_auth_response_serialization() {
        let response = AuthResponse {
            account: AccountView {
                id: 1,
                email: Some("a@x.com".to_string()),
                phone: None,
                balance: 1000,
                is_active: true,
            },
            token: "token-value".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""id":1"#));
        assert!(json.contains(r#""balance":1000"#));
        assert!(json.contains(r#""token":"token-value""#));
        assert!(!json.contains("password"));
    }
}
