//! REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (등록/로그인/계정 조회)
//! - Argon2 비밀번호 해싱 및 JWT 인증
//! - Postgres 계정/원장 저장소
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 비밀번호 해싱, JWT, 인증 extractor
//! - [`services`]: 등록/로그인 오케스트레이션
//! - [`repository`]: Postgres 저장소 구현

pub mod auth;
pub mod error;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{
    hash_password, verify_password, Claims, CurrentAccount, PasswordError, TokenError, TokenService,
};
pub use error::{ApiErrorResponse, ApiResult};
pub use repository::PgAccountStore;
pub use routes::{
    create_api_router, AuthResponse, LoginRequest, ReadinessResponse, RegisterRequest,
};
pub use services::{AccountService, RegisterInput};
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
