//! Axum용 인증 미들웨어.
//!
//! Bearer 토큰에서 요청 계정을 복원하는 extractor를 제공합니다.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use wallet_core::{Account, WalletError};

use crate::error::{error_response, ApiErrorResponse};
use crate::state::AppState;

/// 인증된 계정 extractor.
///
/// Authorization 헤더의 Bearer 토큰을 검증하고 계정을 조회합니다.
/// 헤더 누락, 형식 불량, 토큰 불량/만료, 계정 없음은 클라이언트 입장에서
/// 구분할 수 없는 동일한 401 응답이 됩니다.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn me_handler(CurrentAccount(account): CurrentAccount) -> impl IntoResponse {
///     Json(AccountView::from(&account))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

/// 인증 extractor 거부 응답.
///
/// 내부적으로는 저장소 장애와 인증 거부를 구분하지만, 인증 거부끼리는
/// 항상 같은 본문을 반환합니다.
#[derive(Debug)]
pub struct AuthRejection(pub WalletError);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, body): (StatusCode, Json<ApiErrorResponse>) = error_response(&self.0);
        (status, body).into_response()
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentAccount {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let account = state
            .accounts
            .resolve_bearer(header)
            .await
            .map_err(AuthRejection)?;

        Ok(CurrentAccount(account))
    }
}
