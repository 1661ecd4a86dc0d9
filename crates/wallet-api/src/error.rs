//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//! 인증 계열 거부는 원인에 관계없이 동일한 본문으로 직렬화되어
//! 어떤 검사에서 실패했는지 노출하지 않습니다.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use wallet_core::WalletError;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "INVALID_CREDENTIALS",
///   "message": "계정 또는 비밀번호가 올바르지 않습니다"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "BAD_REQUEST", "UNAUTHENTICATED")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
}

impl ApiErrorResponse {
    /// 새 에러 응답 생성.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 도메인 에러를 HTTP 응답으로 변환합니다.
///
/// 서버 측 에러(`StorageUnavailable`, `Internal`)는 내부 정보를 담지 않는
/// 일반 메시지로 대체됩니다. 인증 실패(`Unauthenticated`)는 원인과
/// 무관하게 단일 형태입니다.
pub fn error_response(err: &WalletError) -> (StatusCode, Json<ApiErrorResponse>) {
    let (status, code) = match err {
        WalletError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        WalletError::IdentityAlreadyRegistered => {
            (StatusCode::CONFLICT, "IDENTITY_ALREADY_REGISTERED")
        }
        WalletError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
        WalletError::AccountDisabled => (StatusCode::FORBIDDEN, "ACCOUNT_DISABLED"),
        WalletError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
        WalletError::StorageUnavailable(_) | WalletError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    };

    let message = if err.is_client_error() {
        err.to_string()
    } else {
        // 내부 상세는 로그에만 남기고 클라이언트에는 노출하지 않음
        tracing::error!(error = %err, "Request failed");
        "내부 서버 에러가 발생했습니다".to_string()
    };

    (status, Json(ApiErrorResponse::new(code, message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                WalletError::BadRequest("x".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                WalletError::IdentityAlreadyRegistered,
                StatusCode::CONFLICT,
            ),
            (WalletError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (WalletError::AccountDisabled, StatusCode::FORBIDDEN),
            (WalletError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (
                WalletError::StorageUnavailable("down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let (status, _) = error_response(&err);
            assert_eq!(status, expected, "err={:?}", err);
        }
    }

    #[test]
    fn test_server_errors_do_not_leak_detail() {
        let err = WalletError::StorageUnavailable("connection to 10.0.0.3 refused".to_string());
        let (_, Json(body)) = error_response(&err);

        assert!(!body.message.contains("10.0.0.3"));
        assert_eq!(body.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_unauthenticated_body_is_uniform() {
        // Unauthenticated는 원인이 무엇이든 같은 variant로 수렴하므로
        // 본문도 항상 동일하다
        let (status, Json(body)) = error_response(&WalletError::Unauthenticated);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.code, "UNAUTHENTICATED");
        assert_eq!(body.message, WalletError::Unauthenticated.to_string());
    }
}
