//! 월렛 서비스의 에러 타입.
//!
//! 이 모듈은 서비스 전반에서 사용되는 도메인 에러 타입을 정의합니다.
//! 인증 계열 거부(`InvalidCredentials`, `AccountDisabled`, `Unauthenticated`)는
//! 클라이언트에게 원인을 구분할 수 없는 형태로 전달되어야 합니다.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error)]
pub enum WalletError {
    /// 잘못되었거나 불완전한 입력 (클라이언트가 수정 후 재시도)
    #[error("잘못된 요청: {0}")]
    BadRequest(String),

    /// 이미 등록된 이메일 또는 전화번호 (동일 입력으로 재시도 불가)
    #[error("이미 등록된 계정입니다")]
    IdentityAlreadyRegistered,

    /// 계정 또는 비밀번호 불일치 (어느 쪽인지 구분하지 않음)
    #[error("계정 또는 비밀번호가 올바르지 않습니다")]
    InvalidCredentials,

    /// 비활성화된 계정
    #[error("비활성화된 계정입니다")]
    AccountDisabled,

    /// 인증 실패 (헤더 누락, 토큰 불량/만료, 계정 없음 모두 동일 취급)
    #[error("인증이 필요합니다")]
    Unauthenticated,

    /// 저장소 장애 (요청 단위로 치명적, 코어에서 재시도하지 않음)
    #[error("저장소 에러: {0}")]
    StorageUnavailable(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 월렛 작업을 위한 Result 타입.
pub type WalletResult<T> = Result<T, WalletError>;

impl WalletError {
    /// 클라이언트 측 원인인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            WalletError::StorageUnavailable(_) | WalletError::Internal(_)
        )
    }

    /// 인증 계열 거부인지 확인합니다.
    ///
    /// 이 계열의 에러는 원인에 관계없이 동일한 응답 형태로 노출됩니다.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            WalletError::InvalidCredentials
                | WalletError::AccountDisabled
                | WalletError::Unauthenticated
        )
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(WalletError::BadRequest("email 누락".to_string()).is_client_error());
        assert!(WalletError::IdentityAlreadyRegistered.is_client_error());
        assert!(!WalletError::StorageUnavailable("connection refused".to_string())
            .is_client_error());
        assert!(!WalletError::Internal("oops".to_string()).is_client_error());
    }

    #[test]
    fn test_auth_rejection_classification() {
        assert!(WalletError::InvalidCredentials.is_auth_rejection());
        assert!(WalletError::AccountDisabled.is_auth_rejection());
        assert!(WalletError::Unauthenticated.is_auth_rejection());
        assert!(!WalletError::IdentityAlreadyRegistered.is_auth_rejection());
    }
}
