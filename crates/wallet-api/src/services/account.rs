//! 계정 등록/로그인 오케스트레이션.
//!
//! 해셔, 토큰 서비스, 계정 저장소를 조합하여 두 가지 공개 유스케이스
//! (가입 보너스를 포함한 계정 생성, 기존 계정 인증)와 Bearer 토큰
//! 식별을 제공합니다.

use std::sync::Arc;

use tracing::{debug, info};
use wallet_core::{Account, AccountStore, AuthConfig, NewAccount, WalletError, WalletResult};

use crate::auth::{hash_password, verify_password, TokenService};

/// 계정 등록 입력.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: String,
}

/// 계정 서비스.
///
/// 저장소는 trait object로 주입되어 운영에서는 Postgres 구현이,
/// 테스트에서는 인메모리 구현이 사용됩니다. 설정(비밀 키, 토큰 TTL,
/// 가입 보너스)은 생성 시점에 고정됩니다.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    tokens: TokenService,
    signup_bonus: i64,
}

impl AccountService {
    /// 새로운 계정 서비스 생성.
    pub fn new(store: Arc<dyn AccountStore>, auth: AuthConfig) -> Self {
        Self {
            store,
            tokens: TokenService::new(&auth),
            signup_bonus: auth.signup_bonus,
        }
    }

    /// 계정 등록.
    ///
    /// 식별자 검증 → 중복 확인 → 비밀번호 해싱 → 보너스 포함 계정 생성
    /// → 토큰 발급 순으로 진행합니다. 중복 확인은 빠른 경로일 뿐이며,
    /// 실제 보장은 저장소의 유니크 제약입니다.
    ///
    /// # Errors
    ///
    /// - `WalletError::BadRequest`: email/phone 모두 누락 또는 빈 비밀번호
    /// - `WalletError::IdentityAlreadyRegistered`: 식별자 중복
    pub async fn register(&self, input: RegisterInput) -> WalletResult<(Account, String)> {
        if input.email.is_none() && input.phone.is_none() {
            return Err(WalletError::BadRequest(
                "email 또는 phone 중 하나는 제공해야 합니다".to_string(),
            ));
        }
        if input.password.is_empty() {
            return Err(WalletError::BadRequest(
                "password는 비어 있을 수 없습니다".to_string(),
            ));
        }

        // 중복 식별자 사전 확인 (email, phone 각각)
        for identifier in [input.email.as_deref(), input.phone.as_deref()]
            .into_iter()
            .flatten()
        {
            if self.store.find_by_identity(identifier).await?.is_some() {
                return Err(WalletError::IdentityAlreadyRegistered);
            }
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| WalletError::Internal(e.to_string()))?;

        let account = self
            .store
            .create_account_with_bonus(
                NewAccount {
                    email: input.email,
                    phone: input.phone,
                    password_hash,
                },
                self.signup_bonus,
            )
            .await?;

        info!(
            account_id = account.id,
            bonus = self.signup_bonus,
            "Account registered"
        );

        let token = self.issue_token(account.id)?;
        Ok((account, token))
    }

    /// 로그인.
    ///
    /// 식별자는 email과 phone 양쪽에 대해 매칭됩니다. 계정이 없는 경우와
    /// 비밀번호가 틀린 경우는 동일한 에러로 응답하여 어느 쪽이 틀렸는지
    /// 노출하지 않습니다.
    ///
    /// # Errors
    ///
    /// - `WalletError::InvalidCredentials`: 계정 없음 또는 비밀번호 불일치
    /// - `WalletError::AccountDisabled`: 비활성화된 계정
    pub async fn login(&self, identifier: &str, password: &str) -> WalletResult<(Account, String)> {
        let account = match self.store.find_by_identity(identifier).await? {
            Some(account) if verify_password(password, &account.password_hash) => account,
            _ => return Err(WalletError::InvalidCredentials),
        };

        if !account.is_active {
            return Err(WalletError::AccountDisabled);
        }

        debug!(account_id = account.id, "Login succeeded");

        let token = self.issue_token(account.id)?;
        Ok((account, token))
    }

    /// Bearer 헤더에서 요청 계정을 복원합니다.
    ///
    /// 헤더 누락/형식 불량, 토큰 검증 실패(만료 포함), subject 형식 불량,
    /// 계정 없음은 모두 동일하게 `Unauthenticated`로 귀결됩니다.
    /// 부수 효과가 없는 순수 조회입니다.
    pub async fn resolve_bearer(&self, header: Option<&str>) -> WalletResult<Account> {
        let header = header.ok_or(WalletError::Unauthenticated)?;

        let token = header
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or(WalletError::Unauthenticated)?;

        let claims = self.tokens.validate(token).map_err(|e| {
            debug!(error = %e, "Token validation failed");
            WalletError::Unauthenticated
        })?;

        let account_id = claims.account_id().ok_or(WalletError::Unauthenticated)?;

        self.store
            .find_by_id(account_id)
            .await?
            .ok_or(WalletError::Unauthenticated)
    }

    /// 계정 ID에 대한 Access Token 발급.
    fn issue_token(&self, account_id: i64) -> WalletResult<String> {
        self.tokens
            .issue(account_id)
            .map_err(|e| WalletError::Internal(e.to_string()))
    }
}
