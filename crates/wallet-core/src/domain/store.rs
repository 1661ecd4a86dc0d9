//! 계정 저장소 추상화.
//!
//! 계정과 원장에 대한 저장소 중립적인 인터페이스를 제공합니다.
//! 운영 환경에서는 Postgres 구현이, 테스트에서는 인메모리 구현이 주입됩니다.

use async_trait::async_trait;

use super::{Account, NewAccount};
use crate::error::WalletResult;

/// 계정 저장소 trait.
///
/// 노출하는 작업은 등록/로그인/식별에 필요한 것으로 한정됩니다.
/// 원장 엔트리는 `create_account_with_bonus` 내부에서만 생성되며,
/// 별도의 수정/삭제 경로는 존재하지 않습니다.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// 계정을 생성하고 가입 보너스를 지급합니다.
    ///
    /// 다음 세 가지 효과가 단일 원자적 경계 안에서 수행됩니다:
    /// 1. 잔고 0인 계정 삽입
    /// 2. 잔고에 `bonus` 적립
    /// 3. `reward` 원장 엔트리 삽입
    ///
    /// 부분 실패 시 어느 효과도 관찰되지 않아야 합니다. 동일 식별자에
    /// 대한 동시 생성은 정확히 하나만 성공합니다.
    ///
    /// # Errors
    ///
    /// - `WalletError::IdentityAlreadyRegistered`: email 또는 phone 중복
    /// - `WalletError::StorageUnavailable`: 저장소 장애
    async fn create_account_with_bonus(
        &self,
        new_account: NewAccount,
        bonus: i64,
    ) -> WalletResult<Account>;

    /// 식별자(email 또는 phone)로 계정을 조회합니다.
    ///
    /// 하나의 식별자 문자열을 두 필드 모두에 대해 매칭합니다.
    async fn find_by_identity(&self, identifier: &str) -> WalletResult<Option<Account>>;

    /// ID로 계정을 조회합니다.
    async fn find_by_id(&self, id: i64) -> WalletResult<Option<Account>>;
}
