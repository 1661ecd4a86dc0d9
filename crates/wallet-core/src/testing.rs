//! 테스트 지원 유틸리티.
//!
//! 실제 데이터베이스 없이 오케스트레이션 로직을 검증할 수 있는
//! 인메모리 `AccountStore` 구현을 제공합니다.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Account, AccountStore, EntryKind, LedgerEntry, NewAccount};
use crate::error::{WalletError, WalletResult};

/// 인메모리 계정 저장소.
///
/// 단일 뮤텍스로 전체 상태를 보호하므로 `create_account_with_bonus`의
/// 세 가지 효과가 Postgres 트랜잭션과 동일하게 전부-또는-전무로
/// 관찰됩니다.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    accounts: Vec<Account>,
    entries: Vec<LedgerEntry>,
    next_account_id: i64,
    next_entry_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 특정 계정의 원장 엔트리 조회 (검증용).
    pub fn entries_for(&self, account_id: i64) -> Vec<LedgerEntry> {
        let inner = self.inner.lock().expect("MemoryStore lock poisoned");
        inner
            .entries
            .iter()
            .filter(|e| e.account_id == account_id)
            .cloned()
            .collect()
    }

    /// 저장된 계정 수 반환 (검증용).
    pub fn account_count(&self) -> usize {
        let inner = self.inner.lock().expect("MemoryStore lock poisoned");
        inner.accounts.len()
    }

    /// 계정 활성 여부 변경 (비활성 계정 시나리오 구성용).
    pub fn set_active(&self, account_id: i64, is_active: bool) {
        let mut inner = self.inner.lock().expect("MemoryStore lock poisoned");
        if let Some(account) = inner.accounts.iter_mut().find(|a| a.id == account_id) {
            account.is_active = is_active;
            account.updated_at = Utc::now();
        }
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_account_with_bonus(
        &self,
        new_account: NewAccount,
        bonus: i64,
    ) -> WalletResult<Account> {
        let mut inner = self.inner.lock().expect("MemoryStore lock poisoned");

        // 유니크 제약 검사 (email, phone 각각)
        let duplicate = inner.accounts.iter().any(|a| {
            (new_account.email.is_some() && a.email == new_account.email)
                || (new_account.phone.is_some() && a.phone == new_account.phone)
        });
        if duplicate {
            return Err(WalletError::IdentityAlreadyRegistered);
        }

        inner.next_account_id += 1;
        inner.next_entry_id += 1;
        let now = Utc::now();

        let account = Account {
            id: inner.next_account_id,
            email: new_account.email,
            phone: new_account.phone,
            password_hash: new_account.password_hash,
            balance: bonus,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let entry = LedgerEntry {
            id: inner.next_entry_id,
            account_id: account.id,
            amount: bonus,
            kind: EntryKind::Reward,
            reason: Some("signup_bonus".to_string()),
            metadata: None,
            created_at: now,
        };

        inner.accounts.push(account.clone());
        inner.entries.push(entry);

        Ok(account)
    }

    async fn find_by_identity(&self, identifier: &str) -> WalletResult<Option<Account>> {
        let inner = self.inner.lock().expect("MemoryStore lock poisoned");
        Ok(inner
            .accounts
            .iter()
            .find(|a| a.matches_identity(identifier))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> WalletResult<Option<Account>> {
        let inner = self.inner.lock().expect("MemoryStore lock poisoned");
        Ok(inner.accounts.iter().find(|a| a.id == id).cloned())
    }
}
