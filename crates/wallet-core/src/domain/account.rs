//! 계정 타입.
//!
//! 이 모듈은 계정 관련 타입을 정의합니다:
//! - `Account` - 저장소가 소유하는 계정 엔티티
//! - `AccountView` - 외부에 노출되는 계정 표현 (비밀번호 해시 제외)
//! - `NewAccount` - 계정 생성 입력

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 계정 엔티티.
///
/// 저장소의 `accounts` 테이블 표현입니다. `balance`는 해당 계정의
/// 원장 엔트리 합계와 항상 일치해야 합니다 (최소 화폐 단위, 정수).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    /// 이메일 (유니크, 선택적 - email 또는 phone 중 하나는 필수)
    pub email: Option<String>,
    /// 전화번호 (유니크, 선택적)
    pub phone: Option<String>,
    /// 비밀번호 해시 (PHC 형식, 외부에 노출 금지)
    pub password_hash: String,
    /// 잔고 (최소 화폐 단위)
    pub balance: i64,
    /// 활성 여부
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// 주어진 식별자가 이 계정의 이메일 또는 전화번호와 일치하는지 확인.
    pub fn matches_identity(&self, identifier: &str) -> bool {
        self.email.as_deref() == Some(identifier) || self.phone.as_deref() == Some(identifier)
    }
}

/// 외부 노출용 계정 표현.
///
/// 비밀번호 해시와 원장 엔트리는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountView {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub balance: i64,
    pub is_active: bool,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            phone: account.phone.clone(),
            balance: account.balance,
            is_active: account.is_active,
        }
    }
}

/// 계정 생성 입력.
///
/// email 또는 phone 중 하나 이상이 있어야 합니다. 검증은 오케스트레이터가
/// 저장소 호출 전에 수행합니다.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password_hash: String,
}

impl NewAccount {
    /// 식별자(email 또는 phone)가 하나 이상 있는지 확인.
    pub fn has_identity(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }
}
