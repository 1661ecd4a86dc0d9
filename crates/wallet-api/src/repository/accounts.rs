//! 계정 저장소 (Postgres).
//!
//! `AccountStore`의 Postgres 구현입니다. 가입 보너스를 포함한 계정 생성은
//! 단일 트랜잭션으로 처리되어 계정, 잔고, 원장 엔트리가 전부 보이거나
//! 전부 보이지 않습니다.
//!
//! 기대하는 스키마 (마이그레이션은 이 서비스 범위 밖):
//!
//! ```sql
//! CREATE TABLE accounts (
//!     id            BIGSERIAL PRIMARY KEY,
//!     email         TEXT UNIQUE,
//!     phone         TEXT UNIQUE,
//!     password_hash TEXT NOT NULL,
//!     balance       BIGINT NOT NULL DEFAULT 0,
//!     is_active     BOOLEAN NOT NULL DEFAULT TRUE,
//!     created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//!
//! CREATE TABLE ledger_entries (
//!     id         BIGSERIAL PRIMARY KEY,
//!     account_id BIGINT NOT NULL REFERENCES accounts(id),
//!     amount     BIGINT NOT NULL,
//!     kind       TEXT NOT NULL,
//!     reason     TEXT,
//!     metadata   JSONB,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! CREATE INDEX idx_ledger_entries_account_id ON ledger_entries(account_id);
//! ```
//!
//! email/phone의 유니크 제약이 중복 식별자에 대한 실제 보장입니다.
//! 서비스 계층의 사전 확인은 빠른 경로일 뿐입니다. Postgres는 NULL을
//! 서로 다른 값으로 취급하므로 NULL 식별자는 여러 개 허용됩니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use wallet_core::{Account, AccountStore, EntryKind, NewAccount, WalletError, WalletResult};

/// accounts 테이블 row.
#[derive(Debug, Clone, FromRow)]
struct AccountRow {
    id: i64,
    email: Option<String>,
    phone: Option<String>,
    password_hash: String,
    balance: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            phone: row.phone,
            password_hash: row.password_hash,
            balance: row.balance,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Postgres 계정 저장소.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// sqlx 에러를 도메인 에러로 변환합니다.
///
/// 유니크 제약 위반은 식별자 중복으로, 그 외는 저장소 장애로 취급합니다.
fn storage_error(err: sqlx::Error) -> WalletError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            WalletError::IdentityAlreadyRegistered
        }
        _ => WalletError::StorageUnavailable(err.to_string()),
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create_account_with_bonus(
        &self,
        new_account: NewAccount,
        bonus: i64,
    ) -> WalletResult<Account> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        // 1. 잔고 0인 계정 삽입 - 유니크 제약 위반이 중복의 최종 판정
        let inserted: AccountRow = sqlx::query_as(
            r#"
            INSERT INTO accounts (email, phone, password_hash, balance, is_active)
            VALUES ($1, $2, $3, 0, TRUE)
            RETURNING *
            "#,
        )
        .bind(&new_account.email)
        .bind(&new_account.phone)
        .bind(&new_account.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_error)?;

        // 2. 가입 보너스 적립
        let credited: AccountRow = sqlx::query_as(
            r#"
            UPDATE accounts
            SET balance = balance + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(inserted.id)
        .bind(bonus)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_error)?;

        // 3. reward 원장 엔트리 기록
        sqlx::query(
            r#"
            INSERT INTO ledger_entries (account_id, amount, kind, reason)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(inserted.id)
        .bind(bonus)
        .bind(EntryKind::Reward.as_str())
        .bind("signup_bonus")
        .execute(&mut *tx)
        .await
        .map_err(storage_error)?;

        tx.commit().await.map_err(storage_error)?;

        Ok(credited.into())
    }

    async fn find_by_identity(&self, identifier: &str) -> WalletResult<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
            SELECT * FROM accounts
            WHERE email = $1 OR phone = $1
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_id(&self, id: i64) -> WalletResult<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(row.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_to_domain_conversion() {
        let now = Utc::now();
        let row = AccountRow {
            id: 1,
            email: Some("a@x.com".to_string()),
            phone: None,
            password_hash: "hash".to_string(),
            balance: 1000,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let account: Account = row.into();
        assert_eq!(account.id, 1);
        assert_eq!(account.balance, 1000);
        assert!(account.matches_identity("a@x.com"));
    }

    #[test]
    fn test_non_database_error_maps_to_storage_unavailable() {
        let err = storage_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, WalletError::StorageUnavailable(_)));
    }
}
