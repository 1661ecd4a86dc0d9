//! 핸들러 간 공유 상태.
//!
//! 요청 사이에 공유되는 것은 계정 서비스(불변 설정 포함)와 연결 풀뿐이며
//! 가변 상태는 없습니다. `Arc`로 감싸 axum의 State extractor에 넘깁니다.

use std::sync::Arc;

use wallet_core::{AccountStore, AuthConfig};

use crate::services::AccountService;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 등록/로그인/토큰 식별을 담당하는 계정 서비스
    pub accounts: AccountService,

    /// readiness 프로브가 확인하는 연결 풀
    pub db_pool: Option<sqlx::PgPool>,

    /// 기동 시각 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 저장소 구현과 인증 설정으로 상태를 구성합니다.
    pub fn new(store: Arc<dyn AccountStore>, auth: AuthConfig) -> Self {
        Self {
            accounts: AccountService::new(store, auth),
            db_pool: None,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// readiness 프로브용 연결 풀을 붙입니다.
    pub fn with_db_pool(mut self, pool: sqlx::PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// 기동 이후 경과 시간(초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// 데이터베이스 왕복이 가능한지 확인합니다.
    pub async fn is_db_healthy(&self) -> bool {
        match &self.db_pool {
            Some(pool) => sqlx::query("SELECT 1").fetch_one(pool).await.is_ok(),
            None => false,
        }
    }
}

/// 인메모리 저장소로 동작하는 테스트용 상태.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use wallet_core::MemoryStore;

    AppState::new(Arc::new(MemoryStore::new()), AuthConfig::default())
}
