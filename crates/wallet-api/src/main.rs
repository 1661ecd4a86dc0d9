//! 월렛 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 계정 등록/로그인, 현재 계정 조회, 헬스 체크 엔드포인트를 제공합니다.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use wallet_api::repository::PgAccountStore;
use wallet_api::routes::create_api_router;
use wallet_api::state::AppState;
use wallet_core::config::AppConfig;
use wallet_core::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (없으면 무시)
    dotenvy::dotenv().ok();

    // config/default.toml이 있으면 파일 기반, 없으면 환경 변수 기반
    let config = if std::path::Path::new("config/default.toml").exists() {
        AppConfig::load_default()?
    } else {
        AppConfig::from_env()
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if config.auth.uses_default_secret() {
        warn!("JWT_SECRET not set, using development secret. Do not use in production.");
    }

    // 연결은 지연 생성 - 저장소 장애는 요청 단위로 StorageUnavailable로 표면화
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(
            config.database.connection_timeout_secs,
        ))
        .connect_lazy(&config.database.url)?;

    // 연결 확인 (실패해도 기동은 계속, readiness가 degraded로 보고)
    match sqlx::query("SELECT 1").fetch_one(&pool).await {
        Ok(_) => info!("Connected to Postgres successfully"),
        Err(e) => warn!(error = %e, "Database not reachable at startup"),
    }

    let store = Arc::new(PgAccountStore::new(pool.clone()));
    let state = AppState::new(store, config.auth.clone()).with_db_pool(pool);

    let app: Router = create_api_router()
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors_layer());

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Wallet API server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// CORS 미들웨어 구성.
///
/// `CORS_ORIGINS`(쉼표 구분 목록)가 있으면 그 origin만 허용하고,
/// 없으면 개발 모드로 간주해 전부 허용합니다.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(raw) if !raw.is_empty() => {
            let origins: Vec<_> = raw
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!(count = origins.len(), "CORS origin allowlist configured");
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .max_age(Duration::from_secs(3600))
}

/// Graceful shutdown 시그널 대기.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
