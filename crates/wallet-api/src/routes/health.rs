//! 헬스 체크 endpoint.
//!
//! 로드밸런서와 오케스트레이션 시스템이 사용하는 두 가지 프로브를
//! 제공합니다. liveness는 프로세스 응답 여부만, readiness는 저장소
//! 연결까지 확인합니다.

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// liveness 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct LivenessResponse {
    /// 항상 "ok"
    pub status: String,
}

/// readiness 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// 전체 상태 ("healthy" | "degraded")
    pub status: String,
    /// API 버전
    pub version: String,
    /// 서버 업타임(초)
    pub uptime_secs: i64,
    /// 응답 생성 시각 (ISO 8601)
    pub timestamp: String,
    /// 데이터베이스 연결 상태
    pub database: ComponentStatus,
}

/// 개별 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentStatus {
    /// "up" | "down" | "not_configured"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentStatus {
    pub fn up() -> Self {
        Self {
            status: "up".to_string(),
            message: None,
        }
    }

    pub fn down(message: impl Into<String>) -> Self {
        Self {
            status: "down".to_string(),
            message: Some(message.into()),
        }
    }

    pub fn not_configured() -> Self {
        Self {
            status: "not_configured".to_string(),
            message: None,
        }
    }
}

/// liveness 프로브.
///
/// 서버가 요청에 응답할 수 있으면 성공입니다.
/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(LivenessResponse {
        status: "ok".to_string(),
    })
}

/// readiness 프로브.
///
/// 데이터베이스까지 왕복 가능한지 확인하고, 불가능하면 503과 함께
/// degraded 상태를 보고합니다.
/// GET /health/ready
pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = match &state.db_pool {
        Some(_) if state.is_db_healthy().await => ComponentStatus::up(),
        Some(_) => ComponentStatus::down("연결 실패"),
        None => ComponentStatus::not_configured(),
    };

    let (status_code, status) = if database.status == "up" {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let response = ReadinessResponse {
        status: status.to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        database,
    };

    (status_code, Json(response))
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(health_ready))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    use crate::state::create_test_state;

    #[tokio::test]
    async fn test_liveness_reports_ok() {
        let app = Router::new().route("/health", get(health_check));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let live: LivenessResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(live.status, "ok");
    }

    #[tokio::test]
    async fn test_readiness_without_database_is_degraded() {
        let state = Arc::new(create_test_state());
        let app = Router::new()
            .route("/health/ready", get(health_ready))
            .with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let ready: ReadinessResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(ready.status, "degraded");
        assert_eq!(ready.database.status, "not_configured");
        assert!(!ready.version.is_empty());
        assert!(ready.uptime_secs >= 0);
    }

    #[test]
    fn test_component_status_serialization() {
        let json = serde_json::to_string(&ComponentStatus::up()).unwrap();
        // message가 없으면 필드 자체가 생략됨
        assert!(!json.contains("message"));

        let json = serde_json::to_string(&ComponentStatus::down("timeout")).unwrap();
        assert!(json.contains("timeout"));
    }
}
