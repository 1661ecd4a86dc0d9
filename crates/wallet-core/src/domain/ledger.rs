//! 원장 엔트리 타입.
//!
//! 잔고에 영향을 주는 모든 이벤트는 불변 원장 엔트리로 기록됩니다.
//! 엔트리는 추가 전용이며 수정/삭제 경로가 없습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 원장 엔트리 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// 보상 지급 (가입 보너스 등)
    Reward,
    /// 구매 차감 (예약)
    Purchase,
    /// 환불 (예약)
    Refund,
}

impl EntryKind {
    /// 저장소 표현 문자열 반환.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Reward => "reward",
            EntryKind::Purchase => "purchase",
            EntryKind::Refund => "refund",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reward" => Ok(EntryKind::Reward),
            "purchase" => Ok(EntryKind::Purchase),
            "refund" => Ok(EntryKind::Refund),
            _ => Err(format!("Unknown entry kind: {}", s)),
        }
    }
}

/// 원장 엔트리.
///
/// 정확히 하나의 계정을 참조하며, 금액은 부호 있는 정수입니다
/// (양수 = 적립, 음수 = 차감). 생성 시각 순으로 정렬됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub account_id: i64,
    /// 부호 있는 금액 (최소 화폐 단위)
    pub amount: i64,
    pub kind: EntryKind,
    /// 사람이 읽을 수 있는 사유 (선택적)
    pub reason: Option<String>,
    /// 구조화된 부가 정보 (선택적)
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}
