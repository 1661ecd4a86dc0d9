//! 핵심 비즈니스 로직 서비스.
//!
//! 해셔, 토큰 서비스, 저장소를 조합하는 오케스트레이션 계층입니다.

pub mod account;

pub use account::{AccountService, RegisterInput};
