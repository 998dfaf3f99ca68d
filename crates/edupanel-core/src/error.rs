//! 코어 에러 타입.

use thiserror::Error;

/// 코어 타입 생성 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 잘못된 연도 범위
    #[error("잘못된 연도 범위: {start}-{end}")]
    InvalidYearRange { start: i32, end: i32 },

    /// alpha-2 ↔ alpha-3 매핑이 서로 역함수가 아님
    #[error("국가 코드 매핑 불일치: {0}")]
    InconsistentMapping(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 코어 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;
