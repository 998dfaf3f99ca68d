//! 데이터 모듈 오류 타입.

use edupanel_core::CoreError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(String),

    /// 데이터프레임 연산 또는 CSV 형식 오류
    #[error("Polars error: {0}")]
    Polars(String),

    /// 코어 타입 오류
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    /// 필수 컬럼 없음
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io(err.to_string())
    }
}

impl From<PolarsError> for DataError {
    fn from(err: PolarsError) -> Self {
        match err {
            PolarsError::IO { .. } => DataError::Io(err.to_string()),
            PolarsError::ColumnNotFound(_) => DataError::MissingColumn(err.to_string()),
            _ => DataError::Polars(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
