//! 에러 타입 정의.

use std::fmt;

use edupanel_core::CoreError;
use edupanel_data::DataError;

use crate::fetcher::FetchError;

/// Collector 에러 타입
#[derive(Debug)]
pub enum CollectorError {
    /// 설정 에러
    Config(String),
    /// 원격 조회 에러
    Fetch(FetchError),
    /// 응답 해석 에러
    Parse(String),
    /// 데이터프레임/CSV 처리 에러
    Data(DataError),
    /// 체크포인트 기록 에러
    Checkpoint(String),
}

impl fmt::Display for CollectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Fetch(e) => write!(f, "Fetch error: {}", e),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Data(e) => write!(f, "Data error: {}", e),
            Self::Checkpoint(msg) => write!(f, "Checkpoint error: {}", msg),
        }
    }
}

impl std::error::Error for CollectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::Data(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FetchError> for CollectorError {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err)
    }
}

impl From<DataError> for CollectorError {
    fn from(err: DataError) -> Self {
        Self::Data(err)
    }
}

impl From<CoreError> for CollectorError {
    fn from(err: CoreError) -> Self {
        Self::Data(DataError::Core(err))
    }
}

impl From<serde_json::Error> for CollectorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
