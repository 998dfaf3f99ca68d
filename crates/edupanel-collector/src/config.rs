//! 환경변수 기반 설정 모듈.

use std::path::{Path, PathBuf};
use std::time::Duration;

use edupanel_core::YearRange;

use crate::error::CollectorError;
use crate::fetcher::RetryPolicy;
use crate::Result;

/// World Bank 지표 API 기본 주소.
pub const DEFAULT_WORLDBANK_API_URL: &str = "https://api.worldbank.org/v2";

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 원격 API 설정
    pub api: ApiConfig,
    /// 수집 범위 및 체크포인트 설정
    pub collect: CollectConfig,
    /// 파일 경로 설정
    pub paths: PathConfig,
}

/// 원격 API 설정
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// 지표 API 기본 주소
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// 요청당 총 시도 횟수
    pub max_retries: u32,
    /// 초당 최대 요청 수 (프로세스 전체)
    pub rate_limit: u32,
    /// 동시 진행 요청 수
    pub max_concurrency: usize,
    /// 첫 재시도 전 대기 (밀리초)
    pub backoff_base_ms: u64,
}

/// 수집 설정
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// N개 국가마다 체크포인트 저장 (0이면 비활성)
    pub checkpoint_every: usize,
    /// 수집 시작 연도
    pub start_year: i32,
    /// 수집 종료 연도 (포함)
    pub end_year: i32,
}

/// 파일 경로 설정
#[derive(Debug, Clone)]
pub struct PathConfig {
    /// 데이터 루트 디렉터리
    pub data_dir: PathBuf,
    /// UNESCO UIS 내보내기 파일 디렉터리
    pub unesco_export_dir: PathBuf,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self::with_data_dir("data")
    }
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let data_dir: PathBuf = env_var_parse("DATA_DIR", PathBuf::from("data"));
        let unesco_export_dir = std::env::var("UNESCO_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathConfig::default_export_dir(&data_dir));

        let config = Self {
            api: ApiConfig {
                base_url: env_var_parse(
                    "WORLDBANK_API_URL",
                    DEFAULT_WORLDBANK_API_URL.to_string(),
                ),
                request_timeout_secs: env_var_parse("REQUEST_TIMEOUT_SECS", 30),
                max_retries: env_var_parse("MAX_RETRIES", 3),
                rate_limit: env_var_parse("RATE_LIMIT", 5),
                max_concurrency: env_var_parse("MAX_CONCURRENCY", 1),
                backoff_base_ms: env_var_parse("BACKOFF_BASE_MS", 1000),
            },
            collect: CollectConfig {
                checkpoint_every: env_var_parse("CHECKPOINT_EVERY", 10),
                start_year: env_var_parse("START_YEAR", YearRange::DEFAULT.start()),
                end_year: env_var_parse("END_YEAR", YearRange::DEFAULT.end()),
            },
            paths: PathConfig {
                data_dir,
                unesco_export_dir,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// 기본값에 데이터 디렉터리만 지정한 설정.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            api: ApiConfig {
                base_url: DEFAULT_WORLDBANK_API_URL.to_string(),
                request_timeout_secs: 30,
                max_retries: 3,
                rate_limit: 5,
                max_concurrency: 1,
                backoff_base_ms: 1000,
            },
            collect: CollectConfig {
                checkpoint_every: 10,
                start_year: YearRange::DEFAULT.start(),
                end_year: YearRange::DEFAULT.end(),
            },
            paths: PathConfig {
                unesco_export_dir: PathConfig::default_export_dir(&data_dir),
                data_dir,
            },
        }
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<()> {
        if self.api.rate_limit == 0 {
            return Err(CollectorError::Config("RATE_LIMIT는 1 이상이어야 합니다".to_string()));
        }
        if self.api.max_retries == 0 {
            return Err(CollectorError::Config("MAX_RETRIES는 1 이상이어야 합니다".to_string()));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(CollectorError::Config(
                "WORLDBANK_API_URL이 비어 있습니다".to_string(),
            ));
        }
        self.collect.years()?;
        Ok(())
    }
}

impl ApiConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 재시도 정책
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.backoff_base_ms))
    }
}

impl CollectConfig {
    /// 수집 연도 범위
    pub fn years(&self) -> Result<YearRange> {
        YearRange::new(self.start_year, self.end_year)
            .map_err(|e| CollectorError::Config(e.to_string()))
    }
}

impl PathConfig {
    fn default_export_dir(data_dir: &Path) -> PathBuf {
        data_dir.join("raw").join("unesco")
    }

    /// World Bank 원시 수집 결과
    pub fn worldbank_raw(&self) -> PathBuf {
        self.data_dir.join("raw").join("worldbank_data.csv")
    }

    /// UNESCO 원시 조립 결과
    pub fn unesco_raw(&self) -> PathBuf {
        self.data_dir.join("raw").join("unesco_data.csv")
    }

    /// 정제된 World Bank 테이블
    pub fn worldbank_clean(&self) -> PathBuf {
        self.data_dir.join("processed").join("worldbank_clean.csv")
    }

    /// 정제된 UNESCO 테이블
    pub fn unesco_clean(&self) -> PathBuf {
        self.data_dir.join("processed").join("unesco_clean.csv")
    }

    /// 최종 병합 결과
    pub fn combined(&self) -> PathBuf {
        self.data_dir.join("processed").join("combined_data.csv")
    }
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
