//! EduPanel 지표 수집기.
//!
//! 이 crate는 다음을 제공합니다:
//! - 프로세스 전역 요청 한도 ([`RateLimiter`])
//! - 재시도/백오프가 포함된 원격 요청 ([`RateLimitedFetcher`])
//! - (국가 × 연도 × 지표) 수집 ([`modules::IndicatorCollector`])
//! - 정제 → 코드 정렬 → 병합 파이프라인 ([`modules::pipeline`])

pub mod config;
pub mod error;
pub mod fetcher;
pub mod modules;
pub mod rate_limiter;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use fetcher::{FetchError, HttpTransport, RateLimitedFetcher, ReqwestTransport, RetryPolicy};
pub use rate_limiter::RateLimiter;
pub use stats::CollectionStats;
