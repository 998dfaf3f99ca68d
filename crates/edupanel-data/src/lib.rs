//! 지표 테이블 정제, 코드 정렬, 병합 및 저장.
//!
//! 모든 테이블은 polars `DataFrame`이며, 이 crate는 다음을 제공합니다:
//! - 원시 테이블 정제 ([`RecordNormalizer`])
//! - 국가 코드 체계 정렬 ([`align_codes`])
//! - 기준 소스 기준 left join ([`DatasetMerger`])
//! - UNESCO 내보내기 파일 조립 ([`SecondarySourceAssembler`])
//! - CSV 저장소

pub mod alignment;
pub mod error;
pub mod frame;
pub mod merger;
pub mod normalizer;
pub mod schema;
pub mod secondary;
pub mod storage;

pub use alignment::{align_codes, log_country_stats};
pub use error::{DataError, Result};
pub use frame::{country_codes, has_column, records_to_frame};
pub use merger::{CoverageReport, DatasetMerger, MergeOutput};
pub use normalizer::{CleanReport, RecordNormalizer};
pub use secondary::{SecondaryExport, SecondarySourceAssembler};
pub use storage::csv::{load_frame, load_or_empty, save_frame, ColumnCoverage};
