//! # EduPanel Core
//!
//! 교육·사회경제 지표 패널의 핵심 타입을 제공합니다.
//!
//! 이 크레이트는 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 지표 레코드와 결측값 표현 ([`IndicatorRecord`], [`IndicatorValue`])
//! - 국가 코드 변환 및 지역 분류 ([`CountryCodeResolver`])
//! - 로깅 인프라

pub mod country;
pub mod error;
pub mod logging;
pub mod types;

pub use country::{CodeScheme, CountryCodeResolver};
pub use error::*;
pub use logging::*;
pub use types::*;
