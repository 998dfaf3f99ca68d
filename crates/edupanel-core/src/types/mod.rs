//! 파이프라인 전반에서 사용되는 공통 타입.

mod record;
mod region;
mod year;

pub use record::*;
pub use region::*;
pub use year::*;
