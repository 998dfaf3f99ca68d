//! 국가 코드 체계와 지역 분류.

mod codes;
mod resolver;

pub use resolver::{CodeScheme, CountryCodeResolver};
