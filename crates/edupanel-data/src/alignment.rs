//! 국가 코드 체계 정렬.
//!
//! 두 소스는 서로 다른 코드 체계를 사용합니다 (World Bank: alpha-2, UNESCO: alpha-3).
//! 병합 전에 양쪽을 같은 체계로 맞추고 무효 코드를 가진 행을 제거합니다.

use edupanel_core::columns::COUNTRY_CODE;
use edupanel_core::{CodeScheme, CountryCodeResolver};
use polars::prelude::*;
use tracing::{info, warn};

use crate::frame::{country_codes, has_column, map_str_column};
use crate::Result;

/// 코드 컬럼을 `scheme` 체계로 변환하고 코드가 없는 행을 제거합니다.
///
/// 무효 토큰("", "NAN", "NONE", "NA")은 조회 전에 결측이 되며, 매핑에 없는
/// 코드는 그대로 유지됩니다. 코드 컬럼이 없으면 테이블을 그대로 반환합니다.
pub fn align_codes(
    mut df: DataFrame,
    resolver: &CountryCodeResolver,
    scheme: CodeScheme,
) -> Result<DataFrame> {
    if !has_column(&df, COUNTRY_CODE) {
        warn!("country_code 컬럼 없음, 코드 정렬 생략");
        return Ok(df);
    }

    map_str_column(&mut df, COUNTRY_CODE, |raw| {
        CountryCodeResolver::normalize_token(raw).map(|code| resolver.convert(&code, scheme))
    })?;

    let before = df.height();
    let aligned = df
        .lazy()
        .filter(col(COUNTRY_CODE).is_not_null())
        .collect()?;
    let dropped = before - aligned.height();
    if dropped > 0 {
        info!(dropped, scheme = ?scheme, "국가 코드 없는 행 제거");
    }

    Ok(aligned)
}

/// 소스별 유효 국가 코드 수와 예시를 기록합니다.
pub fn log_country_stats(df: &DataFrame, source: &str) {
    let codes = country_codes(df);
    let sample: Vec<&String> = codes.iter().take(10).collect();
    info!(source, valid_codes = codes.len(), sample = ?sample, "국가 코드 통계");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes_table(codes: &[&str]) -> DataFrame {
        let years = vec![2020i64; codes.len()];
        df!("country_code" => codes, "year" => years).unwrap()
    }

    fn codes(df: &DataFrame) -> Vec<String> {
        df.column("country_code")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|c| c.unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_invalid_tokens_dropped() {
        let resolver = CountryCodeResolver::new();
        let table = codes_table(&[" fr ", "NA", "nan", "None", "", "de"]);
        let aligned = align_codes(table, &resolver, CodeScheme::Alpha2).unwrap();

        assert_eq!(aligned.height(), 2);
        assert_eq!(codes(&aligned), vec!["FR", "DE"]);
    }

    #[test]
    fn test_alpha3_converted_to_alpha2() {
        let resolver = CountryCodeResolver::new();
        let table = codes_table(&["FRA", "ken", "XKX", "US"]);
        let aligned = align_codes(table, &resolver, CodeScheme::Alpha2).unwrap();

        assert_eq!(codes(&aligned), vec!["FR", "KE", "XKX", "US"]);
    }

    #[test]
    fn test_null_codes_dropped() {
        let resolver = CountryCodeResolver::new();
        let table = df!(
            "country_code" => &[Some("KEN"), None],
            "year" => &[2020i64, 2021],
        )
        .unwrap();
        let aligned = align_codes(table, &resolver, CodeScheme::Alpha3).unwrap();
        assert_eq!(codes(&aligned), vec!["KEN"]);
    }

    #[test]
    fn test_missing_code_column_passthrough() {
        let resolver = CountryCodeResolver::new();
        let table = df!("geo" => &["NA"]).unwrap();
        let aligned = align_codes(table.clone(), &resolver, CodeScheme::Alpha3).unwrap();
        assert!(aligned.equals_missing(&table));
    }
}
