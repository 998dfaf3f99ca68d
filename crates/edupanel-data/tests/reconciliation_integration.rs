//! 정제 → 코드 정렬 → 병합 전체 흐름 통합 테스트.

use edupanel_core::{CodeScheme, CountryCodeResolver};
use edupanel_data::storage::csv::read_frame;
use edupanel_data::{align_codes, has_column, schema, DatasetMerger, RecordNormalizer};
use polars::prelude::*;

const WORLDBANK_RAW: &str = "\
country_code,country_name,region,year,gni_per_capita,primary_completion_rate
 fr ,FR,Europe,2020,41000,101.2
FR,FR,Europe,2020,41000,101.2
ke,KE,Africa,2020,2000,..
NA,NA,Africa,2020,5000,80
US,US,Unknown,2021,65000,
";

const UNESCO_RAW: &str = "\
country_code,year,free_education_years,inbound_mobility_rate,outbound_mobility_rate,region
KEN,2020,12,0.8,2.1,Africa
FRA,2020,15,10.2,3.9,Europe
DEU,2020,13,11.0,3.5,Europe
FRA,2020,15,10.2,3.9,Europe
";

fn text(df: &DataFrame, column: &str, row: usize) -> Option<String> {
    df.column(column).unwrap().str().unwrap().get(row).map(str::to_string)
}

fn number(df: &DataFrame, column: &str, row: usize) -> Option<f64> {
    df.column(column).unwrap().f64().unwrap().get(row)
}

#[test]
fn test_sources_reconcile_into_one_row_per_primary_key() {
    let resolver = CountryCodeResolver::new();
    let normalizer = RecordNormalizer::default();

    let primary = normalizer.clean(read_frame(WORLDBANK_RAW.as_bytes()).unwrap()).unwrap();
    let primary = align_codes(primary, &resolver, CodeScheme::Alpha2).unwrap();
    let primary =
        DatasetMerger::project(&primary, &schema::primary_columns(), "World Bank").unwrap();

    let secondary = normalizer.clean(read_frame(UNESCO_RAW.as_bytes()).unwrap()).unwrap();
    let secondary = align_codes(secondary, &resolver, CodeScheme::Alpha2).unwrap();
    let secondary =
        DatasetMerger::project(&secondary, &schema::secondary_columns(), "UNESCO").unwrap();

    // " fr "와 "FR" 중복 제거, "NA" 행 제거
    assert_eq!(primary.height(), 3);

    let output = DatasetMerger::new(&resolver).merge(&primary, &secondary).unwrap();
    let merged = output.table;

    assert_eq!(merged.height(), primary.height());
    assert!(!has_column(&merged, "country_name"));

    let codes: Vec<String> = (0..merged.height())
        .filter_map(|row| text(&merged, "country_code", row))
        .collect();
    assert_eq!(codes, vec!["FR", "KE", "US"]);

    // FR: 비율 절삭, 보조 값 결합
    assert_eq!(number(&merged, "primary_completion_rate", 0), Some(100.0));
    assert_eq!(number(&merged, "free_education_years", 0), Some(15.0));
    // KE: 해석 불가 값은 결측
    assert_eq!(number(&merged, "primary_completion_rate", 1), None);
    assert_eq!(number(&merged, "inbound_mobility_rate", 1), Some(0.8));
    // US: 보조 소스 없음
    assert_eq!(number(&merged, "outbound_mobility_rate", 2), None);
    assert_eq!(text(&merged, "region", 2).as_deref(), Some("Unknown"));

    assert!(output.coverage.secondary_only.contains("DE"));
    assert_eq!(output.coverage.secondary_rows_dropped, 1);
}

#[test]
fn test_clean_is_idempotent_on_raw_export() {
    let normalizer = RecordNormalizer::default();
    let once = normalizer.clean(read_frame(WORLDBANK_RAW.as_bytes()).unwrap()).unwrap();
    let twice = normalizer.clean(once.clone()).unwrap();
    assert!(once.equals_missing(&twice));
}
