//! 데이터프레임 보조 함수.
//!
//! 파이프라인의 모든 테이블은 polars [`DataFrame`]입니다. 원시 CSV는 모든
//! 컬럼을 문자열로 읽고, 타입 변환은 [`crate::RecordNormalizer`]가 담당합니다.

use std::collections::BTreeSet;

use edupanel_core::columns::{COUNTRY_CODE, REGION, YEAR};
use edupanel_core::{IndicatorRecord, IndicatorValue};
use polars::prelude::*;

use crate::Result;

/// 컬럼 존재 여부.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// 레코드 목록을 원시 데이터프레임으로 변환합니다.
///
/// 컬럼 순서: `country_code, region, year`, 그 다음 `fields` 순서의 지표 컬럼.
/// 레코드에 없는 지표와 결측 사유가 붙은 값은 모두 null입니다.
pub fn records_to_frame(records: &[IndicatorRecord], fields: &[&str]) -> Result<DataFrame> {
    let codes: Vec<&str> = records.iter().map(|r| r.country_code.as_str()).collect();
    let regions: Vec<&str> = records.iter().map(|r| r.region.as_str()).collect();
    let years: Vec<i64> = records.iter().map(|r| i64::from(r.year)).collect();

    let mut series = vec![
        Series::new(COUNTRY_CODE.into(), codes),
        Series::new(REGION.into(), regions),
        Series::new(YEAR.into(), years),
    ];
    for field in fields {
        let values: Vec<Option<f64>> = records
            .iter()
            .map(|r| r.get(field).and_then(IndicatorValue::as_option))
            .collect();
        series.push(Series::new((*field).into(), values));
    }

    Ok(DataFrame::new(series.into_iter().map(Into::into).collect())?)
}

/// 문자열 컬럼의 값을 변환합니다. null은 null로 남고, `f`가 `None`을 돌려주면 null이 됩니다.
pub(crate) fn map_str_column<F>(df: &mut DataFrame, name: &str, f: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let column = df.column(name)?.cast(&DataType::String)?;
    let mapped: StringChunked = column.str()?.into_iter().map(|v| v.and_then(&f)).collect();
    df.with_column(mapped.with_name(name.into()).into_series())?;
    Ok(())
}

/// 테이블의 고유 국가 코드 (정렬됨).
pub fn country_codes(df: &DataFrame) -> BTreeSet<String> {
    let Ok(column) = df
        .column(COUNTRY_CODE)
        .and_then(|c| c.cast(&DataType::String))
    else {
        return BTreeSet::new();
    };
    column
        .str()
        .map(|ca| ca.into_iter().flatten().map(str::to_string).collect())
        .unwrap_or_default()
}
