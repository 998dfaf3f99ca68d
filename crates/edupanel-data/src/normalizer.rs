//! 원시 테이블 정제.
//!
//! # 정제 단계
//!
//! 1. 국가 코드: 공백 제거, 대문자 변환
//! 2. `country_name` 컬럼 제거 (이후 단계에서는 코드가 유일한 식별자)
//! 3. `year`는 Int64, 지표 컬럼은 Float64로 비엄격 변환 (해석 불가 → null)
//! 4. 비율 컬럼(`rate`/`ratio`)을 [0, 100]으로 절삭
//! 5. 완전히 동일한 행 제거 (첫 행 유지, 순서 보존)
//!
//! 모든 단계가 멱등이므로 `clean(clean(t)) == clean(t)`입니다.

use std::collections::HashMap;

use edupanel_core::columns::{COUNTRY_CODE, COUNTRY_NAME, YEAR};
use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::frame::{has_column, map_str_column};
use crate::schema;
use crate::Result;

/// 비율 컬럼의 허용 범위.
const RATE_BOUNDS: (f64, f64) = (0.0, 100.0);

/// 정제 통계.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// 숫자 변환 실패로 결측이 된 셀 수
    pub coerced_to_missing: usize,
    /// 범위를 벗어나 절삭된 셀 수
    pub clipped: usize,
    /// 제거된 중복 행 수
    pub duplicates_removed: usize,
    /// `country_name` 컬럼 제거 여부
    pub dropped_name_column: bool,
}

/// 원시 테이블 정제기.
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    numeric_columns: Vec<String>,
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new(schema::numeric_columns())
    }
}

impl RecordNormalizer {
    /// 숫자로 변환할 컬럼 목록을 지정해 생성합니다.
    pub fn new<I, S>(numeric_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            numeric_columns: numeric_columns.into_iter().map(Into::into).collect(),
        }
    }

    /// 테이블을 정제합니다.
    pub fn clean(&self, df: DataFrame) -> Result<DataFrame> {
        Ok(self.clean_with_report(df)?.0)
    }

    /// 테이블을 정제하고 통계를 함께 반환합니다.
    ///
    /// 빈 테이블과 `country_code` 컬럼이 없는 테이블은 그대로 반환합니다.
    pub fn clean_with_report(&self, mut df: DataFrame) -> Result<(DataFrame, CleanReport)> {
        let mut report = CleanReport::default();

        if df.height() == 0 {
            return Ok((df, report));
        }
        if !has_column(&df, COUNTRY_CODE) {
            warn!(columns = ?df.get_column_names_str(), "country_code 컬럼 없음, 정제 생략");
            return Ok((df, report));
        }

        map_str_column(&mut df, COUNTRY_CODE, |code| {
            let code = code.trim().to_uppercase();
            (!code.is_empty()).then_some(code)
        })?;

        if has_column(&df, COUNTRY_NAME) {
            df.drop_in_place(COUNTRY_NAME)?;
            report.dropped_name_column = true;
            debug!("country_name 컬럼 제거");
        }

        // 변환 대상: 존재하는 컬럼만
        let mut casts: Vec<(&str, DataType)> = Vec::new();
        if has_column(&df, YEAR) {
            casts.push((YEAR, DataType::Int64));
        }
        casts.extend(
            self.numeric_columns
                .iter()
                .filter(|c| has_column(&df, c))
                .map(|c| (c.as_str(), DataType::Float64)),
        );

        let nulls_before: HashMap<&str, usize> = casts
            .iter()
            .map(|(name, _)| Ok((*name, df.column(name)?.null_count())))
            .collect::<Result<_>>()?;

        let cast = df
            .lazy()
            .with_columns(
                casts
                    .iter()
                    .map(|(name, dtype)| col(*name).cast(dtype.clone()))
                    .collect::<Vec<_>>(),
            )
            .collect()?;

        let bounded: Vec<&str> = casts
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| *name != YEAR && schema::is_bounded_rate(name))
            .collect();

        for (name, _) in &casts {
            let after = cast.column(name)?.null_count();
            report.coerced_to_missing += after.saturating_sub(nulls_before[name]);
        }
        for name in &bounded {
            report.clipped += cast
                .column(name)?
                .f64()?
                .into_iter()
                .flatten()
                .filter(|v| *v < RATE_BOUNDS.0 || *v > RATE_BOUNDS.1)
                .count();
        }

        let before_dedup = cast.height();
        let cleaned = cast
            .lazy()
            .with_columns(
                bounded
                    .iter()
                    .map(|name| col(*name).clip(lit(RATE_BOUNDS.0), lit(RATE_BOUNDS.1)))
                    .collect::<Vec<_>>(),
            )
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;
        report.duplicates_removed = before_dedup - cleaned.height();

        info!(
            rows = cleaned.height(),
            coerced_to_missing = report.coerced_to_missing,
            clipped = report.clipped,
            duplicates_removed = report.duplicates_removed,
            "정제 완료"
        );

        Ok((cleaned, report))
    }
}
