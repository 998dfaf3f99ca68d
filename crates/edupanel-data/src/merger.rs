//! 기준 소스 기준 left join 병합.
//!
//! # 보장
//!
//! - 결과 행 수 == 기준 소스 행 수 (보조 소스에 키 중복이 있어도 첫 행만 사용)
//! - 기준 소스에 없는 국가의 보조 행은 조인 전에 제거하고 커버리지로 보고
//! - `country_name` 제거, (country_code, year) 오름차순 정렬
//! - `region`은 코드에서 다시 계산하여 두 소스의 분류가 항상 일치

use std::collections::BTreeSet;

use edupanel_core::columns::{COUNTRY_CODE, COUNTRY_NAME, REGION, YEAR};
use edupanel_core::CountryCodeResolver;
use polars::prelude::*;
use tracing::{info, warn};

use crate::frame::{country_codes, has_column};
use crate::Result;

/// 두 소스의 국가 코드 커버리지.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    /// 양쪽 모두에 있는 코드
    pub common: BTreeSet<String>,
    /// 기준 소스에만 있는 코드
    pub primary_only: BTreeSet<String>,
    /// 보조 소스에만 있는 코드 (병합에서 제외)
    pub secondary_only: BTreeSet<String>,
    /// 기준 소스에 없는 국가라서 제거된 보조 행 수
    pub secondary_rows_dropped: usize,
}

impl CoverageReport {
    fn from_sets(primary: &BTreeSet<String>, secondary: &BTreeSet<String>) -> Self {
        Self {
            common: primary.intersection(secondary).cloned().collect(),
            primary_only: primary.difference(secondary).cloned().collect(),
            secondary_only: secondary.difference(primary).cloned().collect(),
            secondary_rows_dropped: 0,
        }
    }

    pub fn log_summary(&self) {
        info!(
            common = self.common.len(),
            primary_only = ?self.primary_only,
            secondary_only = ?self.secondary_only,
            secondary_rows_dropped = self.secondary_rows_dropped,
            "국가 코드 커버리지"
        );
    }
}

/// 병합 결과.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    pub table: DataFrame,
    pub coverage: CoverageReport,
}

/// 데이터셋 병합기.
#[derive(Debug, Clone, Copy)]
pub struct DatasetMerger<'a> {
    resolver: &'a CountryCodeResolver,
}

impl<'a> DatasetMerger<'a> {
    pub fn new(resolver: &'a CountryCodeResolver) -> Self {
        Self { resolver }
    }

    /// 선언된 컬럼만 선언 순서대로 남깁니다. 없는 컬럼은 경고로 기록합니다.
    pub fn project(df: &DataFrame, declared: &[&str], source: &str) -> Result<DataFrame> {
        let (present, missing): (Vec<&str>, Vec<&str>) =
            declared.iter().copied().partition(|c| has_column(df, c));
        if !missing.is_empty() && df.height() > 0 {
            warn!(source, missing = ?missing, "선언된 컬럼 누락");
        }
        Ok(df.select(present)?)
    }

    /// `primary` 기준으로 `secondary`를 left join 합니다.
    ///
    /// 두 테이블은 같은 코드 체계로 정렬되어 있어야 합니다. 조인 키는
    /// `country_code`(문자열)와 `year`(Int64)로 맞춘 뒤 비교합니다.
    pub fn merge(&self, primary: &DataFrame, secondary: &DataFrame) -> Result<MergeOutput> {
        if !(has_column(primary, COUNTRY_CODE) && has_column(primary, YEAR)) {
            warn!("기준 소스에 조인 키 없음, 병합 생략");
            return Ok(MergeOutput {
                table: primary.clone(),
                coverage: CoverageReport::default(),
            });
        }

        let primary_codes = country_codes(primary);
        let keyed = has_column(secondary, COUNTRY_CODE) && has_column(secondary, YEAR);
        if !keyed && secondary.width() > 0 {
            warn!("보조 소스에 조인 키 없음, 보조 컬럼 없이 진행");
        }

        let secondary_codes = if keyed {
            country_codes(secondary)
        } else {
            BTreeSet::new()
        };
        let mut coverage = CoverageReport::from_sets(&primary_codes, &secondary_codes);

        let mut merged = primary.clone().lazy().with_columns(key_casts());

        if keyed {
            // 보조 컬럼: 키, 이름, 지역, 기준 소스와 충돌하는 컬럼 제외
            let extra: Vec<&str> = secondary
                .get_column_names_str()
                .into_iter()
                .filter(|name| ![COUNTRY_CODE, YEAR, COUNTRY_NAME, REGION].contains(name))
                .filter(|name| {
                    let collides = has_column(primary, name);
                    if collides {
                        warn!(column = %name, "기준 소스와 컬럼 충돌, 보조 값 무시");
                    }
                    !collides
                })
                .collect();

            let codes = secondary.column(COUNTRY_CODE)?.cast(&DataType::String)?;
            let known: BooleanChunked = codes
                .str()?
                .into_iter()
                .map(|code| code.is_some_and(|c| primary_codes.contains(c)))
                .collect();
            let matched = secondary.filter(&known)?;
            coverage.secondary_rows_dropped = secondary.height() - matched.height();

            // 키마다 첫 번째 행만 사용
            let first_rows = matched
                .lazy()
                .with_columns(key_casts())
                .group_by_stable([col(COUNTRY_CODE), col(YEAR)])
                .agg(extra.iter().map(|name| col(*name).first()).collect::<Vec<_>>());

            merged = merged.join(
                first_rows,
                [col(COUNTRY_CODE), col(YEAR)],
                [col(COUNTRY_CODE), col(YEAR)],
                JoinArgs::new(JoinType::Left),
            );
        }

        let mut merged = merged.collect()?;
        if has_column(&merged, COUNTRY_NAME) {
            merged.drop_in_place(COUNTRY_NAME)?;
        }
        self.assign_regions(&mut merged)?;
        let merged = merged
            .lazy()
            .sort_by_exprs(
                [col(COUNTRY_CODE), col(YEAR)],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .collect()?;

        coverage.log_summary();
        info!(rows = merged.height(), "병합 완료");

        Ok(MergeOutput {
            table: merged,
            coverage,
        })
    }

    /// 코드에서 지역을 다시 계산합니다. 컬럼이 없으면 마지막에 추가합니다.
    pub fn assign_regions(&self, df: &mut DataFrame) -> Result<()> {
        if !has_column(df, COUNTRY_CODE) {
            return Ok(());
        }
        let codes = df.column(COUNTRY_CODE)?.cast(&DataType::String)?;
        let regions: StringChunked = codes
            .str()?
            .into_iter()
            .map(|code| Some(self.resolver.region_of(code.unwrap_or_default()).as_str()))
            .collect();
        df.with_column(regions.with_name(REGION.into()).into_series())?;
        Ok(())
    }
}

/// 조인 키 타입 통일.
fn key_casts() -> [Expr; 2] {
    [
        col(COUNTRY_CODE).cast(DataType::String),
        col(YEAR).cast(DataType::Int64),
    ]
}
