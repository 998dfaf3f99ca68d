//! UNESCO UIS 내보내기 파일 조립.
//!
//! UIS 대량 내보내기는 지표마다 별도 파일이며 다음 컬럼을 가집니다:
//! `indicatorId, geoUnit, year, value, qualifier, magnitude`.
//! 세 파일의 (country_code, year) 키를 합친 뒤 파일마다 left join 하여
//! 보조 소스 원시 테이블을 만듭니다.

use std::path::{Path, PathBuf};

use edupanel_core::columns::{COUNTRY_CODE, REGION, YEAR};
use edupanel_core::{CodeScheme, CountryCodeResolver, Region, YearRange};
use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::error::DataError;
use crate::frame::{has_column, map_str_column};
use crate::storage::csv::load_frame;
use crate::Result;

/// 내보내기 파일의 국가 코드 컬럼.
const GEO_UNIT: &str = "geoUnit";
/// 내보내기 파일의 값 컬럼.
const VALUE: &str = "value";

/// 지표 하나의 내보내기 파일.
#[derive(Debug, Clone)]
pub struct SecondaryExport {
    pub path: PathBuf,
    /// 결과 테이블의 필드 이름
    pub field: String,
}

impl SecondaryExport {
    pub fn new(path: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            field: field.into(),
        }
    }

    /// 기본 내보내기 파일 구성.
    pub fn defaults(dir: &Path) -> Vec<SecondaryExport> {
        vec![
            Self::new(dir.join("free_education.csv"), "free_education_years"),
            Self::new(dir.join("inbound_mobility.csv"), "inbound_mobility_rate"),
            Self::new(dir.join("outbound_mobility.csv"), "outbound_mobility_rate"),
        ]
    }
}

/// 보조 소스 조립기.
#[derive(Debug, Clone, Copy)]
pub struct SecondarySourceAssembler<'a> {
    resolver: &'a CountryCodeResolver,
    years: YearRange,
}

impl<'a> SecondarySourceAssembler<'a> {
    pub fn new(resolver: &'a CountryCodeResolver, years: YearRange) -> Self {
        Self { resolver, years }
    }

    /// 내보내기 파일을 읽어 조립합니다. 없는 파일은 건너뜁니다.
    pub fn assemble(&self, exports: &[SecondaryExport]) -> Result<DataFrame> {
        let mut loaded = Vec::with_capacity(exports.len());
        for export in exports {
            match load_frame(&export.path) {
                Ok(df) => loaded.push((export.field.clone(), df)),
                Err(e) => {
                    warn!(path = %export.path.display(), error = %e, "내보내기 파일 로드 실패, 건너뜀");
                    loaded.push((export.field.clone(), DataFrame::empty()));
                }
            }
        }
        self.assemble_tables(loaded)
    }

    /// 읽어 둔 내보내기 테이블을 조립합니다.
    ///
    /// 결과 컬럼: `country_code, year`, 필드들(입력 순서), `region`.
    /// 행은 (region, country_code, year) 순으로 정렬됩니다. 같은 키의 값은
    /// 파일 안에서 처음 나온 null 아닌 값을 사용합니다.
    pub fn assemble_tables(&self, exports: Vec<(String, DataFrame)>) -> Result<DataFrame> {
        let indicators = exports.len();
        let prepared = exports
            .into_iter()
            .map(|(field, df)| {
                let rows = df.height();
                let frame = self.prepare(&field, df)?;
                debug!(field = %field, rows, kept = frame.height(), "내보내기 파일 처리");
                Ok((field, frame))
            })
            .collect::<Result<Vec<_>>>()?;

        let key_frames: Vec<LazyFrame> = prepared
            .iter()
            .map(|(_, frame)| frame.clone().lazy().select([col(COUNTRY_CODE), col(YEAR)]))
            .collect();
        let mut assembled = if key_frames.is_empty() {
            empty_keys()?.lazy()
        } else {
            concat(key_frames, UnionArgs::default())?.unique_stable(None, UniqueKeepStrategy::First)
        };

        for (field, frame) in &prepared {
            let values = frame
                .clone()
                .lazy()
                .filter(col(field.as_str()).is_not_null())
                .group_by_stable([col(COUNTRY_CODE), col(YEAR)])
                .agg([col(field.as_str()).first()]);
            assembled = assembled.join(
                values,
                [col(COUNTRY_CODE), col(YEAR)],
                [col(COUNTRY_CODE), col(YEAR)],
                JoinArgs::new(JoinType::Left),
            );
        }

        let mut out = assembled.collect()?;
        let codes = out.column(COUNTRY_CODE)?.cast(&DataType::String)?;
        let regions: StringChunked = codes
            .str()?
            .into_iter()
            .map(|code| Some(self.resolver.region_of(code.unwrap_or_default()).as_str()))
            .collect();
        out.with_column(regions.with_name(REGION.into()).into_series())?;

        let out = out
            .lazy()
            .sort_by_exprs(
                [col(REGION), col(COUNTRY_CODE), col(YEAR)],
                SortMultipleOptions::default(),
            )
            .collect()?;

        info!(rows = out.height(), indicators, "보조 소스 조립 완료");
        Ok(out)
    }

    /// 내보내기 하나를 (country_code, year, field) 형태로 바꿉니다.
    ///
    /// 코드는 무효 토큰과 분류되지 않는 국가를 걸러낸 뒤 alpha-3로, 연도는
    /// 수집 범위 안의 값만 남깁니다. 빈 테이블은 같은 스키마의 빈 프레임이 됩니다.
    fn prepare(&self, field: &str, df: DataFrame) -> Result<DataFrame> {
        if df.width() == 0 {
            return Ok(DataFrame::new(vec![
                Series::new_empty(COUNTRY_CODE.into(), &DataType::String).into(),
                Series::new_empty(YEAR.into(), &DataType::Int64).into(),
                Series::new_empty(field.into(), &DataType::Float64).into(),
            ])?);
        }
        let (geo, year, value) = export_columns(&df, field)?;

        let mut frame = df
            .lazy()
            .select([
                col(geo).cast(DataType::String).alias(COUNTRY_CODE),
                col(year).cast(DataType::Int64).alias(YEAR),
                col(value).cast(DataType::Float64).alias(field),
            ])
            .collect()?;

        let resolver = self.resolver;
        map_str_column(&mut frame, COUNTRY_CODE, |raw| {
            let code = CountryCodeResolver::normalize_token(raw)?;
            (resolver.region_of(&code) != Region::Unknown)
                .then(|| resolver.convert(&code, CodeScheme::Alpha3))
        })?;

        Ok(frame
            .lazy()
            .filter(
                col(COUNTRY_CODE)
                    .is_not_null()
                    .and(col(YEAR).gt_eq(lit(i64::from(self.years.start()))))
                    .and(col(YEAR).lt_eq(lit(i64::from(self.years.end())))),
            )
            .collect()?)
    }
}

/// 키 컬럼만 있는 빈 프레임.
fn empty_keys() -> Result<DataFrame> {
    Ok(DataFrame::new(vec![
        Series::new_empty(COUNTRY_CODE.into(), &DataType::String).into(),
        Series::new_empty(YEAR.into(), &DataType::Int64).into(),
    ])?)
}

/// 내보내기 테이블의 (코드, 연도, 값) 컬럼 이름.
fn export_columns<'f>(df: &DataFrame, field: &'f str) -> Result<(&'f str, &'f str, &'f str)> {
    let find = |names: &[&'f str]| names.iter().copied().find(|n| has_column(df, n));
    let missing = |column: &str| DataError::MissingColumn(format!("{}: {}", field, column));

    let geo = find(&[GEO_UNIT, COUNTRY_CODE]).ok_or_else(|| missing(GEO_UNIT))?;
    let year = find(&[YEAR]).ok_or_else(|| missing(YEAR))?;
    let value = find(&[VALUE, field]).ok_or_else(|| missing(VALUE))?;
    Ok((geo, year, value))
}
