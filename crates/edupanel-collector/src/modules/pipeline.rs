//! 파이프라인 단계 구동.
//!
//! 1. `collect_primary`: World Bank 지표 수집 → 원시 CSV
//! 2. `assemble_secondary`: UNESCO 내보내기 조립 → 원시 CSV
//! 3. `merge_sources`: 두 원시 CSV 정제 → 코드 정렬 → 병합 → 최종 CSV
//!
//! 각 소스 파일 로드 실패는 빈 테이블로 취급하고 계속 진행합니다.

use std::sync::Arc;

use edupanel_core::{CodeScheme, CountryCodeResolver, YearRange};
use edupanel_data::storage::csv::log_column_coverage;
use edupanel_data::{
    align_codes, load_or_empty, log_country_stats, save_frame, schema, DatasetMerger, MergeOutput,
    RecordNormalizer, SecondaryExport, SecondarySourceAssembler,
};
use polars::prelude::DataFrame;
use tracing::info;

use super::checkpoint::Checkpoint;
use super::indicator_collect::{Indicator, IndicatorCollector};
use crate::config::CollectorConfig;
use crate::fetcher::{RateLimitedFetcher, ReqwestTransport};
use crate::rate_limiter::RateLimiter;
use crate::stats::CollectionStats;
use crate::Result;

const PRIMARY_SOURCE: &str = "World Bank";
const SECONDARY_SOURCE: &str = "UNESCO";

/// 수집 옵션 (CLI 인자).
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// 대상 국가 (alpha-2). `None`이면 세 지역 전체
    pub countries: Option<Vec<String>>,
    /// 원격 지표 코드. `None`이면 기본 13개
    pub indicators: Option<Vec<String>>,
    /// 연도 범위. `None`이면 설정값
    pub years: Option<YearRange>,
    pub show_progress: bool,
}

/// World Bank 지표를 수집해 원시 CSV로 저장합니다.
pub async fn collect_primary(
    config: &CollectorConfig,
    options: &CollectOptions,
) -> Result<CollectionStats> {
    let transport = ReqwestTransport::new(config.api.request_timeout())?;
    let limiter = Arc::new(RateLimiter::per_second(config.api.rate_limit));
    let fetcher = RateLimitedFetcher::new(
        Arc::new(transport),
        limiter,
        config.api.max_concurrency,
        config.api.retry_policy(),
    );

    let output = config.paths.worldbank_raw();
    let collector =
        IndicatorCollector::new(fetcher, config.api.base_url.as_str(), CountryCodeResolver::global())
            .with_checkpoint(Checkpoint::beside(&output, config.collect.checkpoint_every))
            .with_progress(options.show_progress);

    let indicators = options
        .indicators
        .as_deref()
        .map(Indicator::select)
        .transpose()?;
    let years = match options.years {
        Some(years) => years,
        None => config.collect.years()?,
    };

    let collection = collector
        .collect(indicators.as_deref(), options.countries.as_deref(), Some(years))
        .await?;

    save_frame(&collection.table, &output)?;
    Ok(collection.stats)
}

/// UNESCO 내보내기 파일을 조립해 원시 CSV로 저장합니다. 저장한 행 수를 반환합니다.
pub fn assemble_secondary(config: &CollectorConfig) -> Result<usize> {
    let assembler =
        SecondarySourceAssembler::new(CountryCodeResolver::global(), config.collect.years()?);
    let table = assembler.assemble(&SecondaryExport::defaults(&config.paths.unesco_export_dir))?;
    save_frame(&table, &config.paths.unesco_raw())?;
    Ok(table.height())
}

/// 두 원시 CSV를 정제해 processed 디렉터리에 저장합니다.
pub fn clean_sources(config: &CollectorConfig) -> Result<(DataFrame, DataFrame)> {
    let normalizer = RecordNormalizer::default();

    let primary = normalizer.clean(load_or_empty(&config.paths.worldbank_raw(), PRIMARY_SOURCE))?;
    let secondary =
        normalizer.clean(load_or_empty(&config.paths.unesco_raw(), SECONDARY_SOURCE))?;

    save_frame(&primary, &config.paths.worldbank_clean())?;
    save_frame(&secondary, &config.paths.unesco_clean())?;
    Ok((primary, secondary))
}

/// 원시 테이블 두 개를 정제, 코드 정렬, 투영한 뒤 병합합니다.
///
/// 두 소스 모두 alpha-2 체계로 맞춥니다.
pub fn reconcile(
    primary_raw: DataFrame,
    secondary_raw: DataFrame,
    resolver: &CountryCodeResolver,
) -> Result<MergeOutput> {
    let normalizer = RecordNormalizer::default();

    let primary = align_codes(normalizer.clean(primary_raw)?, resolver, CodeScheme::Alpha2)?;
    log_country_stats(&primary, PRIMARY_SOURCE);
    let primary = DatasetMerger::project(&primary, &schema::primary_columns(), PRIMARY_SOURCE)?;

    let secondary = align_codes(normalizer.clean(secondary_raw)?, resolver, CodeScheme::Alpha2)?;
    log_country_stats(&secondary, SECONDARY_SOURCE);
    let secondary =
        DatasetMerger::project(&secondary, &schema::secondary_columns(), SECONDARY_SOURCE)?;

    Ok(DatasetMerger::new(resolver).merge(&primary, &secondary)?)
}

/// 두 원시 CSV를 병합해 최종 CSV로 저장합니다.
pub fn merge_sources(config: &CollectorConfig) -> Result<MergeOutput> {
    let primary = load_or_empty(&config.paths.worldbank_raw(), PRIMARY_SOURCE);
    let secondary = load_or_empty(&config.paths.unesco_raw(), SECONDARY_SOURCE);

    let output = reconcile(primary, secondary, CountryCodeResolver::global())?;

    let path = config.paths.combined();
    save_frame(&output.table, &path)?;
    log_column_coverage(&output.table);
    info!(
        path = %path.display(),
        rows = output.table.height(),
        columns = output.table.width(),
        "최종 데이터셋 저장"
    );
    Ok(output)
}
