//! World Bank 지표 수집 모듈.
//!
//! (국가 × 연도 × 지표)마다 한 번씩 조회합니다. 각 조회는 공유 요청 한도를
//! 통과하며, 실패한 지표는 해당 (국가, 연도)의 결측값으로만 남고 수집은
//! 계속됩니다.
//!
//! # 응답 형식
//!
//! ```json
//! [ {"page": 1, ...}, [ {"value": 41000.0, ...}, ... ] ]
//! ```
//!
//! 두 번째 원소의 첫 관측값 `value`를 사용합니다.

use std::time::Instant;

use edupanel_core::{
    CodeScheme, CountryCodeResolver, IndicatorRecord, IndicatorValue, MissingReason, Region,
    YearRange,
};
use edupanel_data::records_to_frame;
use edupanel_data::schema::PRIMARY_INDICATORS;
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::DataFrame;
use serde_json::Value as Json;
use tracing::{debug, info, warn};

use super::checkpoint::{Checkpoint, CheckpointStatus};
use crate::error::CollectorError;
use crate::fetcher::RateLimitedFetcher;
use crate::stats::CollectionStats;
use crate::Result;

/// 수집 대상 지표.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    /// 원격 지표 코드 (예: `SE.PRM.CMPT.ZS`)
    pub code: String,
    /// 결과 테이블의 컬럼 이름
    pub field: String,
}

impl Indicator {
    pub fn new(code: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            field: field.into(),
        }
    }

    /// 기본 지표 집합 (13개).
    pub fn defaults() -> Vec<Indicator> {
        PRIMARY_INDICATORS
            .iter()
            .map(|(code, field)| Indicator::new(*code, *field))
            .collect()
    }

    /// 원격 코드 목록으로 기본 집합에서 지표를 고릅니다.
    pub fn select(codes: &[String]) -> Result<Vec<Indicator>> {
        let defaults = Self::defaults();
        codes
            .iter()
            .map(|code| {
                defaults
                    .iter()
                    .find(|i| i.code.eq_ignore_ascii_case(code.trim()))
                    .cloned()
                    .ok_or_else(|| CollectorError::Config(format!("알 수 없는 지표 코드: {}", code)))
            })
            .collect()
    }
}

/// 수집 결과.
#[derive(Debug, Clone)]
pub struct Collection {
    /// 원시 테이블: `country_code, region, year`, 지표 컬럼들
    pub table: DataFrame,
    pub stats: CollectionStats,
}

/// 지표 수집기.
#[derive(Debug)]
pub struct IndicatorCollector<'a> {
    fetcher: RateLimitedFetcher,
    base_url: String,
    resolver: &'a CountryCodeResolver,
    checkpoint: Option<Checkpoint>,
    show_progress: bool,
}

impl<'a> IndicatorCollector<'a> {
    pub fn new(
        fetcher: RateLimitedFetcher,
        base_url: impl Into<String>,
        resolver: &'a CountryCodeResolver,
    ) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            resolver,
            checkpoint: None,
            show_progress: false,
        }
    }

    /// 주기적 체크포인트 저장을 켭니다.
    pub fn with_checkpoint(mut self, checkpoint: Checkpoint) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// 진행률 표시 여부.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// 지표를 수집합니다.
    ///
    /// 인자가 `None`이면 기본값을 사용합니다: 13개 기본 지표, 세 지역의 모든
    /// 국가 (alpha-2), 2013-2022.
    pub async fn collect(
        &self,
        indicators: Option<&[Indicator]>,
        countries: Option<&[String]>,
        years: Option<YearRange>,
    ) -> Result<Collection> {
        let started = Instant::now();
        let indicators = indicators
            .map(<[Indicator]>::to_vec)
            .unwrap_or_else(Indicator::defaults);
        let countries: Vec<String> = match countries {
            Some(list) => list.iter().map(|c| c.trim().to_uppercase()).collect(),
            None => self.resolver.default_countries(CodeScheme::Alpha2),
        };
        let years = years.unwrap_or_default();
        let fields: Vec<&str> = indicators.iter().map(|i| i.field.as_str()).collect();

        let total_requests = countries.len() * years.len() * indicators.len();
        let rate = self.fetcher.limiter().max_per_window() as usize;
        info!(
            countries = countries.len(),
            years = %format!("{}-{}", years.start(), years.end()),
            indicators = indicators.len(),
            total_requests,
            estimated_secs = total_requests / rate.max(1),
            "지표 수집 시작"
        );
        for region in Region::CLASSIFIED {
            let count = countries
                .iter()
                .filter(|c| self.resolver.region_of(c) == region)
                .count();
            debug!(region = %region, countries = count, "지역별 대상 국가");
        }

        if let Some(checkpoint) = &self.checkpoint {
            if let Err(e) = checkpoint.clear() {
                warn!(error = %e, "이전 체크포인트 삭제 실패");
            }
        }

        let progress = self.progress_bar(countries.len());
        let mut stats = CollectionStats::new();
        let mut records = Vec::with_capacity(countries.len() * years.len());

        for (idx, country) in countries.iter().enumerate() {
            let region = self.resolver.region_of(country);
            progress.set_message(country.clone());

            for year in years.years() {
                let mut record = IndicatorRecord::new(country.as_str(), year, region);
                for indicator in &indicators {
                    let value = self.fetch_indicator(country, year, indicator).await;
                    stats.record(&value);
                    record.set(&indicator.field, value);
                }
                records.push(record);
            }
            progress.inc(1);

            let processed = idx + 1;
            if let Some(checkpoint) = &self.checkpoint {
                if checkpoint.is_due(processed) {
                    let saved = records_to_frame(&records, &fields)
                        .map_err(CollectorError::from)
                        .and_then(|partial| checkpoint.save(&partial, processed));
                    match saved {
                        Ok(()) => stats.checkpoints += 1,
                        Err(e) => warn!(processed, error = %e, "체크포인트 저장 실패"),
                    }
                }
            }
        }
        progress.finish_and_clear();

        let table = records_to_frame(&records, &fields)?;
        if let Some(checkpoint) = &self.checkpoint {
            match checkpoint.mark_completed(countries.len(), table.height()) {
                Ok(()) => debug!(
                    status = CheckpointStatus::Completed.as_str(),
                    "체크포인트 상태 갱신"
                ),
                Err(e) => warn!(error = %e, "체크포인트 완료 기록 실패"),
            }
        }

        stats.records = records.len();
        stats.elapsed = started.elapsed();
        Ok(Collection { table, stats })
    }

    /// 지표 하나를 조회합니다. 실패는 사유가 붙은 결측값이 됩니다.
    async fn fetch_indicator(&self, country: &str, year: i32, indicator: &Indicator) -> IndicatorValue {
        let url = format!(
            "{}/country/{}/indicator/{}",
            self.base_url, country, indicator.code
        );
        let params = [("date", year.to_string()), ("format", "json".to_string())];

        let body = match self.fetcher.fetch(&url, &params).await {
            Ok(body) => body,
            Err(e) => {
                warn!(country, year, indicator = %indicator.code, error = %e, "지표 조회 실패");
                return IndicatorValue::Missing(MissingReason::FetchFailed);
            }
        };

        match parse_observation(&body) {
            Ok(value) => value,
            Err(e) => {
                warn!(country, year, indicator = %indicator.code, error = %e, "응답 해석 실패");
                IndicatorValue::Missing(MissingReason::Unparseable)
            }
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        match ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg} ({eta})")
        {
            Ok(style) => pb.set_style(style.progress_chars("#>-")),
            Err(e) => debug!(error = %e, "진행률 템플릿 오류, 기본 스타일 사용"),
        }
        pb
    }
}

/// 응답 본문에서 첫 관측값을 꺼냅니다.
///
/// 관측 목록이 없거나 비어 있거나 값이 `null`이면 `NoData`입니다.
/// JSON이 아니거나 값이 숫자로 해석되지 않으면 오류입니다.
pub fn parse_observation(body: &str) -> Result<IndicatorValue> {
    let json: Json = serde_json::from_str(body)?;

    let first = json
        .as_array()
        .and_then(|parts| parts.get(1))
        .and_then(Json::as_array)
        .and_then(|observations| observations.first());

    match first.and_then(|obs| obs.get("value")) {
        None | Some(Json::Null) => Ok(IndicatorValue::Missing(MissingReason::NoData)),
        Some(Json::Number(n)) => Ok(IndicatorValue::from_observation(n.as_f64())),
        Some(Json::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(|v| IndicatorValue::from_observation(Some(v)))
            .map_err(|e| CollectorError::Parse(format!("value {:?}: {}", s, e))),
        Some(other) => Err(CollectorError::Parse(format!("unexpected value: {}", other))),
    }
}
