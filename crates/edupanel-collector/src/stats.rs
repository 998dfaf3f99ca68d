//! 수집 통계.
//!
//! 모든 조회는 값 하나 또는 결측 사유 하나로 끝나므로
//! `total == success + no_data + fetch_failed + unparseable`입니다.

use std::time::Duration;

use edupanel_core::{IndicatorValue, MissingReason};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// 수집 작업 통계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    /// 총 조회 횟수 (국가 × 연도 × 지표)
    pub total: usize,
    /// 값을 얻은 조회
    pub success: usize,
    /// 조회 성공, 관측값 없음
    pub no_data: usize,
    /// 재시도 소진
    pub fetch_failed: usize,
    /// 응답 해석 실패
    pub unparseable: usize,
    /// 생성된 레코드 (국가-연도) 수
    pub records: usize,
    /// 저장한 체크포인트 수
    pub checkpoints: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl CollectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 조회 결과 하나를 집계합니다.
    pub fn record(&mut self, value: &IndicatorValue) {
        self.total += 1;
        match value.missing_reason() {
            None => self.success += 1,
            Some(MissingReason::NoData) => self.no_data += 1,
            Some(MissingReason::FetchFailed) => self.fetch_failed += 1,
            Some(MissingReason::Unparseable) => self.unparseable += 1,
        }
    }

    /// 사유별 결측 수
    pub fn missing(&self, reason: MissingReason) -> usize {
        match reason {
            MissingReason::NoData => self.no_data,
            MissingReason::FetchFailed => self.fetch_failed,
            MissingReason::Unparseable => self.unparseable,
        }
    }

    /// 오류로 끝난 조회 수 (관측값 없음은 제외)
    pub fn errors(&self) -> usize {
        self.fetch_failed + self.unparseable
    }

    /// 성공률 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력. 오류가 있으면 경고 수준으로 사유를 남깁니다.
    pub fn log_summary(&self, operation: &str) {
        info!(
            operation,
            total = self.total,
            success = self.success,
            no_data = self.no_data,
            records = self.records,
            checkpoints = self.checkpoints,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 완료"
        );
        if self.errors() > 0 {
            warn!(
                operation,
                fetch_failed = self.fetch_failed,
                unparseable = self.unparseable,
                "일부 조회 실패, 해당 값은 결측으로 기록됨"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_splits_missing_by_reason() {
        let mut stats = CollectionStats::new();
        stats.record(&IndicatorValue::Present(1.0));
        stats.record(&IndicatorValue::Present(2.0));
        stats.record(&IndicatorValue::Missing(MissingReason::NoData));
        stats.record(&IndicatorValue::Missing(MissingReason::FetchFailed));
        stats.record(&IndicatorValue::Missing(MissingReason::Unparseable));
        stats.record(&IndicatorValue::Missing(MissingReason::Unparseable));

        assert_eq!(stats.total, 6);
        assert_eq!(stats.success, 2);
        assert_eq!(stats.missing(MissingReason::NoData), 1);
        assert_eq!(stats.missing(MissingReason::FetchFailed), 1);
        assert_eq!(stats.missing(MissingReason::Unparseable), 2);
        assert_eq!(stats.errors(), 3);
        assert_eq!(
            stats.success + stats.no_data + stats.errors(),
            stats.total
        );
    }

    #[test]
    fn test_success_rate() {
        let stats = CollectionStats {
            total: 8,
            success: 6,
            ..Default::default()
        };
        assert!((stats.success_rate() - 75.0).abs() < f64::EPSILON);
        assert_eq!(CollectionStats::new().success_rate(), 0.0);
    }
}
