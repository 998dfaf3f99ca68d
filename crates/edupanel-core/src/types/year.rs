//! 수집 연도 범위.

use std::ops::RangeInclusive;

use crate::error::{CoreError, CoreResult};

/// 허용되는 연도 (지표 API가 제공하는 범위).
pub const VALID_YEARS: RangeInclusive<i32> = 1960..=2100;

/// 닫힌 연도 구간 `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// 기본 수집 구간: 2013–2022 (10년).
    pub const DEFAULT: YearRange = YearRange {
        start: 2013,
        end: 2022,
    };

    pub fn new(start: i32, end: i32) -> CoreResult<Self> {
        if start > end || !VALID_YEARS.contains(&start) || !VALID_YEARS.contains(&end) {
            return Err(CoreError::InvalidYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i64) -> bool {
        (self.start as i64..=self.end as i64).contains(&year)
    }

    /// 구간에 포함된 연도 수
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn years(&self) -> Vec<i32> {
        (self.start..=self.end).collect()
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::str::FromStr for YearRange {
    type Err = CoreError;

    /// `"2013-2022"` 또는 단일 연도 `"2020"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |v: &str| {
            v.trim()
                .parse::<i32>()
                .map_err(|_| CoreError::InvalidInput(format!("연도 범위 형식 오류: {}", s)))
        };
        match s.split_once('-') {
            Some((a, b)) => Self::new(parse(a)?, parse(b)?),
            None => {
                let year = parse(s)?;
                Self::new(year, year)
            }
        }
    }
}
