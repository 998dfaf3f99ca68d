//! 지표 레코드.
//!
//! 수집기는 (국가, 연도)마다 하나의 [`IndicatorRecord`]를 만들고, 각 지표 값은
//! [`IndicatorValue`]로 표현합니다. 요청 실패나 빈 응답도 예외가 아니라
//! 결측 사유가 붙은 값으로 남습니다.

use serde::{Deserialize, Serialize};

use super::Region;

/// 식별 컬럼 이름.
pub mod columns {
    pub const COUNTRY_CODE: &str = "country_code";
    pub const COUNTRY_NAME: &str = "country_name";
    pub const REGION: &str = "region";
    pub const YEAR: &str = "year";
}

/// 결측 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingReason {
    /// 응답은 성공했지만 관측값이 없음
    NoData,
    /// 재시도를 모두 소진함
    FetchFailed,
    /// 응답 본문을 해석할 수 없음
    Unparseable,
}

/// 지표 값 또는 명시적 결측.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IndicatorValue {
    Present(f64),
    Missing(MissingReason),
}

impl IndicatorValue {
    /// 관측값에서 생성합니다. `None`과 유한하지 않은 값은 `NoData`입니다.
    pub fn from_observation(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => IndicatorValue::Present(v),
            _ => IndicatorValue::Missing(MissingReason::NoData),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, IndicatorValue::Present(_))
    }

    pub fn as_option(&self) -> Option<f64> {
        match self {
            IndicatorValue::Present(v) => Some(*v),
            IndicatorValue::Missing(_) => None,
        }
    }

    pub fn missing_reason(&self) -> Option<MissingReason> {
        match self {
            IndicatorValue::Present(_) => None,
            IndicatorValue::Missing(reason) => Some(*reason),
        }
    }
}

/// (국가, 연도) 단위의 지표 레코드.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRecord {
    pub country_code: String,
    pub year: i32,
    pub region: Region,
    /// 지표 필드 이름 → 값 (지표 집합 순서 유지)
    values: Vec<(String, IndicatorValue)>,
}

impl IndicatorRecord {
    pub fn new(country_code: impl Into<String>, year: i32, region: Region) -> Self {
        Self {
            country_code: country_code.into(),
            year,
            region,
            values: Vec::new(),
        }
    }

    /// 지표 값을 설정합니다. 이미 있는 필드는 덮어씁니다.
    pub fn set(&mut self, field: &str, value: IndicatorValue) {
        match self.values.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((field.to_string(), value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&IndicatorValue> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, v)| v)
    }

    pub fn values(&self) -> &[(String, IndicatorValue)] {
        &self.values
    }

    /// 값이 있는 지표 수
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|(_, v)| v.is_present()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let mut record = IndicatorRecord::new("FR", 2020, Region::Europe);
        record.set("a", IndicatorValue::Present(1.0));
        record.set("b", IndicatorValue::Missing(MissingReason::NoData));
        record.set("a", IndicatorValue::Present(2.0));

        assert_eq!(record.values().len(), 2);
        assert_eq!(record.values()[0].0, "a");
        assert_eq!(record.get("a"), Some(&IndicatorValue::Present(2.0)));
        assert_eq!(record.present_count(), 1);
    }

    #[test]
    fn test_from_observation() {
        assert!(IndicatorValue::from_observation(Some(3.5)).is_present());
        assert_eq!(
            IndicatorValue::from_observation(None).missing_reason(),
            Some(MissingReason::NoData)
        );
        assert!(!IndicatorValue::from_observation(Some(f64::NAN)).is_present());
    }
}
