//! 소스별 컬럼 스키마.
//!
//! 지표 집합은 고정입니다. 기준 소스(World Bank)는 원격 지표 코드 → 필드 이름
//! 매핑으로, 보조 소스(UNESCO)는 필드 이름 목록으로 정의합니다.

use edupanel_core::columns::{COUNTRY_CODE, COUNTRY_NAME, REGION, YEAR};

/// World Bank 지표: (원격 지표 코드, 필드 이름).
pub const PRIMARY_INDICATORS: &[(&str, &str)] = &[
    ("SE.XPD.TOTL.GD.ZS", "education_expenditure_gdp"),
    ("SE.PRM.TCHR", "student_teacher_ratio_primary"),
    ("SE.PRM.CMPT.ZS", "primary_completion_rate"),
    ("SE.SCH.LIFE", "school_life_expectancy"),
    ("SE.ENR.PRIM.FM.ZS", "gender_ratio_primary"),
    ("SE.ENR.SECO.FM.ZS", "gender_ratio_secondary"),
    ("SE.ENR.TERT.FM.ZS", "gender_ratio_tertiary"),
    ("NY.GNP.PCAP.CD", "gni_per_capita"),
    ("SP.POV.DDAY", "poverty_rate_1.9"),
    ("SE.XPD.PRIM.PC.ZS", "public_expenditure_per_student"),
    ("SP.POP.TOTL", "total_population"),
    ("SP.DYN.LE00.IN", "life_expectancy"),
    ("SP.DYN.TFRT.IN", "fertility_rate"),
];

/// UNESCO 지표 필드.
pub const SECONDARY_FIELDS: &[&str] = &[
    "free_education_years",
    "inbound_mobility_rate",
    "outbound_mobility_rate",
];

/// 숫자로 강제 변환하는 컬럼.
pub fn numeric_columns() -> Vec<&'static str> {
    PRIMARY_INDICATORS
        .iter()
        .map(|(_, field)| *field)
        .chain(SECONDARY_FIELDS.iter().copied())
        .collect()
}

/// 병합 전 기준 소스에서 유지할 컬럼.
pub fn primary_columns() -> Vec<&'static str> {
    [COUNTRY_CODE, COUNTRY_NAME, REGION, YEAR]
        .into_iter()
        .chain(PRIMARY_INDICATORS.iter().map(|(_, field)| *field))
        .collect()
}

/// 병합 전 보조 소스에서 유지할 컬럼.
pub fn secondary_columns() -> Vec<&'static str> {
    [COUNTRY_CODE, YEAR]
        .into_iter()
        .chain(SECONDARY_FIELDS.iter().copied())
        .collect()
}

/// 비율/백분율 컬럼 여부 (이름에 "rate" 또는 "ratio" 포함).
pub fn is_bounded_rate(column: &str) -> bool {
    column.contains("rate") || column.contains("ratio")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_fields_unique() {
        let fields = numeric_columns();
        let mut dedup = fields.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(fields.len(), dedup.len());
        assert_eq!(fields.len(), 16);
    }

    #[test]
    fn test_bounded_rate_columns() {
        assert!(is_bounded_rate("primary_completion_rate"));
        assert!(is_bounded_rate("student_teacher_ratio_primary"));
        assert!(is_bounded_rate("fertility_rate"));
        assert!(!is_bounded_rate("gni_per_capita"));
        assert!(!is_bounded_rate("free_education_years"));
    }
}
