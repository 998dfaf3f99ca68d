//! alpha-2 ↔ alpha-3 국가 코드 변환과 지역 분류.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use super::codes::{AFRICA, ASIA, CODE_MAPPING, EUROPE};
use crate::error::{CoreError, CoreResult};
use crate::types::Region;

/// 결측으로 취급하는 코드 토큰 (대문자 비교).
const INVALID_TOKENS: [&str; 4] = ["", "NAN", "NONE", "NA"];

static GLOBAL: OnceLock<CountryCodeResolver> = OnceLock::new();

/// 국가 코드 체계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeScheme {
    /// 두 글자 코드 (World Bank)
    Alpha2,
    /// 세 글자 코드 (UNESCO)
    Alpha3,
}

/// 국가 코드 변환기.
///
/// 매핑에 없는 코드는 그대로 통과시킵니다. 대상 체계와 이미 일치하는 코드를
/// 허용하기 위한 동작이며 에러가 아닙니다.
#[derive(Debug, Clone)]
pub struct CountryCodeResolver {
    to_alpha3: HashMap<&'static str, &'static str>,
    to_alpha2: HashMap<&'static str, &'static str>,
    /// 분류 우선순위 순서 (alpha-3)
    regions: Vec<(Region, &'static [&'static str], HashSet<&'static str>)>,
}

impl Default for CountryCodeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryCodeResolver {
    /// 내장 정적 테이블로 생성합니다.
    pub fn new() -> Self {
        Self::build(
            CODE_MAPPING,
            [
                (Region::Africa, AFRICA),
                (Region::Asia, ASIA),
                (Region::Europe, EUROPE),
            ],
        )
    }

    /// 프로세스 전역 인스턴스. 최초 호출 시 한 번만 생성됩니다.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// 사용자 테이블로 생성합니다. 매핑이 서로 역함수가 아니면 에러.
    ///
    /// `regions`의 순서가 분류 우선순위입니다.
    pub fn with_tables(
        mapping: &'static [(&'static str, &'static str)],
        regions: [(Region, &'static [&'static str]); 3],
    ) -> CoreResult<Self> {
        let resolver = Self::build(mapping, regions);
        resolver.validate()?;
        Ok(resolver)
    }

    fn build(
        mapping: &'static [(&'static str, &'static str)],
        regions: [(Region, &'static [&'static str]); 3],
    ) -> Self {
        Self {
            to_alpha3: mapping.iter().copied().collect(),
            to_alpha2: mapping.iter().map(|&(a2, a3)| (a3, a2)).collect(),
            regions: regions
                .into_iter()
                .map(|(region, codes)| (region, codes, codes.iter().copied().collect()))
                .collect(),
        }
    }

    /// 정방향/역방향 매핑이 모든 항목에서 서로 역함수인지 확인합니다.
    pub fn validate(&self) -> CoreResult<()> {
        if self.to_alpha3.len() != self.to_alpha2.len() {
            return Err(CoreError::InconsistentMapping(format!(
                "alpha-2 {}개, alpha-3 {}개",
                self.to_alpha3.len(),
                self.to_alpha2.len()
            )));
        }
        for (&a2, &a3) in &self.to_alpha3 {
            if self.to_alpha2.get(a3) != Some(&a2) {
                return Err(CoreError::InconsistentMapping(format!("{} -> {}", a2, a3)));
            }
        }
        Ok(())
    }

    /// 매핑 항목 수
    pub fn mapping_len(&self) -> usize {
        self.to_alpha3.len()
    }

    /// 원시 코드 토큰을 정규화합니다.
    ///
    /// 공백 제거 후 대문자로 바꾸고, 무효 토큰("", "NAN", "NONE", "NA")은 `None`.
    pub fn normalize_token(raw: &str) -> Option<String> {
        let code = raw.trim().to_uppercase();
        if INVALID_TOKENS.contains(&code.as_str()) {
            None
        } else {
            Some(code)
        }
    }

    /// alpha-2 → alpha-3. 매핑에 없으면 입력 그대로.
    pub fn to_three_letter(&self, code: &str) -> String {
        self.to_alpha3.get(code).unwrap_or(&code).to_string()
    }

    /// alpha-3 → alpha-2. 매핑에 없으면 입력 그대로.
    pub fn to_two_letter(&self, code: &str) -> String {
        self.to_alpha2.get(code).unwrap_or(&code).to_string()
    }

    /// 대상 체계로 변환합니다.
    pub fn convert(&self, code: &str, scheme: CodeScheme) -> String {
        match scheme {
            CodeScheme::Alpha2 => self.to_two_letter(code),
            CodeScheme::Alpha3 => self.to_three_letter(code),
        }
    }

    /// 코드의 지역을 반환합니다. alpha-2와 alpha-3 모두 허용합니다.
    ///
    /// Africa, Asia, Europe 순서로 첫 번째로 포함된 집합이 우선이며,
    /// 어디에도 없으면 [`Region::Unknown`].
    ///
    /// 공백 제거와 대문자 변환만 합니다. 무효 토큰 처리는 테이블 정렬 단계의
    /// 몫이므로 나미비아(`NA`)도 여기서는 Africa로 분류됩니다.
    pub fn region_of(&self, code: &str) -> Region {
        let code = code.trim().to_uppercase();
        let alpha3 = self.to_three_letter(&code);

        self.regions
            .iter()
            .find(|(_, _, set)| set.contains(alpha3.as_str()))
            .map(|(region, _, _)| *region)
            .unwrap_or(Region::Unknown)
    }

    /// 지역에 속한 국가 목록 (정적 테이블 순서).
    pub fn countries_in(&self, region: Region, scheme: CodeScheme) -> Vec<String> {
        self.regions
            .iter()
            .filter(|(r, _, _)| *r == region)
            .flat_map(|(_, codes, _)| codes.iter())
            .map(|code| self.convert(code, scheme))
            .collect()
    }

    /// 기본 수집 대상: 분류된 세 지역 국가의 합집합 (중복 제거, 순서 유지).
    pub fn default_countries(&self, scheme: CodeScheme) -> Vec<String> {
        let mut seen = HashSet::new();
        self.regions
            .iter()
            .flat_map(|(_, codes, _)| codes.iter())
            .filter(|code| seen.insert(**code))
            .map(|code| self.convert(code, scheme))
            .collect()
    }

    /// 세 지역 중 하나에 속하는지 여부.
    pub fn is_classified(&self, code: &str) -> bool {
        self.region_of(code) != Region::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_builtin_mapping_is_consistent() {
        let resolver = CountryCodeResolver::new();
        assert!(resolver.validate().is_ok());
        assert!(resolver.mapping_len() > 150);
    }

    proptest! {
        #[test]
        fn prop_mapped_codes_round_trip(idx in 0..CODE_MAPPING.len()) {
            let resolver = CountryCodeResolver::global();
            let (a2, a3) = CODE_MAPPING[idx];
            prop_assert_eq!(resolver.to_three_letter(a2), a3);
            prop_assert_eq!(resolver.to_two_letter(&resolver.to_three_letter(a2)), a2);
            prop_assert_eq!(resolver.to_three_letter(&resolver.to_two_letter(a3)), a3);
        }

        #[test]
        fn prop_unmapped_codes_pass_through(code in "[A-Z0-9]{1,6}") {
            let resolver = CountryCodeResolver::global();
            let mapped = CODE_MAPPING.iter().any(|(a2, a3)| *a2 == code || *a3 == code);
            prop_assume!(!mapped);
            prop_assert_eq!(resolver.to_three_letter(&code), code.clone());
            prop_assert_eq!(resolver.to_two_letter(&code), code.clone());
        }

        #[test]
        fn prop_region_of_agrees_across_schemes(idx in 0..CODE_MAPPING.len()) {
            let resolver = CountryCodeResolver::global();
            let (a2, a3) = CODE_MAPPING[idx];
            prop_assert_eq!(resolver.region_of(a2), resolver.region_of(a3));
        }
    }

    #[test]
    fn test_unmapped_codes_pass_through() {
        let resolver = CountryCodeResolver::new();
        assert_eq!(resolver.to_three_letter("XK"), "XK");
        assert_eq!(resolver.to_two_letter("XKX"), "XKX");
        // 이미 대상 체계인 코드
        assert_eq!(resolver.to_three_letter("FRA"), "FRA");
        assert_eq!(resolver.to_two_letter("FR"), "FR");
    }

    #[test]
    fn test_normalize_token() {
        assert_eq!(CountryCodeResolver::normalize_token(" fr "), Some("FR".to_string()));
        for invalid in ["", "  ", "nan", "NaN", "None", "na", "NA"] {
            assert_eq!(CountryCodeResolver::normalize_token(invalid), None, "{invalid}");
        }
    }

    #[test]
    fn test_region_of_accepts_both_schemes() {
        let resolver = CountryCodeResolver::new();
        assert_eq!(resolver.region_of("KE"), Region::Africa);
        assert_eq!(resolver.region_of("KEN"), Region::Africa);
        assert_eq!(resolver.region_of("jp"), Region::Asia);
        assert_eq!(resolver.region_of("FRA"), Region::Europe);
        assert_eq!(resolver.region_of("US"), Region::Unknown);
        assert_eq!(resolver.region_of(""), Region::Unknown);
    }

    #[test]
    fn test_namibia_classified_despite_invalid_token_overlap() {
        let resolver = CountryCodeResolver::new();
        assert!(resolver
            .default_countries(CodeScheme::Alpha2)
            .contains(&"NA".to_string()));
        assert_eq!(resolver.region_of("NA"), Region::Africa);
        assert_eq!(resolver.region_of(" na "), Region::Africa);
        assert_eq!(resolver.region_of("NAM"), Region::Africa);
        // 정렬 단계에서는 여전히 무효 토큰
        assert_eq!(CountryCodeResolver::normalize_token("NA"), None);
    }

    #[test]
    fn test_region_priority_first_match_wins() {
        static MAPPING: &[(&str, &str)] = &[("CY", "CYP"), ("TR", "TUR")];
        static SET_A: &[&str] = &["CYP"];
        static SET_B: &[&str] = &["CYP", "TUR"];
        static SET_C: &[&str] = &["TUR"];

        let resolver = CountryCodeResolver::with_tables(
            MAPPING,
            [
                (Region::Africa, SET_A),
                (Region::Asia, SET_B),
                (Region::Europe, SET_C),
            ],
        )
        .unwrap();

        assert_eq!(resolver.region_of("CY"), Region::Africa);
        assert_eq!(resolver.region_of("TUR"), Region::Asia);
    }

    #[test]
    fn test_inconsistent_mapping_rejected() {
        static MAPPING: &[(&str, &str)] = &[("CY", "CYP"), ("CX", "CYP")];
        static EMPTY: &[&str] = &[];
        let result = CountryCodeResolver::with_tables(
            MAPPING,
            [
                (Region::Africa, EMPTY),
                (Region::Asia, EMPTY),
                (Region::Europe, EMPTY),
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_default_countries_cover_all_regions() {
        let resolver = CountryCodeResolver::new();
        let alpha2 = resolver.default_countries(CodeScheme::Alpha2);
        let alpha3 = resolver.default_countries(CodeScheme::Alpha3);

        assert_eq!(alpha2.len(), AFRICA.len() + ASIA.len() + EUROPE.len());
        assert_eq!(alpha2.len(), alpha3.len());
        assert!(alpha2.iter().all(|c| c.len() == 2), "{alpha2:?}");
        assert!(alpha2.iter().all(|c| resolver.is_classified(c)));
        assert_eq!(
            resolver.countries_in(Region::Europe, CodeScheme::Alpha2).len(),
            EUROPE.len()
        );
    }
}
