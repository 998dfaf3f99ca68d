//! 지역 분류.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 국가의 대략적인 지역 분류.
///
/// 정적 국가 집합 어디에도 속하지 않는 국가는 [`Region::Unknown`]입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Africa,
    Asia,
    Europe,
    Unknown,
}

impl Region {
    /// 분류 우선순위 순서의 지역 목록 (첫 일치가 우선).
    pub const CLASSIFIED: [Region; 3] = [Region::Africa, Region::Asia, Region::Europe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    /// 이전 산출물의 `Other` 레이블은 `Unknown`으로 읽습니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "africa" => Ok(Region::Africa),
            "asia" => Ok(Region::Asia),
            "europe" => Ok(Region::Europe),
            "unknown" | "other" => Ok(Region::Unknown),
            _ => Err(format!("Unknown region label: {}", s)),
        }
    }
}
