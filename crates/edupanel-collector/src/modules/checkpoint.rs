//! 수집 체크포인트 관리 모듈.
//!
//! 장시간 실행되는 수집 작업의 부분 결과를 주기적으로 저장합니다.
//!
//! # 파일
//!
//! - `{raw}.temp`: 지금까지 수집한 레코드 테이블 (CSV)
//! - `{raw}.checkpoint.json`: 진행 상태 ([`CheckpointInfo`])
//!
//! 체크포인트는 참고용입니다. 저장 실패는 수집을 중단시키지 않으며, 수집을
//! 재개하지도 않습니다.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use edupanel_data::save_frame;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CollectorError;
use crate::Result;

/// 체크포인트 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointStatus {
    /// 실행 중
    Running,
    /// 완료됨
    Completed,
}

impl CheckpointStatus {
    /// 문자열로 변환
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }
}

/// 체크포인트 상태 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointInfo {
    pub status: CheckpointStatus,
    /// 처리 완료된 국가 수
    pub countries_processed: usize,
    /// 저장된 행 수
    pub rows: usize,
    pub updated_at: DateTime<Utc>,
}

/// 파일 기반 체크포인트 기록기.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    table_path: PathBuf,
    status_path: PathBuf,
    every: usize,
}

impl Checkpoint {
    /// 최종 출력 파일 옆에 체크포인트를 둡니다.
    ///
    /// `every`개 국가마다 저장하며, 0이면 주기 저장을 하지 않습니다.
    pub fn beside(output: &Path, every: usize) -> Self {
        Self {
            table_path: with_suffix(output, ".temp"),
            status_path: with_suffix(output, ".checkpoint.json"),
            every,
        }
    }

    pub fn table_path(&self) -> &Path {
        &self.table_path
    }

    pub fn status_path(&self) -> &Path {
        &self.status_path
    }

    /// `countries_processed`개 처리 시점에 저장해야 하는지 여부.
    pub fn is_due(&self, countries_processed: usize) -> bool {
        self.every > 0 && countries_processed > 0 && countries_processed % self.every == 0
    }

    /// 부분 결과와 "running" 상태를 저장합니다.
    pub fn save(&self, table: &DataFrame, countries_processed: usize) -> Result<()> {
        save_frame(table, &self.table_path)?;
        self.write_status(CheckpointStatus::Running, countries_processed, table.height())?;
        debug!(
            path = %self.table_path.display(),
            countries_processed,
            rows = table.height(),
            "체크포인트 저장"
        );
        Ok(())
    }

    /// "completed" 상태를 기록합니다.
    pub fn mark_completed(&self, countries_processed: usize, rows: usize) -> Result<()> {
        self.write_status(CheckpointStatus::Completed, countries_processed, rows)
    }

    /// 저장된 상태를 읽습니다. 파일이 없으면 `None`.
    pub fn load_status(&self) -> Result<Option<CheckpointInfo>> {
        if !self.status_path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.status_path)
            .map_err(|e| CollectorError::Checkpoint(e.to_string()))?;
        let info = serde_json::from_str(&raw)
            .map_err(|e| CollectorError::Checkpoint(e.to_string()))?;
        Ok(Some(info))
    }

    /// 이전 실행의 체크포인트 파일을 삭제합니다.
    pub fn clear(&self) -> Result<()> {
        for path in [&self.table_path, &self.status_path] {
            if path.exists() {
                std::fs::remove_file(path)
                    .map_err(|e| CollectorError::Checkpoint(e.to_string()))?;
            }
        }
        Ok(())
    }

    fn write_status(
        &self,
        status: CheckpointStatus,
        countries_processed: usize,
        rows: usize,
    ) -> Result<()> {
        let info = CheckpointInfo {
            status,
            countries_processed,
            rows,
            updated_at: Utc::now(),
        };
        if let Some(parent) = self.status_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CollectorError::Checkpoint(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(&info)?;
        std::fs::write(&self.status_path, json)
            .map_err(|e| CollectorError::Checkpoint(e.to_string()))
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_beside_output() {
        let checkpoint = Checkpoint::beside(Path::new("data/raw/wb.csv"), 10);
        assert_eq!(checkpoint.table_path(), Path::new("data/raw/wb.csv.temp"));
        assert_eq!(
            checkpoint.status_path(),
            Path::new("data/raw/wb.csv.checkpoint.json")
        );
    }

    #[test]
    fn test_is_due_every_n_countries() {
        let checkpoint = Checkpoint::beside(Path::new("out.csv"), 10);
        assert!(!checkpoint.is_due(0));
        assert!(!checkpoint.is_due(9));
        assert!(checkpoint.is_due(10));
        assert!(checkpoint.is_due(20));

        let disabled = Checkpoint::beside(Path::new("out.csv"), 0);
        assert!(!disabled.is_due(10));
    }

    #[test]
    fn test_save_then_complete() {
        let dir = tempfile::tempdir().unwrap();
        let checkpoint = Checkpoint::beside(&dir.path().join("raw/wb.csv"), 1);
        let table = polars::df!("country_code" => &["FR"], "year" => &[2020i64]).unwrap();

        assert_eq!(checkpoint.load_status().unwrap(), None);

        checkpoint.save(&table, 1).unwrap();
        assert!(checkpoint.table_path().exists());
        let info = checkpoint.load_status().unwrap().unwrap();
        assert_eq!(info.status, CheckpointStatus::Running);
        assert_eq!(info.rows, 1);

        checkpoint.mark_completed(3, 30).unwrap();
        let info = checkpoint.load_status().unwrap().unwrap();
        assert_eq!(info.status, CheckpointStatus::Completed);
        assert_eq!(info.countries_processed, 3);

        checkpoint.clear().unwrap();
        assert!(!checkpoint.table_path().exists());
        assert!(!checkpoint.status_path().exists());
    }

    #[test]
    fn test_status_serialized_lowercase() {
        let json = serde_json::to_string(&CheckpointStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        assert_eq!(CheckpointStatus::Running.as_str(), "running");
    }
}
