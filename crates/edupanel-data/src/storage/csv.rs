//! CSV 입출력.
//!
//! 모든 컬럼을 문자열로 읽고(스키마 추론 없음), 빈 필드는 null로 읽습니다.
//! 쓸 때 null은 빈 필드가 됩니다. 타입 변환은 [`crate::RecordNormalizer`]가 담당합니다.

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use polars::prelude::*;
use tracing::{error, info};

use crate::Result;

/// 문자열 컬럼으로만 읽는 CSV 옵션.
fn read_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
}

/// 메모리의 CSV 바이트에서 테이블을 읽습니다. 헤더 행이 필요합니다.
pub fn read_frame(bytes: &[u8]) -> Result<DataFrame> {
    Ok(read_options()
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?)
}

/// CSV 파일에서 테이블을 읽습니다.
pub fn load_frame(path: &Path) -> Result<DataFrame> {
    let df = read_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    info!(path = %path.display(), rows = df.height(), columns = df.width(), "CSV 로드");
    Ok(df)
}

/// 소스 파일을 읽고, 실패하면 빈 테이블을 반환합니다.
///
/// 한 소스의 파일이 없거나 손상되어도 나머지 파이프라인은 계속 진행합니다.
pub fn load_or_empty(path: &Path, source: &str) -> DataFrame {
    match load_frame(path) {
        Ok(df) => df,
        Err(e) => {
            error!(source, path = %path.display(), error = %e, "소스 로드 실패, 빈 테이블로 진행");
            DataFrame::empty()
        }
    }
}

/// 테이블을 CSV로 씁니다.
pub fn write_frame<W: Write>(df: &DataFrame, writer: W) -> Result<()> {
    let mut df = df.clone();
    CsvWriter::new(writer).include_header(true).finish(&mut df)?;
    Ok(())
}

/// 테이블을 CSV 파일로 저장합니다. 상위 디렉터리가 없으면 생성합니다.
pub fn save_frame(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    write_frame(df, File::create(path)?)?;
    info!(path = %path.display(), rows = df.height(), "CSV 저장");
    Ok(())
}

/// 컬럼별 결측 아닌 값의 비율.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnCoverage {
    pub column: String,
    pub non_null: usize,
    pub total: usize,
}

impl ColumnCoverage {
    /// 결측 아닌 값 비율 (%)
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.non_null as f64 / self.total as f64) * 100.0
        }
    }
}

/// 모든 컬럼의 커버리지를 계산합니다.
pub fn column_coverage(df: &DataFrame) -> Vec<ColumnCoverage> {
    df.get_columns()
        .iter()
        .map(|column| ColumnCoverage {
            column: column.name().to_string(),
            non_null: column.len() - column.null_count(),
            total: df.height(),
        })
        .collect()
}

/// 컬럼별 커버리지를 기록합니다.
pub fn log_column_coverage(df: &DataFrame) {
    for coverage in column_coverage(df) {
        info!(
            column = %coverage.column,
            non_null = coverage.non_null,
            total = coverage.total,
            percentage = format!("{:.2}%", coverage.percentage()),
            "컬럼 커버리지"
        );
    }
}
