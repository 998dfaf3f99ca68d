//! tracing을 사용한 로깅 인프라.
//!
//! 수집·정제·병합 단계의 진행 상황과 통계를 구조화된 필드로 남깁니다.
//! 출력 형식은 다음 세 가지를 지원합니다:
//! - **pretty**: 개발용 사람이 읽기 쉬운 형식
//! - **json**: 로그 집계용 JSON 형식
//! - **compact**: 장시간 수집 실행용 한 줄 형식

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 파이프라인을 구성하는 크레이트 이름 (필터 지시자 생성용).
const PIPELINE_CRATES: [&str; 3] = ["edupanel_core", "edupanel_data", "edupanel_collector"];

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식
    Pretty,
    /// JSON 형식
    Json,
    /// 간결한 한 줄 형식
    #[default]
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 필터 지시자 (예: "info", "edupanel_collector=debug")
    pub filter: String,
    /// 출력 형식
    pub format: LogFormat,
    /// 파일명과 줄 번호 포함 여부
    pub with_file: bool,
    /// 대상(모듈 경로) 포함 여부
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Compact,
            with_file: false,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// 파이프라인 크레이트에만 주어진 레벨을 적용하는 설정을 생성합니다.
    ///
    /// 의존 크레이트(reqwest, hyper 등)의 로그는 `warn` 이상만 출력됩니다.
    pub fn for_pipeline(level: &str) -> Self {
        let mut directives = vec!["warn".to_string()];
        directives.extend(PIPELINE_CRATES.iter().map(|c| format!("{}={}", c, level)));

        Self {
            filter: directives.join(","),
            ..Default::default()
        }
    }

    /// 로그 형식을 설정합니다.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// 환경 변수에서 설정을 생성합니다.
    ///
    /// `RUST_LOG`가 없으면 `info` 레벨 파이프라인 필터를 사용합니다.
    pub fn from_env() -> Self {
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        match std::env::var("RUST_LOG") {
            Ok(filter) => Self {
                filter,
                format,
                ..Default::default()
            },
            Err(_) => Self::for_pipeline("info").with_format(format),
        }
    }
}

/// 주어진 설정으로 로깅 시스템을 초기화합니다.
///
/// `RUST_LOG`가 설정되어 있으면 설정의 필터보다 우선합니다.
///
/// # 예제
///
/// ```no_run
/// use edupanel_core::logging::{init_logging, LogConfig, LogFormat};
///
/// init_logging(LogConfig::for_pipeline("debug").with_format(LogFormat::Json)).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.filter))?;

    let fmt_layer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_file(config.with_file)
            .with_line_number(config.with_file)
            .with_target(config.with_target)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_file(config.with_file)
            .with_line_number(config.with_file)
            .with_target(config.with_target)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_file(config.with_file)
            .with_line_number(config.with_file)
            .with_target(config.with_target)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    tracing::debug!(format = ?config.format, filter = %config.filter, "Logging initialized");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_pipeline_filter_covers_all_crates() {
        let config = LogConfig::for_pipeline("debug");

        assert!(config.filter.starts_with("warn,"));
        for krate in PIPELINE_CRATES {
            assert!(config.filter.contains(&format!("{}=debug", krate)));
        }
        assert!(EnvFilter::try_new(&config.filter).is_ok());
    }
}
