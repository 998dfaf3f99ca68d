//! EduPanel 파이프라인 CLI.

use clap::{Parser, Subcommand};
use edupanel_collector::modules::{self, CollectOptions};
use edupanel_collector::CollectorConfig;
use edupanel_core::{init_logging, LogConfig, LogFormat, YearRange};

#[derive(Parser)]
#[command(name = "edupanel")]
#[command(about = "Education & socio-economic indicator panel builder", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, default_value = "compact")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// World Bank 지표 수집
    Collect {
        /// 특정 국가만 수집 (alpha-2, 쉼표로 구분, 예: "FR,KE")
        #[arg(long)]
        countries: Option<String>,

        /// 특정 지표만 수집 (원격 코드, 쉼표로 구분)
        #[arg(long)]
        indicators: Option<String>,

        /// 연도 범위 (예: "2013-2022")
        #[arg(long)]
        years: Option<String>,

        /// 진행률 표시 끄기
        #[arg(long)]
        no_progress: bool,
    },

    /// UNESCO 내보내기 파일 조립
    AssembleSecondary,

    /// 원시 테이블 정제
    Clean,

    /// 정제 → 코드 정렬 → 병합
    Merge,

    /// 전체 파이프라인 실행 (수집 → 조립 → 병합)
    RunAll,
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 로깅 초기화
    let format: LogFormat = cli.log_format.parse()?;
    init_logging(LogConfig::for_pipeline(&cli.log_level).with_format(format))?;

    tracing::info!("EduPanel 파이프라인 시작");

    // 설정 로드
    let config = CollectorConfig::from_env()?;
    tracing::debug!(
        base_url = %config.api.base_url,
        data_dir = %config.paths.data_dir.display(),
        rate_limit = config.api.rate_limit,
        "설정 로드 완료"
    );

    match cli.command {
        Commands::Collect {
            countries,
            indicators,
            years,
            no_progress,
        } => {
            let options = CollectOptions {
                countries: countries.as_deref().map(split_list),
                indicators: indicators.as_deref().map(split_list),
                years: years.as_deref().map(str::parse::<YearRange>).transpose()?,
                show_progress: !no_progress,
            };
            let stats = modules::collect_primary(&config, &options).await?;
            stats.log_summary("World Bank 수집");
        }
        Commands::AssembleSecondary => {
            let rows = modules::assemble_secondary(&config)?;
            tracing::info!(rows, "UNESCO 조립 완료");
        }
        Commands::Clean => {
            let (primary, secondary) = modules::clean_sources(&config)?;
            tracing::info!(
                primary_rows = primary.height(),
                secondary_rows = secondary.height(),
                "정제 완료"
            );
        }
        Commands::Merge => {
            modules::merge_sources(&config)?;
        }
        Commands::RunAll => {
            tracing::info!("=== 전체 파이프라인 시작 ===");

            tracing::info!("Step 1/3: World Bank 수집");
            let options = CollectOptions {
                show_progress: true,
                ..Default::default()
            };
            let stats = modules::collect_primary(&config, &options).await?;
            stats.log_summary("World Bank 수집");

            tracing::info!("Step 2/3: UNESCO 조립");
            let rows = modules::assemble_secondary(&config)?;
            tracing::info!(rows, "UNESCO 조립 완료");

            tracing::info!("Step 3/3: 병합");
            modules::merge_sources(&config)?;

            tracing::info!("=== 전체 파이프라인 완료 ===");
        }
    }

    tracing::info!("EduPanel 파이프라인 종료");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_and_skips_empty() {
        assert_eq!(split_list(" FR, KE,,DE "), vec!["FR", "KE", "DE"]);
    }

    #[test]
    fn test_cli_parses_collect_arguments() {
        let cli = Cli::try_parse_from([
            "edupanel",
            "--log-level",
            "debug",
            "collect",
            "--countries",
            "FR,KE",
            "--years",
            "2015-2016",
            "--no-progress",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Commands::Collect {
                countries,
                years,
                no_progress,
                ..
            } => {
                assert_eq!(countries.as_deref(), Some("FR,KE"));
                assert_eq!(years.as_deref(), Some("2015-2016"));
                assert!(no_progress);
            }
            _ => panic!("expected collect"),
        }
    }
}
