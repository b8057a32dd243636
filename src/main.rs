mod cli;

use clap::Parser;
use serde::Serialize;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trendscope::engine::anomaly::Severity;
use trendscope::engine::momentum::{self, MomentumAnalysis};
use trendscope::engine::{score_batch, EngineSettings};
use trendscope::error::TrendError;
use trendscope::types::report::BatchReport;
use trendscope::types::scoring::Dimension;
use trendscope::{config, input, report};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const ANOMALIES: i32 = 1;
    pub const PARTIAL: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

#[derive(Serialize)]
struct MomentumOutput {
    points: usize,
    #[serde(flatten)]
    analysis: MomentumAnalysis,
    legacy_momentum: f64,
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(dir: &Path) -> Result<EngineSettings, TrendError> {
    match config::load_config(dir)? {
        Some(cfg) => cfg.settings(),
        None => {
            info!(dir = %dir.display(), "no trendscope.toml found, using built-in settings");
            Ok(EngineSettings::default())
        }
    }
}

fn min_severity(level: cli::MinSeverity) -> Severity {
    match level {
        cli::MinSeverity::Info => Severity::Info,
        cli::MinSeverity::Notable => Severity::Notable,
        cli::MinSeverity::Significant => Severity::Significant,
        cli::MinSeverity::Critical => Severity::Critical,
    }
}

fn run() -> Result<i32, TrendError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            let config_dir = cmd.config_dir.unwrap_or_else(|| ".".into());
            let settings = load_settings(&config_dir)?;
            let loaded = input::load_inputs(&cmd.path)?;

            let outcome = score_batch(&loaded.inputs, &settings);
            let threshold = min_severity(cmd.min_severity);
            let mut technologies = outcome.reports;
            for technology in &mut technologies {
                technology.retain_min_severity(threshold);
            }
            let mut failures = loaded.rejected;
            failures.extend(outcome.failures);

            let batch = BatchReport::new(loaded.sha256, technologies, failures);
            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(&batch, output_format)?;
            println!("{rendered}");

            if !batch.failures.is_empty() {
                Ok(exit_code::PARTIAL)
            } else if batch.anomaly_count() > 0 {
                Ok(exit_code::ANOMALIES)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Momentum(cmd) => {
            let points = input::load_points(&cmd.path)?;
            let analysis = momentum::analyze(&points);
            let output = MomentumOutput {
                points: points.len(),
                analysis,
                legacy_momentum: analysis.legacy_scalar(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Check(cmd) => {
            if !cmd.path.exists() {
                return Err(TrendError::PathNotFound(cmd.path.display().to_string()));
            }
            let settings = load_settings(&cmd.path)?;

            println!("config: ok");
            let mut profiles = vec![settings.default_profile()];
            profiles.extend(settings.category_profiles().values());
            for profile in profiles {
                let weights = Dimension::ALL
                    .into_iter()
                    .map(|dimension| format!("{dimension}={:.2}", profile.weight(dimension)))
                    .collect::<Vec<_>>();
                println!("profile {}: {}", profile.name, weights.join(" "));
            }
            for (category, dims) in settings.category_dimensions() {
                println!("category {category}: max_dimensions={dims}");
            }
            let anomaly = settings.anomaly();
            println!(
                "anomaly: min_history={} sigma={}/{}/{}",
                anomaly.min_history,
                anomaly.notable_sigma,
                anomaly.significant_sigma,
                anomaly.critical_sigma
            );
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
