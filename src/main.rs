use std::path::PathBuf;
use std::process::ExitCode;

use agent_scheduler::api::config_dto::RunConfigDto;
use agent_scheduler::domain::observer::AnalyticsObserver;
use agent_scheduler::domain::statistics::StatsWriter;
use agent_scheduler::formatter::format_schedule;
use agent_scheduler::loader::parser::parse_json_file;
use agent_scheduler::{generate_schedule_from_file, logger};
use anyhow::Context;
use clap::Parser;
use colored::Colorize;

/// Computes hourly agent staffing from forecasted call volumes.
#[derive(Debug, Parser)]
#[command(name = "agent_scheduler", version, about)]
struct Cli {
    /// Input CSV file.
    #[arg(short, long)]
    input: PathBuf,

    /// Output format: text, json or csv.
    #[arg(short, long)]
    format: Option<String>,

    /// Share of an hour agents spend on calls, in (0, 1].
    #[arg(short, long)]
    utilization: Option<f64>,

    /// Maximum agents per hour (0 = unlimited).
    #[arg(short, long)]
    capacity: Option<i64>,

    /// JSON file with run configuration; flags take precedence over it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Calendar day the input times refer to (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    date: Option<String>,

    /// Time zone for rows before any zone header (code like PT or an IANA name).
    #[arg(long)]
    default_tz: Option<String>,

    /// Write run statistics as CSV to this file.
    #[arg(long)]
    stats_file: Option<String>,

    /// Log level (error, warn, info, debug, trace). Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> RunConfigDto {
        RunConfigDto {
            utilization: self.utilization,
            capacity: self.capacity,
            format: self.format.clone(),
            default_time_zone: self.default_tz.clone(),
            reference_date: self.date.clone(),
            stats_file: self.stats_file.clone(),
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let file_config = match &cli.config {
        Some(path) => parse_json_file::<RunConfigDto>(path).with_context(|| format!("reading config file '{}'", path.display()))?,
        None => RunConfigDto::default(),
    };
    let config = file_config.merge(cli.overrides()).into_config()?;

    let mut observer = AnalyticsObserver::new();
    let schedule = generate_schedule_from_file(&cli.input, &config, &mut observer)
        .with_context(|| format!("scheduling '{}'", cli.input.display()))?;

    print!("{}", format_schedule(&schedule, config.format)?);

    if let (Some(stats_file), Some(statistics)) = (&config.stats_file, &observer.statistics) {
        StatsWriter::new(Some(PathBuf::from(stats_file)))
            .write(&statistics.to_event())
            .with_context(|| format!("writing statistics to '{}'", stats_file))?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.log_level.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
