// ABOUTME: stepgate CLI - shows recent step data from a health data provider
// ABOUTME: Mounts the step data screen, triggers a fetch and prints the rendered screen
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Last 24 hours from the synthetic provider
//! stepgate fetch
//!
//! # Read an export file, 48 hour window, JSON output
//! stepgate fetch --provider export-file --export steps.json --hours 48 --format json
//!
//! # Keep the screen closed unless read access is actually granted
//! stepgate fetch --strict
//!
//! # Show granted permissions after negotiation
//! stepgate permissions
//!
//! # Write a synthetic export file for the export-file provider
//! stepgate demo-export --out steps.json --seed 7
//! ```

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use stepgate::config::StepgateConfig;
use stepgate::errors::{AppError, AppResult};
use stepgate::formatters::{format_output, OutputFormat};
use stepgate::logging::LoggingConfig;
use stepgate::notifications::TerminalSink;
use stepgate::orchestrator::{
    FetchOutcome, MountOutcome, PermissionNegotiator, ReadinessPolicy, StepDataScreen,
};
use stepgate_providers::{create_provider, ExportDocument, ProviderKind, SyntheticProvider};
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "stepgate",
    about = "Recent step data from a health data provider",
    long_about = "Initializes a health data provider, negotiates read access to step records and shows the records of a trailing time window."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Mount the screen, fetch once and print it
    Fetch {
        #[command(flatten)]
        provider: ProviderArgs,

        /// Window length in hours (overrides STEPGATE_LOOKBACK_HOURS)
        #[arg(long)]
        hours: Option<u32>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Keep the screen closed when read access is not granted
        #[arg(long)]
        strict: bool,
    },

    /// Initialize the provider, negotiate permissions and list the granted set
    Permissions {
        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Write a synthetic step export usable with `--provider export-file`
    DemoExport {
        /// Destination file
        #[arg(long)]
        out: PathBuf,

        /// Hours of hourly records ending now
        #[arg(long, default_value = "48")]
        hours: u32,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

#[derive(Args)]
struct ProviderArgs {
    /// Provider: synthetic or export-file (overrides STEPGATE_PROVIDER)
    #[arg(long)]
    provider: Option<ProviderKind>,

    /// Export file path (overrides STEPGATE_EXPORT_PATH)
    #[arg(long)]
    export: Option<PathBuf>,
}

impl ProviderArgs {
    fn apply(self, config: &mut StepgateConfig) {
        if let Some(kind) = self.provider {
            config.provider = kind;
        }
        if let Some(path) = self.export {
            config.export_path = Some(path);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.verbose();
    }
    if let Err(e) = logging.init() {
        eprintln!("{e}");
    }

    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            error!(code = ?e.code, "{e}");
            eprintln!("error: {e}");
            ExitCode::from(u8::try_from(e.code.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(command: Command) -> AppResult<ExitCode> {
    match command {
        Command::Fetch {
            provider,
            hours,
            format,
            strict,
        } => {
            let mut config = StepgateConfig::from_env()?;
            provider.apply(&mut config);
            if let Some(hours) = hours {
                config.lookback_hours = hours;
            }
            if strict {
                config.readiness_policy = ReadinessPolicy::Strict;
            }
            config.validate()?;
            config.log_summary();
            fetch(&config, format).await
        }
        Command::Permissions { provider } => {
            let mut config = StepgateConfig::from_env()?;
            provider.apply(&mut config);
            config.validate()?;
            permissions(&config).await
        }
        Command::DemoExport { out, hours, seed } => demo_export(out, hours, seed).await,
    }
}

async fn fetch(config: &StepgateConfig, format: OutputFormat) -> AppResult<ExitCode> {
    let provider = create_provider(&config.provider_settings(Utc::now()))?;
    let screen = StepDataScreen::new(provider, Arc::new(TerminalSink), config.screen_options());

    let mounted = screen.mount().await;
    info!(outcome = ?mounted, "screen mounted");
    let fetched = screen.fetch_steps().await;

    let output = format_output(&screen.view(), format)
        .map_err(|e| AppError::internal(e.to_string()))?;
    print!("{}", output.data);
    if format == OutputFormat::Json {
        println!();
    }

    Ok(match (mounted, fetched) {
        (_, FetchOutcome::Updated { .. } | FetchOutcome::Superseded) => ExitCode::SUCCESS,
        (MountOutcome::PermissionsRequired, _) => ExitCode::from(3),
        (_, FetchOutcome::NotReady) => ExitCode::from(4),
        (_, FetchOutcome::Failed) => ExitCode::from(5),
    })
}

async fn permissions(config: &StepgateConfig) -> AppResult<ExitCode> {
    let provider = create_provider(&config.provider_settings(Utc::now()))?;
    if !provider.initialize().await? {
        return Err(AppError::new(
            stepgate::errors::ErrorCode::ExternalServiceUnavailable,
            format!("{} is not supported here", provider.name()),
        ));
    }

    let negotiator = PermissionNegotiator::for_record_type(config.record_type.clone());
    let outcome = negotiator.negotiate(provider.as_ref()).await?;
    info!(outcome = ?outcome, "negotiation finished");

    for permission in provider.get_granted_permissions().await? {
        println!("{permission}");
    }
    Ok(if outcome.is_satisfied() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(3)
    })
}

async fn demo_export(out: PathBuf, hours: u32, seed: u64) -> AppResult<ExitCode> {
    let records = SyntheticProvider::hourly_steps(Utc::now(), hours, seed);
    let count = records.len();
    ExportDocument::steps(records).write_to(&out).await?;
    println!("wrote {count} step records to {}", out.display());
    Ok(ExitCode::SUCCESS)
}
