//! claimcheck - verify claims extracted from an AI response.
//!
//! Usage:
//!     claimcheck verify claims.json
//!     claimcheck verify claims.json --format json --output report.json
//!     claimcheck status

mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use claimcheck_core::ClaimBatch;
use claimcheck_runtime::{
    ApiCredential, BatchRun, BatchSequencerBuilder, RuntimeConfig, TracingObserver,
    GROUNDING_API_KEY_ENV, TRANSLATION_API_KEY_ENV,
};

#[derive(Parser, Debug)]
#[command(name = "claimcheck")]
#[command(about = "Detect potential hallucinations by checking claims against a grounding service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log filter (overrides RUST_LOG)
    #[arg(long, global = true)]
    log: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify a claims batch file
    Verify(VerifyArgs),

    /// Report which service credentials are configured
    Status,
}

#[derive(clap::Args, Debug)]
struct VerifyArgs {
    /// Claims batch JSON produced by the extraction step
    file: PathBuf,

    /// Runtime configuration (YAML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep reasons in the language the grounding service returns
    #[arg(long)]
    no_translate: bool,

    /// Pause between claims, e.g. "500ms" or "1s"
    #[arg(long, value_parser = humantime::parse_duration)]
    interval: Option<Duration>,

    /// Output format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write the JSON report to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());

    match cli.command {
        Command::Verify(args) => verify(args).await,
        Command::Status => status(),
    }
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("claimcheck=info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &VerifyArgs) -> Result<RuntimeConfig> {
    let mut config = match &args.config {
        Some(path) => RuntimeConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => RuntimeConfig::default(),
    };

    if args.no_translate {
        config.translation.enabled = false;
    }
    if let Some(interval) = args.interval {
        config.pacing.interval = interval;
    }

    Ok(config)
}

async fn verify(args: VerifyArgs) -> Result<()> {
    let config = load_config(&args)?;

    let batch = ClaimBatch::from_json_file(&args.file)
        .with_context(|| format!("reading claims batch {}", args.file.display()))?;

    let grounding = ApiCredential::from_env(GROUNDING_API_KEY_ENV, "Jina API key")?;
    let translation = ApiCredential::from_env_optional(TRANSLATION_API_KEY_ENV, "Gemini API key");

    let sequencer = BatchSequencerBuilder::from_config(&config, grounding, translation)?
        .observer(Arc::new(TracingObserver))
        .build()?;

    let report = match sequencer.verify_batch(&batch).await {
        BatchRun::NothingToVerify => {
            println!("No claims to verify.");
            return Ok(());
        }
        BatchRun::Verified(report) => report,
    };

    match args.format {
        OutputFormat::Text => print!("{}", report::render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing report to {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    Ok(())
}

fn status() -> Result<()> {
    let grounding = ApiCredential::is_available(GROUNDING_API_KEY_ENV);
    let translation = ApiCredential::is_available(TRANSLATION_API_KEY_ENV);

    println!(
        "Grounding   ({}): {}",
        GROUNDING_API_KEY_ENV,
        if grounding { "configured" } else { "missing" }
    );
    println!(
        "Translation ({}): {}",
        TRANSLATION_API_KEY_ENV,
        if translation {
            "configured"
        } else {
            "missing (reasons stay untranslated)"
        }
    );

    if !grounding {
        bail!("not ready: set {} to verify claims", GROUNDING_API_KEY_ENV);
    }

    println!("Ready.");
    Ok(())
}
