//! Command-line front end for the SHAPE analyzer.
//!
//! Usage:
//!   shape-analyzer transcript.txt
//!   shape-analyzer notes.md --format text --tier light
//!   cat chat.txt | shape-analyzer - --compact

use anyhow::Result;
use clap::{Parser, ValueEnum};
use shape_analyzer::config::Config;
use shape_analyzer::input::{check_size, read_transcript_file};
use shape_analyzer::report::{ReportTier, ShapeReport, render_text, transcript_digest};
use shape_analyzer::{ShapeEngine, TranscriptInput};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shape-analyzer")]
#[command(about = "Score a human/AI chat transcript on the SHAPE dimensions", long_about = None)]
struct Cli {
    /// Transcript file (.txt or .md); reads stdin when omitted or "-"
    path: Option<PathBuf>,
    /// Report tier; defaults to the configured tier
    #[arg(long)]
    tier: Option<ReportTier>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.runtime.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    match run(&cli, &config) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!("analysis failed: {}", e);
            eprintln!("{}", e.public_message());
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli, config: &Config) -> shape_analyzer::Result<String> {
    let text = match cli.path.as_deref() {
        Some(path) if path.as_os_str() != "-" => read_transcript_file(path, &config.input)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            check_size(&buf, &config.input)?;
            buf
        }
    };

    let engine = ShapeEngine::new();
    let result = engine.analyze(&TranscriptInput::Raw(text.clone()))?;
    info!(
        "analyzed {} turns: total={} ({})",
        result.stats.turns, result.scores.total, result.classification
    );

    let tier = cli.tier.unwrap_or(config.report.tier);
    let report = ShapeReport::build(result, tier, transcript_digest(&text));
    match cli.format {
        OutputFormat::Json => report.to_json(config.report.pretty && !cli.compact),
        OutputFormat::Text => Ok(render_text(&report)),
    }
}

