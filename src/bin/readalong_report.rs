use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use readalong_rs::{
    build_timeline_report, ReadAlongBuilder, ReadAlongConfig, ReadAlongError, ReportMeta,
};
use tracing_subscriber::EnvFilter;

#[path = "readalong_report/json_report_formatter.rs"]
mod json_report_formatter;
#[path = "readalong_report/text_report_formatter.rs"]
mod text_report_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "readalong_report")]
#[command(about = "Segment a transcript and estimate its read-along timeline")]
struct Args {
    /// Transcript text file (UTF-8).
    #[arg(long, env = "READALONG_REPORT_TRANSCRIPT")]
    transcript: PathBuf,
    /// Audio duration in seconds; enables per-span timing.
    #[arg(long, env = "READALONG_REPORT_DURATION")]
    duration: Option<f64>,
    /// Playback time in seconds to resolve to an active span.
    #[arg(long, env = "READALONG_REPORT_AT")]
    at: Option<f64>,
    /// JSON read-along config (pause units, span floor).
    #[arg(long, env = "READALONG_REPORT_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "READALONG_REPORT_MIN_SPAN_WORDS")]
    min_span_words: Option<usize>,
    #[arg(
        long,
        env = "READALONG_REPORT_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Text
    )]
    output_format: OutputFormat,
    /// Write JSON here instead of stdout.
    #[arg(long, env = "READALONG_REPORT_OUT")]
    out: Option<PathBuf>,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(err) = run() {
        eprintln!("readalong_report: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    if let Some(duration) = args.duration {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ReadAlongError::invalid_input(format!(
                "--duration must be a positive number of seconds (got {duration})"
            ))
            .to_string());
        }
    }
    if args.at.is_some() && args.duration.is_none() {
        tracing::warn!("--at given without --duration; the first span is reported");
    }

    let mut config = load_config(args.config.as_deref()).map_err(|err| err.to_string())?;
    if let Some(min_span_words) = args.min_span_words {
        config.min_span_words = min_span_words;
    }

    let transcript = fs::read_to_string(&args.transcript)
        .map_err(|e| ReadAlongError::io("read transcript", e).to_string())?;

    let engine = ReadAlongBuilder::new(config)
        .build()
        .map_err(|err| err.to_string())?;
    let spans = engine.segment(&transcript);
    if spans.is_empty() {
        tracing::warn!(
            transcript = %args.transcript.display(),
            "transcript produced no spans"
        );
    }

    let source = args.transcript.display().to_string();
    let report = build_timeline_report(
        &spans,
        args.duration,
        args.at,
        ReportMeta {
            generated_at: Utc::now().to_rfc3339(),
            source: &source,
            transcript_bytes: transcript.len(),
        },
    );

    match (args.output_format, args.out.as_ref()) {
        (OutputFormat::Json, Some(path)) => json_report_formatter::write_report(path, &report),
        (OutputFormat::Json, None) => json_report_formatter::print_report(&report),
        (OutputFormat::Text, out) => {
            if out.is_some() {
                tracing::warn!("--out is only used with --output-format json");
            }
            print!("{}", text_report_formatter::render(&report));
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ReadAlongConfig, ReadAlongError> {
    match path {
        Some(path) => ReadAlongConfig::load(path),
        None => Ok(ReadAlongConfig::default()),
    }
}
