use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use snippet_locator::{
    assemble_snippet, remove_overlapping, LocatorConfig, Narrative, Snippet, SpanLocatorBuilder,
    Transcript, TranscriptIndex,
};
use tracing_subscriber::EnvFilter;

#[path = "snippet_spans/json_report_formatter.rs"]
mod json_report_formatter;

use json_report_formatter::{ReportMeta, SnippetReport};

#[derive(Debug, Parser)]
#[command(name = "snippet_spans")]
#[command(about = "Locate narrative snippets inside a word-timestamped transcript")]
struct Args {
    /// Whisper-style transcription JSON with `segments`.
    #[arg(long, env = "SNIPPET_SPANS_TRANSCRIPT")]
    transcript: PathBuf,
    /// Narrative list: a JSON array or `{ "snippets": [...] }`.
    #[arg(long, env = "SNIPPET_SPANS_NARRATIVES")]
    narratives: PathBuf,
    /// Locator config JSON; defaults apply when omitted.
    #[arg(long, env = "SNIPPET_SPANS_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "SNIPPET_SPANS_BUFFER_SECONDS")]
    buffer_seconds: Option<f64>,
    /// Report path; stdout when omitted.
    #[arg(long, env = "SNIPPET_SPANS_OUT")]
    out: Option<PathBuf>,
    /// Keep snippets that overlap an earlier one.
    #[arg(long, env = "SNIPPET_SPANS_KEEP_OVERLAPS", default_value_t = false)]
    keep_overlaps: bool,
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("snippet_spans: {err}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    let config = match args.config.as_ref() {
        Some(path) => LocatorConfig::load(path)
            .map_err(|err| format!("failed to load config '{}': {err}", path.display()))?,
        None => LocatorConfig::default(),
    };
    let mut builder = SpanLocatorBuilder::new(config);
    if let Some(buffer_seconds) = args.buffer_seconds {
        builder = builder.with_buffer_seconds(buffer_seconds);
    }
    let locator = builder.build().map_err(|err| err.to_string())?;

    let transcript = Transcript::load(&args.transcript).map_err(|err| {
        format!(
            "failed to load transcript '{}': {err}",
            args.transcript.display()
        )
    })?;
    let narratives = Narrative::load_list(&args.narratives).map_err(|err| {
        format!(
            "failed to load narratives '{}': {err}",
            args.narratives.display()
        )
    })?;

    let index = TranscriptIndex::from_transcript(&transcript);
    if index.is_empty() {
        tracing::warn!(
            transcript = %args.transcript.display(),
            "transcript has no words; every narrative will be skipped"
        );
    }

    let progress = ProgressBar::new(narratives.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("locating narratives");

    let mut snippets: Vec<Snippet> = narratives
        .par_iter()
        .filter_map(|narrative| {
            let snippet = assemble_snippet(&locator, &index, narrative);
            progress.inc(1);
            snippet
        })
        .collect();
    progress.finish_with_message("narratives located");

    let located_count = snippets.len();
    if !args.keep_overlaps {
        snippets = remove_overlapping(snippets);
    }

    let report = SnippetReport {
        meta: ReportMeta {
            generated_at: Utc::now().to_rfc3339(),
            transcript: args.transcript.display().to_string(),
            word_count: index.len(),
            narrative_count: narratives.len(),
            located_count,
            snippet_count: snippets.len(),
            buffer_seconds: locator.config().buffer_seconds,
        },
        snippets,
    };

    json_report_formatter::emit_report(&report, args.out.as_deref())?;
    if let Some(path) = args.out.as_ref() {
        eprintln!("report written to {}", path.display());
    }
    Ok(())
}
