use std::path::PathBuf;

use anyhow::Result;
use clap::{error::ErrorKind, Parser};
use tracing::info;

use analyzer::config::Config;
use analyzer::models::AnalysisOutcome;
use analyzer::scoring::ScoringWeights;
use analyzer::{analyze_resume, telemetry, Toolkit};

/// Score a résumé against a job description and print the result as JSON.
///
/// Every outcome, including bad arguments and analysis failures, is printed
/// as a single JSON object on stdout and the process exits 0.
#[derive(Debug, Parser)]
#[command(name = "analyzer", version)]
struct Cli {
    /// Path to the résumé (PDF, .txt or .md)
    resume_path: PathBuf,

    /// Job description text
    job_description: String,

    /// JSON object overriding scoring weights, e.g. '{"skills": 60, "grammar": 0}'
    #[arg(long, env = "ANALYZER_WEIGHTS")]
    weights: Option<String>,

    /// Print single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Log pipeline stages to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let parsed = Cli::try_parse();
    let verbose = matches!(&parsed, Ok(cli) if cli.verbose);
    telemetry::init_tracing(if verbose { "debug" } else { "warn" });

    let cli = match parsed {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            emit(&AnalysisOutcome::error(clap_message(&e)), false);
            return;
        }
    };

    let compact = cli.compact;
    let outcome = run(cli)
        .await
        .unwrap_or_else(|e| AnalysisOutcome::error(format!("{e:#}")));
    emit(&outcome, compact);
}

async fn run(cli: Cli) -> Result<AnalysisOutcome> {
    let config = Config::analysis_from_env();
    let weights = match cli.weights.as_deref() {
        Some(raw) => ScoringWeights::from_json(raw)?,
        None => ScoringWeights::default(),
    };

    let toolkit = Toolkit::init(&config)?;
    info!(resume = %cli.resume_path.display(), "analyzing resume");

    Ok(analyze_resume(&toolkit, &cli.resume_path, &cli.job_description, &weights).await)
}

fn emit(outcome: &AnalysisOutcome, compact: bool) {
    let rendered = if compact {
        serde_json::to_string(outcome)
    } else {
        serde_json::to_string_pretty(outcome)
    };
    match rendered {
        Ok(json) => println!("{json}"),
        Err(e) => println!("{}", serde_json::json!({ "error": e.to_string() })),
    }
}

/// First line of a clap error without the "error: " prefix.
fn clap_message(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).trim().to_string()
}
