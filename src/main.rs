//! semantic-extract CLI entry point

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use semantic_extract::cli::InputMode;
use semantic_extract::{
    analyze, supported_languages, AnalysisRequest, AnalysisResult, Cli, ExtractError,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    }
}

/// Logs go to stderr; stdout carries exactly one JSON document
fn init_logging(cli: &Cli) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = cli.log_directive().parse() {
        filter = filter.add_directive(directive);
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> semantic_extract::Result<()> {
    match cli.input_mode() {
        InputMode::ListLanguages => write_json(&supported_languages(), cli.pretty),
        InputMode::SourceFile(path) => {
            let request = request_from_source(&path)?;
            write_json(&analyze(&request), cli.pretty)
        }
        InputMode::RequestFile(path) => {
            debug!(path = %path.display(), "reading request file");
            let raw = fs::read(&path)?;
            write_json(&respond(&raw), cli.pretty)
        }
        InputMode::Stdin => {
            let mut raw = Vec::new();
            io::stdin().read_to_end(&mut raw)?;
            write_json(&respond(&raw), cli.pretty)
        }
    }
}

/// Decode a request and analyze it; a malformed request is answered, not failed
fn respond(raw: &[u8]) -> AnalysisResult {
    match serde_json::from_slice::<AnalysisRequest>(raw) {
        Ok(request) => analyze(&request),
        Err(e) => {
            let err = ExtractError::InvalidRequest {
                message: e.to_string(),
            };
            warn!("{}", err);
            AnalysisResult::from_error("unknown", &err)
        }
    }
}

fn request_from_source(path: &Path) -> semantic_extract::Result<AnalysisRequest> {
    let bytes = fs::read(path)?;
    Ok(AnalysisRequest {
        filename: path.display().to_string(),
        content: String::from_utf8_lossy(&bytes).into_owned(),
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string(),
    })
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> semantic_extract::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(io::Error::other)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()?;
    Ok(())
}
