//! CLI argument definitions using clap
//!
//! The binary is a one-shot transport: one JSON request in, one JSON
//! response out. `--source` skips the request envelope for local use.

use clap::Parser;
use std::path::PathBuf;

/// Multi-language semantic extraction for a single source file
#[derive(Parser, Debug)]
#[command(name = "semantic-extract")]
#[command(
    about = "Extract functions, types, imports, calls and symbols from source code",
    long_about = "Reads an analysis request ({\"filename\", \"content\", \"extension\"}) as JSON \
                  from stdin or --input and writes the analysis result as JSON to stdout."
)]
#[command(version)]
pub struct Cli {
    /// Read the JSON request from this file instead of stdin
    #[arg(short, long, env = "SEMANTIC_EXTRACT_INPUT", conflicts_with = "source")]
    pub input: Option<PathBuf>,

    /// Analyze a source file directly; the extension is taken from its path
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Pretty-print the JSON response
    #[arg(short, long, env = "SEMANTIC_EXTRACT_PRETTY")]
    pub pretty: bool,

    /// Debug-level logging to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the supported languages and their extensions as JSON, then exit
    #[arg(long)]
    pub list_languages: bool,
}

/// Where the request comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Stdin,
    RequestFile(PathBuf),
    SourceFile(PathBuf),
    ListLanguages,
}

impl Cli {
    pub fn input_mode(&self) -> InputMode {
        if self.list_languages {
            InputMode::ListLanguages
        } else if let Some(path) = &self.source {
            InputMode::SourceFile(path.clone())
        } else if let Some(path) = &self.input {
            InputMode::RequestFile(path.clone())
        } else {
            InputMode::Stdin
        }
    }

    /// Default `tracing` filter directive for this invocation
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "semantic_extract=debug"
        } else {
            "semantic_extract=warn"
        }
    }
}
