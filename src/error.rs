//! Error types for semantic-extract
//!
//! Nothing here ever aborts an analysis. Every variant except `Io` is turned
//! into a structured diagnostic inside the response by
//! [`AnalysisResult::from_error`](crate::schema::AnalysisResult::from_error).

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for semantic-extract operations
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unsupported file extension: {extension}")]
    UnsupportedExtension { extension: String },

    #[error("language not yet implemented: {language}")]
    NotImplemented { language: String },

    #[error("failed to parse {language}")]
    ParseFailure { language: String },

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Process exit code for this error.
    ///
    /// Analysis errors travel inside the response, so only transport
    /// failures produce a non-zero status.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io(_) => ExitCode::from(1),
            _ => ExitCode::SUCCESS,
        }
    }
}

/// Result type alias for semantic-extract operations
pub type Result<T> = std::result::Result<T, ExtractError>;
