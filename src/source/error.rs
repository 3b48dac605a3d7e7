//! Error types for observation sources.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching feed records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The feed file does not exist.
    #[error("Feed not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading the feed failed.
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be parsed.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}
