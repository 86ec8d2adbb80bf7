//! Error types for the replay binary.

use std::path::PathBuf;

/// Top-level error for the replay binary.
///
/// Only startup and I/O can fail a replay; per-tick problems are reported
/// in the tick summaries instead.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: arena_core::ConfigError,
    },

    /// The command line was not understood.
    #[error("usage: arena-replay <frames.jsonl> [config.yaml] ({message})")]
    Usage {
        /// What was wrong.
        message: String,
    },

    /// The frames file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line of the frames file is not a valid frame.
    #[error("invalid frame on line {line}: {source}")]
    Frame {
        /// 1-based line number.
        line: usize,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The final report could not be serialized.
    #[error("failed to serialize report: {source}")]
    Report {
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
