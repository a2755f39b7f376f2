//! Error types for llmcompress-rs.
//!
//! # Example - Pattern Matching
//!
//! ```rust
//! use llmcompress_rs::{CompressError, HuggingfaceLock};
//!
//! # fn main() {
//! match HuggingfaceLock::from_file("/nonexistent/huggingface.lock.yaml") {
//!     Ok(lock) => println!("{} models pinned", lock.models.len()),
//!     Err(CompressError::Io(e)) => eprintln!("cannot read lock file: {}", e),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! # }
//! ```

use thiserror::Error;

/// Result type alias for llmcompress-rs operations.
pub type Result<T> = std::result::Result<T, CompressError>;

/// Errors that can occur while driving a compression run.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CompressError {
    /// A produced artifact is malformed.
    #[error("artifact error: {0}")]
    Artifact(String),

    /// YAML (de)serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The lock file does not pin the model or dataset being used.
    #[error("lock mismatch: {0}")]
    Lock(String),

    /// The interpreter hosting the compression library could not be started.
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        /// Program that failed to start.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The compression library ran but reported failure.
    #[error("backend error: {0}")]
    Backend(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON metadata error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Progress bar template error.
    #[error("template error: {0}")]
    Template(String),
}

impl From<indicatif::style::TemplateError> for CompressError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        CompressError::Template(err.to_string())
    }
}
