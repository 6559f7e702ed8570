//! Error types for the mixing engine.

use std::path::PathBuf;

use duckmix_spec::ValidationError;
use thiserror::Error;

/// Result type for engine operations.
pub type MixResult<T> = Result<T, MixError>;

/// Errors that can occur while producing a mix.
///
/// None of these are retried. Each one names the stage or file it came from
/// so the caller can report it and exit non-zero.
#[derive(Debug, Error)]
pub enum MixError {
    /// An input file is missing, unreadable, or not a supported PCM container.
    #[error("cannot load {role} '{}': {message}", path.display())]
    Input {
        /// Which stem the file was loaded as ("voice" or "music").
        role: &'static str,
        /// Offending file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// The mix configuration failed validation.
    #[error("invalid mix config: {}", format_errors(.errors))]
    Config {
        /// Every validation error found.
        errors: Vec<ValidationError>,
    },

    /// A stage broke an internal invariant (e.g. mismatched lengths after alignment).
    #[error("{stage} failed: {message}")]
    Processing {
        /// Pipeline stage that detected the violation.
        stage: &'static str,
        /// What went wrong.
        message: String,
    },

    /// The mastered file could not be written.
    #[error("cannot write '{}': {message}", path.display())]
    Output {
        /// Destination file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl MixError {
    /// Creates an input error.
    pub fn input(role: &'static str, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Input {
            role,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a processing error.
    pub fn processing(stage: &'static str, message: impl Into<String>) -> Self {
        Self::Processing {
            stage,
            message: message.into(),
        }
    }

    /// Creates an output error.
    pub fn output(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Output {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            MixError::Input { .. } => "MIX_001",
            MixError::Config { .. } => "MIX_002",
            MixError::Processing { .. } => "MIX_003",
            MixError::Output { .. } => "MIX_004",
            MixError::Io(_) => "MIX_005",
        }
    }

    /// Returns the error class name.
    pub fn category(&self) -> &'static str {
        match self {
            MixError::Input { .. } => "input",
            MixError::Config { .. } => "config",
            MixError::Processing { .. } => "processing",
            MixError::Output { .. } | MixError::Io(_) => "io",
        }
    }
}
