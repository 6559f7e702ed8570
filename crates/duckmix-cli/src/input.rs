//! Loading mix configs from JSON files.
//!
//! A missing `--config` yields the built-in defaults. A given file is read,
//! hashed for provenance, and parsed; unknown fields are rejected by the
//! config types themselves.

use duckmix_spec::MixConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result of loading a mix config.
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// The parsed config (defaults filled in for missing fields).
    pub config: MixConfig,
    /// BLAKE3 hash of the raw file contents, if a file was read.
    pub source_hash: Option<String>,
}

/// Errors that can occur while loading a config file.
#[derive(Debug)]
pub enum InputError {
    /// Failed to read the file.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a valid config document.
    JsonParse { path: PathBuf, message: String },
}

impl InputError {
    /// Stable CLI error code for JSON output.
    pub fn code(&self) -> &'static str {
        use crate::commands::json_output::error_codes;
        match self {
            InputError::FileRead { .. } => error_codes::FILE_READ,
            InputError::JsonParse { .. } => error_codes::JSON_PARSE,
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read config '{}': {}", path.display(), source)
            }
            InputError::JsonParse { path, message } => {
                write!(f, "failed to parse config '{}': {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Loads a mix config, falling back to defaults when no path is given.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use duckmix_cli::input::load_config;
///
/// let loaded = load_config(Some(Path::new("mix.json"))).unwrap();
/// println!("target rate: {}", loaded.config.master.sample_rate);
/// ```
pub fn load_config(path: Option<&Path>) -> Result<LoadResult, InputError> {
    let Some(path) = path else {
        return Ok(LoadResult {
            config: MixConfig::default(),
            source_hash: None,
        });
    };

    let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let config = MixConfig::from_json(&content).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), hash = %&source_hash[..16], "config loaded");

    Ok(LoadResult {
        config,
        source_hash: Some(source_hash),
    })
}
