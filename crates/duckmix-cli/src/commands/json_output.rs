//! JSON output types for machine-readable CLI output.
//!
//! Every command that accepts `--json` prints exactly one of these documents
//! to stdout, success or failure, so callers never have to scrape colored
//! text.

use duckmix_engine::analysis::BandEnergy;
use duckmix_engine::{MixError, MixReport};
use duckmix_spec::{ValidationError, ValidationWarning};
use serde::Serialize;

use crate::input::InputError;

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: CLI_XXX for CLI-level errors; config validation (`E0XX`) and
/// engine (`MIX_0XX`) codes pass through unchanged.
pub mod error_codes {
    /// Config file could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Config file is not a valid config document
    pub const JSON_PARSE: &str = "CLI_002";
    /// Output could not be serialized
    pub const JSON_SERIALIZE: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E004", "MIX_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic config field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// File the error is about (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the config path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// JSON path to the config field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Converts a config validation error.
pub fn validation_error_to_json(error: &ValidationError) -> JsonError {
    let json = JsonError::new(error.code.code(), &error.message);
    match &error.path {
        Some(path) => json.with_path(path),
        None => json,
    }
}

/// Converts a config validation warning.
pub fn validation_warning_to_json(warning: &ValidationWarning) -> JsonWarning {
    JsonWarning {
        code: warning.code.code().to_string(),
        message: warning.message.clone(),
        path: warning.path.clone(),
    }
}

/// Converts a config loading error.
pub fn input_error_to_json(error: &InputError) -> JsonError {
    let file = match error {
        InputError::FileRead { path, .. } | InputError::JsonParse { path, .. } => path,
    };
    JsonError::new(error.code(), error.to_string()).with_file(file.display().to_string())
}

/// Converts an engine error. Config errors expand to one entry per problem.
pub fn mix_error_to_json(error: &MixError) -> Vec<JsonError> {
    match error {
        MixError::Config { errors } => errors.iter().map(validation_error_to_json).collect(),
        MixError::Input { path, .. } | MixError::Output { path, .. } => {
            vec![JsonError::new(error.code(), error.to_string()).with_file(path.display().to_string())]
        }
        other => vec![JsonError::new(other.code(), other.to_string())],
    }
}

/// JSON output for the `mix` command.
#[derive(Debug, Clone, Serialize)]
pub struct MixOutput {
    /// Whether a mix was written
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Config warnings
    pub warnings: Vec<JsonWarning>,
    /// Mix details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MixResult>,
}

/// Details of a written mix.
#[derive(Debug, Clone, Serialize)]
pub struct MixResult {
    /// Voice input path
    pub voice: String,
    /// Music input path
    pub music: String,
    /// Output path
    pub out: String,
    /// BLAKE3 hash of the PCM payload
    pub pcm_hash: String,
    /// BLAKE3 hash of the config file (if one was given)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
    /// What the pipeline did
    pub report: MixReport,
}

impl MixOutput {
    /// Creates a successful mix output.
    pub fn success(result: MixResult, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed mix output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }
}

/// JSON output for the `analyze` command.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeOutput {
    /// Whether analysis succeeded
    pub success: bool,
    /// Errors encountered during analysis
    pub errors: Vec<JsonError>,
    /// Analysis result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalyzeResult>,
}

/// Analysis result details.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResult {
    /// Input file path
    pub input: String,
    /// BLAKE3 hash of the input file
    pub input_hash: String,
    /// Sample rate of the file
    pub sample_rate: u32,
    /// Channel count of the file
    pub channels: usize,
    /// Length in seconds
    pub seconds: f64,
    /// Band shares and summary indices
    pub bands: BandEnergy,
}

impl AnalyzeOutput {
    /// Creates a successful analyze output.
    pub fn success(result: AnalyzeResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed analyze output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// JSON output for `config validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateOutput {
    /// Whether the config is valid
    pub success: bool,
    /// Validation errors
    pub errors: Vec<JsonError>,
    /// Validation warnings
    pub warnings: Vec<JsonWarning>,
    /// BLAKE3 hash of the config file (if it could be read)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
}
