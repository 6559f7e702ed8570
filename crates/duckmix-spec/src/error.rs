//! Error types for mix configuration loading and validation.

use thiserror::Error;

/// Error codes for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Master section (E001-E009)
    /// E001: Target sample rate out of supported range
    InvalidSampleRate,
    /// E002: Peak target outside [-60, 0] dBFS
    InvalidPeakTarget,

    // Filters (E010-E019)
    /// E010: Filter frequency not in (0, nyquist)
    InvalidFrequency,
    /// E011: Filter Q not positive
    InvalidQ,
    /// E012: Filter gain not finite
    InvalidFilterGain,
    /// E013: Filter kind not allowed in this slot
    FilterKindMismatch,

    // Dynamics (E020-E029)
    /// E020: Compressor or gate ratio below 1
    InvalidRatio,
    /// E021: Window, attack, or release time not positive
    InvalidTimeConstant,
    /// E022: Gate floor above 0 dB
    InvalidGateFloor,
    /// E023: Threshold not finite or above 0 dBFS
    InvalidThreshold,
    /// E024: Multiband maximum dip negative
    InvalidDip,

    // Levels and envelopes (E030-E039)
    /// E030: Music gain negative or not finite
    InvalidGain,
    /// E031: Fade duration negative or not finite
    InvalidFade,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidSampleRate => "E001",
            ErrorCode::InvalidPeakTarget => "E002",
            ErrorCode::InvalidFrequency => "E010",
            ErrorCode::InvalidQ => "E011",
            ErrorCode::InvalidFilterGain => "E012",
            ErrorCode::FilterKindMismatch => "E013",
            ErrorCode::InvalidRatio => "E020",
            ErrorCode::InvalidTimeConstant => "E021",
            ErrorCode::InvalidGateFloor => "E022",
            ErrorCode::InvalidThreshold => "E023",
            ErrorCode::InvalidDip => "E024",
            ErrorCode::InvalidGain => "E030",
            ErrorCode::InvalidFade => "E031",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Music gain above unity boosts the bed
    MusicGainBoost,
    /// W002: Duck ratio of 1 never reduces the music
    DuckingInactive,
    /// W003: Dither disabled before 16-bit quantization
    DitherDisabled,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::MusicGainBoost => "W001",
            WarningCode::DuckingInactive => "W002",
            WarningCode::DitherDisabled => "W003",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "duck.ratio").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the field the warning is about.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for configuration operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Validation failed with one or more errors.
    #[error("config validation failed with {} error(s)", .0.len())]
    ValidationFailed(Vec<ValidationError>),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of configuration validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
