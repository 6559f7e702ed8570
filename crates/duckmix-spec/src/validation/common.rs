//! Common numeric validation helpers.

use std::fmt;

/// Error type for common validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

fn check_finite(name: &str, value: f64) -> Result<(), CommonValidationError> {
    if !value.is_finite() {
        return Err(CommonValidationError::new(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is positive (> 0).
///
/// # Example
/// ```
/// use duckmix_spec::validation::common::validate_positive;
///
/// assert!(validate_positive("q", 0.7).is_ok());
/// assert!(validate_positive("q", 0.0).is_err());
/// ```
pub fn validate_positive(name: &str, value: f64) -> Result<(), CommonValidationError> {
    check_finite(name, value)?;
    if value <= 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is non-negative (>= 0).
///
/// # Example
/// ```
/// use duckmix_spec::validation::common::validate_non_negative;
///
/// assert!(validate_non_negative("fade_in_s", 0.0).is_ok());
/// assert!(validate_non_negative("fade_in_s", -0.1).is_err());
/// ```
pub fn validate_non_negative(name: &str, value: f64) -> Result<(), CommonValidationError> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is within a specified range [min, max].
///
/// # Example
/// ```
/// use duckmix_spec::validation::common::validate_range;
///
/// assert!(validate_range("peak_dbfs", -1.0, -60.0, 0.0).is_ok());
/// assert!(validate_range("peak_dbfs", 3.0, -60.0, 0.0).is_err());
/// ```
pub fn validate_range(
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), CommonValidationError> {
    check_finite(name, value)?;
    if value < min || value > max {
        return Err(CommonValidationError::new(format!(
            "{} must be in [{}, {}], got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

/// Validate that a value is at least `min`.
pub fn validate_at_least(name: &str, value: f64, min: f64) -> Result<(), CommonValidationError> {
    check_finite(name, value)?;
    if value < min {
        return Err(CommonValidationError::new(format!(
            "{} must be >= {}, got {}",
            name, min, value
        )));
    }
    Ok(())
}
