//! duckmix Mix Configuration Library
//!
//! This crate provides the configuration types and validation for the duckmix
//! voice-over-music mixing engine. A config is a JSON document; every field is
//! optional and falls back to the defaults below.
//!
//! # Example
//!
//! ```
//! use duckmix_spec::{validate_config, MixConfig};
//!
//! let config = MixConfig::from_json(r#"{"duck": {"threshold_db": -28.0}}"#).unwrap();
//! assert_eq!(config.duck.threshold_db, -28.0);
//! assert_eq!(config.master.sample_rate, 48000);
//!
//! let result = validate_config(&config);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`config`]: `MixConfig` and its sections
//! - [`error`]: Error and warning types for validation
//! - [`validation`]: Config validation functions

pub mod config;
pub mod error;
pub mod validation;

pub use config::{
    DuckParams, FilterKind, FilterSpec, GateParams, MasterConfig, MixConfig, MultibandParams,
    MusicConfig, VoiceConfig, BUTTERWORTH_Q,
};
pub use error::{
    ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use validation::validate_config;
