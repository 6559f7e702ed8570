//! Mix configuration.
//!
//! A [`MixConfig`] holds every tunable of one mix. It is built once per
//! invocation (defaults, then an optional JSON document, then explicit
//! overrides applied by the caller) and handed to the engine by reference.
//!
//! ## Sections
//!
//! - `master` - target rate, peak ceiling, dither
//! - `voice` - highpass, de-ess, gate
//! - `music` - band limiting, EQ, fades, static gain
//! - `duck` - sidechain compressor
//! - `multiband` - extra mid-band dip

pub mod dynamics;
pub mod filter;
pub mod tracks;

use serde::{Deserialize, Serialize};

use std::path::Path;

use crate::error::{SpecError, ValidationWarning};
use crate::validation::validate_config;

pub use dynamics::{DuckParams, GateParams, MultibandParams};
pub use filter::{FilterKind, FilterSpec, BUTTERWORTH_Q};
pub use tracks::{MusicConfig, VoiceConfig};

/// Output format and final gain staging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MasterConfig {
    /// Sample rate both stems are resampled to, in Hz.
    pub sample_rate: u32,
    /// Peak level of the normalized mix in dBFS.
    pub peak_dbfs: f64,
    /// Add TPDF dither before 16-bit quantization.
    pub dither: bool,
    /// Seed for the dither noise generator.
    pub dither_seed: u32,
}

impl Default for MasterConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            peak_dbfs: -1.0,
            dither: true,
            dither_seed: 0,
        }
    }
}

/// Every tunable of one voice-over-music mix.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MixConfig {
    /// Final gain staging and output format.
    pub master: MasterConfig,
    /// Narration preprocessing.
    pub voice: VoiceConfig,
    /// Music preprocessing.
    pub music: MusicConfig,
    /// Sidechain compressor.
    pub duck: DuckParams,
    /// Mid-band dip layered after the broadband duck.
    pub multiband: MultibandParams,
}

impl MixConfig {
    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validates the config, returning its warnings or every error found.
    pub fn validate(&self) -> Result<Vec<ValidationWarning>, SpecError> {
        validate_config(self)
            .into_result()
            .map_err(SpecError::ValidationFailed)
    }

    /// Serializes the config to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Nyquist frequency of the target sample rate.
    pub fn nyquist(&self) -> f64 {
        self.master.sample_rate as f64 / 2.0
    }
}
