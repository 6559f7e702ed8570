//! Biquad filter descriptors.

use serde::{Deserialize, Serialize};

/// Butterworth Q for single second-order high/low-pass sections.
pub const BUTTERWORTH_Q: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Biquad response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Second-order highpass.
    Highpass,
    /// Second-order lowpass.
    Lowpass,
    /// Bandpass with 0 dB peak gain.
    Bandpass,
    /// Peaking (bell) equalizer.
    PeakingEq,
}

impl FilterKind {
    /// Returns the snake_case name used in JSON configs.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Highpass => "highpass",
            FilterKind::Lowpass => "lowpass",
            FilterKind::Bandpass => "bandpass",
            FilterKind::PeakingEq => "peaking_eq",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named biquad filter, resolved against a sample rate at processing time.
///
/// Descriptors carry no state; the engine designs coefficients and runs the
/// filter over a whole buffer on every application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    /// Response shape.
    pub kind: FilterKind,
    /// Cutoff (high/low-pass) or center (bandpass, EQ) frequency in Hz.
    pub frequency: f64,
    /// Quality factor.
    #[serde(default = "default_q")]
    pub q: f64,
    /// Gain in dB, used only by `peaking_eq`.
    #[serde(default)]
    pub gain_db: f64,
}

fn default_q() -> f64 {
    BUTTERWORTH_Q
}

impl FilterSpec {
    /// Butterworth highpass at `cutoff` Hz.
    pub fn highpass(cutoff: f64) -> Self {
        Self {
            kind: FilterKind::Highpass,
            frequency: cutoff,
            q: BUTTERWORTH_Q,
            gain_db: 0.0,
        }
    }

    /// Butterworth lowpass at `cutoff` Hz.
    pub fn lowpass(cutoff: f64) -> Self {
        Self {
            kind: FilterKind::Lowpass,
            frequency: cutoff,
            q: BUTTERWORTH_Q,
            gain_db: 0.0,
        }
    }

    /// Bandpass around `center` Hz.
    pub fn bandpass(center: f64, q: f64) -> Self {
        Self {
            kind: FilterKind::Bandpass,
            frequency: center,
            q,
            gain_db: 0.0,
        }
    }

    /// Peaking EQ at `center` Hz.
    pub fn peaking_eq(center: f64, q: f64, gain_db: f64) -> Self {
        Self {
            kind: FilterKind::PeakingEq,
            frequency: center,
            q,
            gain_db,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filter_spec_defaults_q_and_gain() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"kind": "highpass", "frequency": 80.0}"#).unwrap();
        assert_eq!(spec, FilterSpec::highpass(80.0));
    }

    #[test]
    fn test_filter_kind_snake_case() {
        let json = serde_json::to_string(&FilterKind::PeakingEq).unwrap();
        assert_eq!(json, "\"peaking_eq\"");
        assert_eq!(FilterKind::PeakingEq.to_string(), "peaking_eq");
    }

    #[test]
    fn test_filter_spec_rejects_unknown_fields() {
        let result: Result<FilterSpec, _> =
            serde_json::from_str(r#"{"kind": "lowpass", "frequency": 1.0, "slope": 12}"#);
        assert!(result.is_err());
    }
}
