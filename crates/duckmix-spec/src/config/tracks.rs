//! Per-stem preprocessing settings.

use serde::{Deserialize, Serialize};

use super::dynamics::GateParams;
use super::filter::FilterSpec;

/// Narration preprocessing: rumble removal, de-essing, and gating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VoiceConfig {
    /// Highpass applied twice in cascade.
    pub highpass: FilterSpec,
    /// Narrow attenuating EQ taming sibilance.
    pub de_ess: FilterSpec,
    /// Noise gate.
    pub gate: GateParams,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            highpass: FilterSpec::highpass(80.0),
            de_ess: FilterSpec::peaking_eq(7500.0, 2.0, -3.0),
            gate: GateParams::default(),
        }
    }
}

/// Music bed preprocessing: band limiting, tonal carve, fades, and level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MusicConfig {
    /// Highpass applied twice in cascade.
    pub highpass: FilterSpec,
    /// Lowpass applied twice in cascade.
    pub lowpass: FilterSpec,
    /// Static EQ cut in the speech-intelligibility region.
    pub eq: FilterSpec,
    /// Linear fade-in length in seconds.
    pub fade_in_s: f64,
    /// Linear fade-out length in seconds.
    pub fade_out_s: f64,
    /// Static linear gain setting the music-under-voice balance.
    pub gain: f64,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            highpass: FilterSpec::highpass(70.0),
            lowpass: FilterSpec::lowpass(12000.0),
            eq: FilterSpec::peaking_eq(3000.0, 1.1, -4.0),
            fade_in_s: 0.15,
            fade_out_s: 0.25,
            gain: 0.15,
        }
    }
}
