//! Dynamics parameters: sidechain ducking, voice gate, and mid-band dip.

use serde::{Deserialize, Serialize};

/// Sidechain compressor settings driving the music duck.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DuckParams {
    /// Voice level above which the music is reduced (dBFS).
    pub threshold_db: f64,
    /// Compression ratio (1 = no reduction).
    pub ratio: f64,
    /// Attack envelope window in milliseconds.
    pub attack_ms: f64,
    /// Release smoothing window in milliseconds.
    pub release_ms: f64,
}

impl Default for DuckParams {
    fn default() -> Self {
        Self {
            threshold_db: -32.0,
            ratio: 6.0,
            attack_ms: 50.0,
            release_ms: 180.0,
        }
    }
}

/// Downward noise gate applied to the voice between utterances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateParams {
    /// Whether the gate runs at all.
    pub enable: bool,
    /// Level below which the voice is attenuated (dBFS).
    pub threshold_db: f64,
    /// Expansion ratio applied to the shortfall below threshold.
    pub ratio: f64,
    /// Maximum attenuation in dB (non-positive).
    pub floor_db: f64,
    /// Detector window in milliseconds.
    pub window_ms: f64,
}

impl Default for GateParams {
    fn default() -> Self {
        Self {
            enable: true,
            threshold_db: -50.0,
            ratio: 1.5,
            floor_db: -12.0,
            window_ms: 30.0,
        }
    }
}

/// Extra duck of the speech-fundamental band of the music.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultibandParams {
    /// Whether the mid-band dip runs.
    pub enable: bool,
    /// Center of the isolated band in Hz.
    pub center_hz: f64,
    /// Bandpass Q.
    pub q: f64,
    /// Dip applied when the voice is 20 dB or more above threshold.
    pub max_dip_db: f64,
}

impl Default for MultibandParams {
    fn default() -> Self {
        Self {
            enable: true,
            center_hz: 400.0,
            q: 1.0,
            max_dip_db: 4.0,
        }
    }
}

impl MultibandParams {
    /// True when the stage would change the signal.
    pub fn is_active(&self) -> bool {
        self.enable && self.max_dip_db > 0.0
    }
}
