//! Decibel conversions.

/// Smallest magnitude an envelope may take, keeping dB conversion finite.
pub const ENV_FLOOR: f64 = 1e-6;

/// Converts linear amplitude to decibels.
///
/// Values at or below [`ENV_FLOOR`] are treated as the floor (-120 dB).
#[inline]
pub fn amp_to_db(amp: f64) -> f64 {
    20.0 * amp.max(ENV_FLOOR).log10()
}

/// Converts decibels to linear amplitude.
#[inline]
pub fn db_to_amp(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}
