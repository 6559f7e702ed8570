//! Music preprocessing: band limiting, tonal cut, fades, and static gain.

use duckmix_spec::MusicConfig;
use tracing::debug;

use crate::buffer::AudioBuffer;
use crate::filter::{apply_cascade, apply_filter};

/// Number of cascaded sections for each of the music highpass and lowpass.
pub const MUSIC_FILTER_STAGES: usize = 2;

/// Point `i` of `n` evenly spaced points from `start` to `end` inclusive.
fn linspace_at(start: f64, end: f64, n: usize, i: usize) -> f64 {
    if n < 2 {
        return start;
    }
    start + (end - start) / (n - 1) as f64 * i as f64
}

/// Applies linear fade-in and fade-out ramps in place.
///
/// Each ramp spans `floor(sample_rate * seconds)` samples; a ramp longer than
/// the buffer is cut to the buffer length (the head of the fade-in and the
/// tail of the fade-out are kept). Only the ramp points that land on the
/// buffer are computed.
pub fn apply_fade(buffer: &mut AudioBuffer, fade_in_s: f64, fade_out_s: f64) {
    let sample_rate = buffer.sample_rate() as f64;
    let len = buffer.len();
    let n_in = (sample_rate * fade_in_s).max(0.0) as usize;
    let n_out = (sample_rate * fade_out_s).max(0.0) as usize;
    let span_in = n_in.min(len);
    let span_out = n_out.min(len);

    for channel in buffer.channels_mut() {
        for (i, sample) in channel[..span_in].iter_mut().enumerate() {
            *sample *= linspace_at(0.0, 1.0, n_in, i);
        }
        let skipped = n_out - span_out;
        for (k, sample) in channel[len - span_out..].iter_mut().enumerate() {
            *sample *= linspace_at(1.0, 0.0, n_out, skipped + k);
        }
    }
}

/// Runs the full music chain: highpass x2, lowpass x2, EQ cut, fades, gain.
pub fn preprocess(music: &AudioBuffer, config: &MusicConfig) -> AudioBuffer {
    let high_passed = apply_cascade(music, &config.highpass, MUSIC_FILTER_STAGES);
    let band_limited = apply_cascade(&high_passed, &config.lowpass, MUSIC_FILTER_STAGES);
    let mut shaped = apply_filter(&band_limited, &config.eq);
    apply_fade(&mut shaped, config.fade_in_s, config.fade_out_s);
    shaped.scale(config.gain);

    debug!(
        stage = "music",
        samples = shaped.len(),
        channels = shaped.num_channels(),
        gain = config.gain,
        "music preprocessed"
    );
    shaped
}
