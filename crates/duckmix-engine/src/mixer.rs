//! Sums the voice over the ducked music.

use tracing::debug;

use crate::align::ensure_length;
use crate::buffer::AudioBuffer;
use crate::error::{MixError, MixResult};

/// Safety ceiling applied to the raw sum.
pub const CLIP_LEVEL: f64 = 1.0;

/// Mixes `voice` onto `music` and hard-clips to [-1, 1].
///
/// The output takes the music's channel count: mono voice is duplicated onto
/// stereo music, stereo voice is averaged down for mono music.
pub fn mix(voice: &AudioBuffer, music: &AudioBuffer) -> MixResult<AudioBuffer> {
    ensure_length("mixer", music.len(), &[("voice", voice.len())])?;
    if voice.sample_rate() != music.sample_rate() {
        return Err(MixError::processing(
            "mixer",
            format!(
                "sample rates differ: voice {} Hz, music {} Hz",
                voice.sample_rate(),
                music.sample_rate()
            ),
        ));
    }

    let voice = voice.with_channel_count(music.num_channels())?;
    let channels = voice
        .channels()
        .iter()
        .zip(music.channels())
        .map(|(v, m)| {
            v.iter()
                .zip(m)
                .map(|(a, b)| (a + b).clamp(-CLIP_LEVEL, CLIP_LEVEL))
                .collect()
        })
        .collect();

    let mixed = AudioBuffer::new(channels, music.sample_rate())?;
    debug!(
        stage = "mixer",
        samples = mixed.len(),
        channels = mixed.num_channels(),
        "stems summed"
    );
    Ok(mixed)
}
