//! Length alignment between the two stems.

use crate::buffer::AudioBuffer;
use crate::error::{MixError, MixResult};

/// Truncates both buffers to the shorter length. Never pads.
pub fn align_lengths(voice: &mut AudioBuffer, music: &mut AudioBuffer) -> usize {
    let len = voice.len().min(music.len());
    voice.truncate(len);
    music.truncate(len);
    len
}

/// Checks that every named length equals `expected`.
///
/// A mismatch here means an earlier stage broke the alignment contract.
pub fn ensure_length(stage: &'static str, expected: usize, lengths: &[(&str, usize)]) -> MixResult<()> {
    for &(name, len) in lengths {
        if len != expected {
            return Err(MixError::processing(
                stage,
                format!("{} has {} samples, expected {}", name, len, expected),
            ));
        }
    }
    Ok(())
}
