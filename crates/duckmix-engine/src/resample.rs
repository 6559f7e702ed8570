//! Band-limited sample rate conversion.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use tracing::debug;

use crate::buffer::AudioBuffer;
use crate::envelope::fit_length;
use crate::error::{MixError, MixResult};

/// Upper bound on flush calls while draining the resampler tail.
const MAX_FLUSHES: usize = 16;

/// Number of output samples for `len` input samples: `ceil(len * target / source)`.
pub fn output_len(len: usize, source_rate: u32, target_rate: u32) -> usize {
    let numerator = len as u64 * target_rate as u64;
    numerator.div_ceil(source_rate as u64) as usize
}

fn sinc_params(ratio: f64) -> SincInterpolationParameters {
    let (sinc_len, interpolation, oversampling_factor) = if ratio >= 1.5 || ratio <= 0.5 {
        (512, SincInterpolationType::Cubic, 512)
    } else {
        (256, SincInterpolationType::Cubic, 256)
    };
    SincInterpolationParameters {
        sinc_len,
        f_cutoff: 0.95,
        interpolation,
        oversampling_factor,
        window: WindowFunction::BlackmanHarris2,
    }
}

/// Resamples `buffer` to `target_rate`.
///
/// A buffer already at the target rate is returned unchanged. Otherwise the
/// whole buffer is processed as one chunk, the filter delay is removed, and
/// the result is trimmed or padded to `ceil(len * target / source)`.
pub fn resample(buffer: &AudioBuffer, target_rate: u32) -> MixResult<AudioBuffer> {
    let source_rate = buffer.sample_rate();
    if source_rate == target_rate {
        return Ok(buffer.clone());
    }

    let ratio = target_rate as f64 / source_rate as f64;
    let expected = output_len(buffer.len(), source_rate, target_rate);
    if buffer.is_empty() {
        return AudioBuffer::new(vec![Vec::new(); buffer.num_channels()], target_rate);
    }

    let to_err = |e: &dyn std::fmt::Display| MixError::processing("resample", e.to_string());

    let mut resampler = SincFixedIn::<f64>::new(
        ratio,
        1.0,
        sinc_params(ratio),
        buffer.len(),
        buffer.num_channels(),
    )
    .map_err(|e| to_err(&e))?;

    let delay = resampler.output_delay();
    let wanted = delay + expected;

    let mut collected: Vec<Vec<f64>> = resampler
        .process(buffer.channels(), None)
        .map_err(|e| to_err(&e))?;

    let mut flushes = 0;
    while collected[0].len() < wanted && flushes < MAX_FLUSHES {
        let tail = resampler
            .process_partial(None::<&[Vec<f64>]>, None)
            .map_err(|e| to_err(&e))?;
        for (channel, more) in collected.iter_mut().zip(tail) {
            channel.extend(more);
        }
        flushes += 1;
    }

    let channels: Vec<Vec<f64>> = collected
        .into_iter()
        .map(|channel| {
            let trimmed: Vec<f64> = channel.into_iter().skip(delay).collect();
            fit_length(trimmed, expected)
        })
        .collect();

    debug!(
        stage = "resample",
        from = source_rate,
        to = target_rate,
        samples_in = buffer.len(),
        samples_out = expected,
        "resampled"
    );

    AudioBuffer::new(channels, target_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(freq: f64, sample_rate: u32, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 0.5 * (2.0 * PI * freq * i as f64 / sample_rate as f64).sin())
            .collect()
    }

    #[test]
    fn test_same_rate_is_identity() {
        let buffer = AudioBuffer::mono(tone(440.0, 48000, 1000), 48000);
        assert_eq!(resample(&buffer, 48000).unwrap(), buffer);
    }

    #[test]
    fn test_output_len_rounds_up() {
        assert_eq!(output_len(44100, 44100, 48000), 48000);
        assert_eq!(output_len(3, 24000, 48000), 6);
        assert_eq!(output_len(5, 48000, 24000), 3);
        assert_eq!(output_len(10, 48000, 44100), 10);
    }

    #[test]
    fn test_upsample_length_and_rate() {
        let buffer = AudioBuffer::stereo(
            tone(440.0, 44100, 44100),
            tone(660.0, 44100, 44100),
            44100,
        )
        .unwrap();
        let out = resample(&buffer, 48000).unwrap();
        assert_eq!(out.sample_rate(), 48000);
        assert_eq!(out.len(), 48000);
        assert_eq!(out.num_channels(), 2);
    }

    #[test]
    fn test_downsample_preserves_tone_level() {
        let buffer = AudioBuffer::mono(tone(1000.0, 48000, 48000), 48000);
        let out = resample(&buffer, 24000).unwrap();
        assert_eq!(out.len(), 24000);
        let middle = &out.channel(0)[6000..18000];
        let rms = (middle.iter().map(|s| s * s).sum::<f64>() / middle.len() as f64).sqrt();
        assert!((rms - 0.5 / 2.0_f64.sqrt()).abs() < 0.01, "rms was {rms}");
    }

    #[test]
    fn test_delay_is_compensated() {
        // A 1 kHz tone resampled 48k -> 96k should stay in phase with the source
        let source = tone(1000.0, 48000, 4800);
        let out = resample(&AudioBuffer::mono(source.clone(), 48000), 96000).unwrap();
        for i in 1000..1100 {
            assert!((out.channel(0)[2 * i] - source[i]).abs() < 0.05);
        }
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = AudioBuffer::mono(Vec::new(), 44100);
        let out = resample(&buffer, 48000).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.sample_rate(), 48000);
    }
}
