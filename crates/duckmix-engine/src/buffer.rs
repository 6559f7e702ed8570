//! Planar floating-point audio buffer.

use crate::error::{MixError, MixResult};

/// Maximum number of channels a buffer may carry.
pub const MAX_CHANNELS: usize = 2;

/// A mono or stereo block of `f64` samples at one sample rate.
///
/// Channels are stored planar and always have equal length. Samples nominally
/// sit in [-1.0, 1.0] but may exceed it between stages.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    channels: Vec<Vec<f64>>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Creates a buffer from planar channels, checking the invariants.
    pub fn new(channels: Vec<Vec<f64>>, sample_rate: u32) -> MixResult<Self> {
        if channels.is_empty() || channels.len() > MAX_CHANNELS {
            return Err(MixError::processing(
                "buffer",
                format!(
                    "channel count must be 1 or {}, got {}",
                    MAX_CHANNELS,
                    channels.len()
                ),
            ));
        }
        if sample_rate == 0 {
            return Err(MixError::processing("buffer", "sample rate must be positive"));
        }
        let len = channels[0].len();
        if let Some(bad) = channels.iter().find(|c| c.len() != len) {
            return Err(MixError::processing(
                "buffer",
                format!("channel lengths differ: {} vs {}", len, bad.len()),
            ));
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Creates a mono buffer.
    pub fn mono(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            channels: vec![samples],
            sample_rate,
        }
    }

    /// Creates a stereo buffer.
    pub fn stereo(left: Vec<f64>, right: Vec<f64>, sample_rate: u32) -> MixResult<Self> {
        Self::new(vec![left, right], sample_rate)
    }

    /// Builds a buffer from interleaved frames.
    pub fn from_interleaved(data: &[f64], num_channels: usize, sample_rate: u32) -> MixResult<Self> {
        if num_channels == 0 || num_channels > MAX_CHANNELS {
            return Err(MixError::processing(
                "buffer",
                format!("unsupported channel count {}", num_channels),
            ));
        }
        let frames = data.len() / num_channels;
        let mut channels = vec![Vec::with_capacity(frames); num_channels];
        for frame in data.chunks_exact(num_channels) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Self::new(channels, sample_rate)
    }

    /// Number of samples per channel.
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of channels (1 or 2).
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Returns true for a two-channel buffer.
    pub fn is_stereo(&self) -> bool {
        self.channels.len() == 2
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    /// Borrow one channel.
    ///
    /// # Panics
    /// Panics if `index >= num_channels()`.
    pub fn channel(&self, index: usize) -> &[f64] {
        &self.channels[index]
    }

    /// Borrow all channels.
    pub fn channels(&self) -> &[Vec<f64>] {
        &self.channels
    }

    /// Mutable access to channel samples. Lengths cannot change through this.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f64]> {
        self.channels.iter_mut().map(|c| c.as_mut_slice())
    }

    /// Consumes the buffer, returning its planar channels.
    pub fn into_channels(self) -> Vec<Vec<f64>> {
        self.channels
    }

    /// Produces a new buffer by transforming every channel independently.
    ///
    /// The transform must preserve length; the result is trimmed to the
    /// shortest returned channel if it does not.
    pub fn map_channels<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&[f64]) -> Vec<f64>,
    {
        let mut channels: Vec<Vec<f64>> = self.channels.iter().map(|c| f(c)).collect();
        let len = channels.iter().map(Vec::len).min().unwrap_or(0);
        for channel in channels.iter_mut() {
            channel.truncate(len);
        }
        Self {
            channels,
            sample_rate: self.sample_rate,
        }
    }

    /// Multiplies every sample by `gain`.
    pub fn scale(&mut self, gain: f64) {
        for channel in self.channels.iter_mut() {
            for sample in channel.iter_mut() {
                *sample *= gain;
            }
        }
    }

    /// Shortens every channel to at most `len` samples.
    pub fn truncate(&mut self, len: usize) {
        for channel in self.channels.iter_mut() {
            channel.truncate(len);
        }
    }

    /// Averages all channels into one.
    pub fn to_mono(&self) -> Vec<f64> {
        match self.channels.as_slice() {
            [mono] => mono.clone(),
            [left, right] => left
                .iter()
                .zip(right.iter())
                .map(|(l, r)| (l + r) * 0.5)
                .collect(),
            _ => unreachable!("channel count is checked on construction"),
        }
    }

    /// Returns a buffer with `num_channels` channels.
    ///
    /// Mono is duplicated to stereo; stereo is averaged down to mono.
    pub fn with_channel_count(&self, num_channels: usize) -> MixResult<Self> {
        match (self.num_channels(), num_channels) {
            (a, b) if a == b => Ok(self.clone()),
            (1, 2) => Self::stereo(
                self.channels[0].clone(),
                self.channels[0].clone(),
                self.sample_rate,
            ),
            (2, 1) => Ok(Self::mono(self.to_mono(), self.sample_rate)),
            (_, n) => Err(MixError::processing(
                "buffer",
                format!("cannot convert to {} channels", n),
            )),
        }
    }

    /// Creates interleaved frames.
    pub fn interleave(&self) -> Vec<f64> {
        let mut output = Vec::with_capacity(self.len() * self.num_channels());
        for i in 0..self.len() {
            for channel in &self.channels {
                output.push(channel[i]);
            }
        }
        output
    }

    /// Largest absolute sample value across all channels.
    pub fn peak(&self) -> f64 {
        self.channels
            .iter()
            .flat_map(|c| c.iter())
            .map(|s| s.abs())
            .fold(0.0_f64, |a, b| a.max(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_rejects_unequal_channels() {
        let result = AudioBuffer::new(vec![vec![0.0; 4], vec![0.0; 3]], 48000);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_bad_channel_counts() {
        assert!(AudioBuffer::new(vec![], 48000).is_err());
        assert!(AudioBuffer::new(vec![vec![0.0]; 3], 48000).is_err());
        assert!(AudioBuffer::new(vec![vec![0.0]], 0).is_err());
    }

    #[test]
    fn test_from_interleaved_splits_frames() {
        let buffer = AudioBuffer::from_interleaved(&[0.1, -0.1, 0.2, -0.2], 2, 44100).unwrap();
        assert_eq!(buffer.num_channels(), 2);
        assert_eq!(buffer.channel(0), &[0.1, 0.2]);
        assert_eq!(buffer.channel(1), &[-0.1, -0.2]);
        assert_eq!(buffer.interleave(), vec![0.1, -0.1, 0.2, -0.2]);
    }

    #[test]
    fn test_to_mono_averages() {
        let buffer = AudioBuffer::stereo(vec![1.0, 0.0], vec![0.0, -1.0], 48000).unwrap();
        assert_eq!(buffer.to_mono(), vec![0.5, -0.5]);
    }

    #[test]
    fn test_with_channel_count_duplicates_mono() {
        let buffer = AudioBuffer::mono(vec![0.25, -0.5], 48000);
        let stereo = buffer.with_channel_count(2).unwrap();
        assert_eq!(stereo.channel(0), stereo.channel(1));
        assert_eq!(stereo.channel(0), &[0.25, -0.5]);
    }

    #[test]
    fn test_peak_and_scale() {
        let mut buffer = AudioBuffer::stereo(vec![0.2, -0.8], vec![0.4, 0.1], 48000).unwrap();
        assert_eq!(buffer.peak(), 0.8);
        buffer.scale(0.5);
        assert_eq!(buffer.peak(), 0.4);
    }

    #[test]
    fn test_truncate_keeps_channels_equal() {
        let mut buffer = AudioBuffer::stereo(vec![0.0; 10], vec![0.0; 10], 48000).unwrap();
        buffer.truncate(4);
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.channel(1).len(), 4);
        buffer.truncate(100);
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_duration() {
        let buffer = AudioBuffer::mono(vec![0.0; 24000], 48000);
        assert_eq!(buffer.duration_seconds(), 0.5);
    }
}
