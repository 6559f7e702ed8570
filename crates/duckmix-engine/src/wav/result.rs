//! Encoded WAV result type.

use serde::Serialize;

use crate::error::{MixError, MixResult};

use super::format::WavFormat;
use super::pcm::hash_pcm;
use super::writer::{checked_data_len, pcm16_to_bytes, write_wav_to_vec};

/// An encoded 16-bit PCM WAV file.
#[derive(Debug, Clone, Serialize)]
pub struct WavResult {
    /// Complete WAV file bytes.
    #[serde(skip)]
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples per channel.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes interleaved 16-bit samples.
    ///
    /// Fails when the payload is too large for a RIFF header.
    pub fn from_pcm16(interleaved: &[i16], channels: u16, sample_rate: u32) -> MixResult<Self> {
        let encode_err = |e: std::io::Error| MixError::processing("encode", e.to_string());
        checked_data_len(interleaved.len().saturating_mul(2)).map_err(encode_err)?;

        let pcm = pcm16_to_bytes(interleaved);
        let format = WavFormat::pcm16(channels, sample_rate);

        Ok(Self {
            wav_data: write_wav_to_vec(&format, &pcm).map_err(encode_err)?,
            pcm_hash: hash_pcm(&pcm),
            channels,
            sample_rate,
            num_samples: interleaved.len() / channels.max(1) as usize,
        })
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}
