//! WAV decoding into floating-point buffers.

use std::io::Read;
use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::buffer::{AudioBuffer, MAX_CHANNELS};
use crate::error::{MixError, MixResult};

/// Loads a WAV file as the stem named `role` ("voice" or "music").
///
/// Integer PCM is divided by `2^(bits - 1)`; float PCM passes through.
pub fn read_wav(path: impl AsRef<Path>, role: &'static str) -> MixResult<AudioBuffer> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(MixError::input(role, path, "file not found"));
    }
    let reader = WavReader::open(path).map_err(|e| MixError::input(role, path, e.to_string()))?;
    decode(reader).map_err(|message| MixError::input(role, path, message))
}

/// Decodes an already opened WAV stream.
pub fn decode<R: Read>(reader: WavReader<R>) -> Result<AudioBuffer, String> {
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(format!("unsupported channel count {}", channels));
    }
    if spec.sample_rate == 0 {
        return Err("sample rate is zero".to_string());
    }

    let samples: Vec<f64> = match spec.sample_format {
        SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(format!("unsupported bit depth {}", spec.bits_per_sample));
            }
            let full_scale = (1u64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / full_scale))
                .collect::<Result<_, _>>()
                .map_err(|e| e.to_string())?
        }
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()
            .map_err(|e| e.to_string())?,
    };

    if samples.is_empty() {
        return Err("file contains no samples".to_string());
    }

    AudioBuffer::from_interleaved(&samples, channels, spec.sample_rate).map_err(|e| e.to_string())
}
