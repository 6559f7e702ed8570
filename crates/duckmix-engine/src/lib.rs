//! duckmix Engine
//!
//! This crate mixes a narration stem over a music bed, ducking the music
//! whenever the voice is present, and masters the result to 16-bit PCM.
//!
//! # Overview
//!
//! Stages run in a fixed order over whole buffers:
//!
//! 1. **Resample** both stems to the target rate and **align** them to the
//!    shorter length
//! 2. **Voice** - highpass x2, de-ess EQ, optional noise gate
//! 3. **Music** - highpass x2, lowpass x2, presence cut, fades, static gain
//! 4. **Sidechain** - voice envelope drives a compressor gain curve on the music
//! 5. **Multiband** - optional extra dip of the music around 400 Hz
//! 6. **Mixer** - sum and hard clip
//! 7. **Master** - peak normalization, TPDF dither, 16-bit quantization
//!
//! # Determinism
//!
//! The only randomness is dither noise, drawn from PCG32 seeded through
//! BLAKE3 from `master.dither_seed`. The same inputs and config always produce
//! byte-identical output.
//!
//! # Example
//!
//! ```ignore
//! use duckmix_engine::{mix_files, wav::write_wav_file};
//! use duckmix_spec::MixConfig;
//!
//! let output = mix_files("voice.wav", "music.wav", &MixConfig::default())?;
//! let wav = output.to_wav()?;
//! write_wav_file("mix.wav", &wav)?;
//! println!("PCM hash: {}", wav.pcm_hash);
//! ```
//!
//! # Crate Structure
//!
//! - [`pipeline`] - Stage sequencing, [`MixOutput`] and [`MixReport`]
//! - [`buffer`] - Planar [`AudioBuffer`]
//! - [`filter`] - Biquad filter implementations
//! - [`envelope`] - Rectified moving-average envelope follower
//! - [`sidechain`] / [`multiband`] - Ducking stages
//! - [`master`] - Normalization, dither, quantization
//! - [`analysis`] - Band-energy report for music beds
//! - [`wav`] - WAV decoding and deterministic 16-bit writing

pub mod align;
pub mod analysis;
pub mod buffer;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod level;
pub mod master;
pub mod mixer;
pub mod multiband;
pub mod music;
pub mod pipeline;
pub mod resample;
pub mod rng;
pub mod sidechain;
pub mod voice;
pub mod wav;

pub use buffer::AudioBuffer;
pub use error::{MixError, MixResult};
pub use pipeline::{check_config, mix_buffers, mix_files, MixOutput, MixReport};
pub use wav::WavResult;
