//! WAV container I/O.
//!
//! Inputs are decoded with `hound` from any 8/16/24/32-bit integer or 32-bit
//! float file. Output is always 16-bit PCM with a fixed 44-byte header and no
//! metadata, so the same samples always produce the same bytes.

mod format;
mod pcm;
mod reader;
mod result;
mod writer;

#[cfg(test)]
mod tests;

pub use format::{WavFormat, HEADER_LEN};
pub use pcm::{compute_pcm_hash, extract_pcm_data, hash_pcm};
pub use reader::{decode, read_wav};
pub use result::WavResult;
pub use writer::{
    checked_data_len, pcm16_to_bytes, wav_header, write_wav, write_wav_file, write_wav_to_vec,
    MAX_DATA_LEN,
};
