//! Deterministic 16-bit PCM WAV writing.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{MixError, MixResult};

use super::format::{WavFormat, HEADER_LEN};
use super::result::WavResult;

/// Largest PCM payload a RIFF header can describe.
pub const MAX_DATA_LEN: usize = (u32::MAX - 36) as usize;

/// Converts a PCM payload length to the header's `u32` field.
///
/// Fails when the RIFF size (`36 + data_len`) would not fit in 32 bits.
pub fn checked_data_len(data_len: usize) -> io::Result<u32> {
    if data_len > MAX_DATA_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "PCM payload of {} bytes exceeds the {} byte WAV limit",
                data_len, MAX_DATA_LEN
            ),
        ));
    }
    Ok(data_len as u32)
}

/// Builds the 44-byte RIFF header for `data_len` bytes of PCM.
pub fn wav_header(format: &WavFormat, data_len: u32) -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    let fields: [&[u8]; 13] = [
        b"RIFF",
        &(36 + data_len).to_le_bytes(),
        b"WAVE",
        b"fmt ",
        &16u32.to_le_bytes(),
        &1u16.to_le_bytes(), // PCM
        &format.channels.to_le_bytes(),
        &format.sample_rate.to_le_bytes(),
        &format.byte_rate().to_le_bytes(),
        &format.block_align().to_le_bytes(),
        &format.bits_per_sample.to_le_bytes(),
        b"data",
        &data_len.to_le_bytes(),
    ];
    let mut pos = 0;
    for field in fields {
        header[pos..pos + field.len()].copy_from_slice(field);
        pos += field.len();
    }
    header
}

/// Writes a complete WAV file to a writer.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    writer.write_all(&wav_header(format, checked_data_len(pcm_data.len())?))?;
    writer.write_all(pcm_data)
}

/// Encodes a complete WAV file into a byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> io::Result<Vec<u8>> {
    let header = wav_header(format, checked_data_len(pcm_data.len())?);
    let mut buffer = Vec::with_capacity(HEADER_LEN + pcm_data.len());
    buffer.extend_from_slice(&header);
    buffer.extend_from_slice(pcm_data);
    Ok(buffer)
}

/// Serializes interleaved 16-bit samples as little-endian bytes.
pub fn pcm16_to_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Writes an encoded WAV to disk, creating parent directories.
///
/// The bytes go to a temporary file in the destination directory which is
/// then renamed over `path`, so a failed write never leaves a truncated file
/// and never clobbers an existing one.
pub fn write_wav_file(path: impl AsRef<Path>, wav: &WavResult) -> MixResult<()> {
    let path = path.as_ref();
    let fail = |e: io::Error| MixError::output(path, e.to_string());

    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(fail)?;
            parent
        }
        None => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(fail)?;
    tmp.write_all(&wav.wav_data).map_err(fail)?;
    tmp.as_file().sync_all().map_err(fail)?;
    match_permissions(&tmp, path).map_err(fail)?;
    tmp.persist(path).map_err(|e| fail(e.error))?;
    Ok(())
}

/// Gives the temp file the mode a plain create would have had.
#[cfg(unix)]
fn match_permissions(tmp: &NamedTempFile, path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = match fs::metadata(path) {
        Ok(meta) => meta.permissions(),
        Err(_) => fs::Permissions::from_mode(0o644),
    };
    tmp.as_file().set_permissions(permissions)
}

#[cfg(not(unix))]
fn match_permissions(_tmp: &NamedTempFile, _path: &Path) -> io::Result<()> {
    Ok(())
}
