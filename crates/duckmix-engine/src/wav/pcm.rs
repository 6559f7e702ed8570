//! PCM data extraction and hashing utilities.

/// Extracts the `data` chunk payload from a WAV file buffer.
///
/// Returns `None` if the buffer is not RIFF/WAVE or has no complete data chunk.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let size_bytes: [u8; 4] = wav_data[pos + 4..pos + 8].try_into().ok()?;
        let chunk_size = u32::from_le_bytes(size_bytes) as usize;
        let body = pos + 8;

        if chunk_id == b"data" {
            return wav_data.get(body..body + chunk_size);
        }

        // chunks are word aligned
        pos = body + chunk_size + (chunk_size & 1);
    }

    None
}

/// BLAKE3 hex digest of PCM bytes.
pub fn hash_pcm(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}

/// Computes the PCM hash of a complete WAV file.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(hash_pcm)
}
