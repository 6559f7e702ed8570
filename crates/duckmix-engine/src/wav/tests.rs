//! Tests for the WAV module.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use super::format::WavFormat;
use super::pcm::{compute_pcm_hash, extract_pcm_data};
use super::reader::decode;
use super::result::WavResult;
use super::writer::{
    checked_data_len, pcm16_to_bytes, wav_header, write_wav, write_wav_to_vec, MAX_DATA_LEN,
};

fn hound_bytes<S: hound::Sample + Copy>(spec: WavSpec, samples: &[S]) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

fn decode_bytes(bytes: Vec<u8>) -> Result<crate::buffer::AudioBuffer, String> {
    decode(hound::WavReader::new(Cursor::new(bytes)).unwrap())
}

// =========================================================================
// Format and header
// =========================================================================

#[test]
fn test_format_derived_sizes() {
    let mono = WavFormat::pcm16(1, 44100);
    assert_eq!(mono.block_align(), 2);
    assert_eq!(mono.byte_rate(), 88200);

    let stereo = WavFormat::pcm16(2, 48000);
    assert_eq!(stereo.block_align(), 4);
    assert_eq!(stereo.byte_rate(), 192000);
}

#[test]
fn test_header_layout() {
    let header = wav_header(&WavFormat::pcm16(2, 48000), 400);
    assert_eq!(&header[0..4], b"RIFF");
    assert_eq!(u32::from_le_bytes(header[4..8].try_into().unwrap()), 436);
    assert_eq!(&header[8..16], b"WAVEfmt ");
    assert_eq!(u16::from_le_bytes([header[20], header[21]]), 1);
    assert_eq!(u16::from_le_bytes([header[22], header[23]]), 2);
    assert_eq!(u32::from_le_bytes(header[24..28].try_into().unwrap()), 48000);
    assert_eq!(u16::from_le_bytes([header[34], header[35]]), 16);
    assert_eq!(&header[36..40], b"data");
    assert_eq!(u32::from_le_bytes(header[40..44].try_into().unwrap()), 400);
}

#[test]
fn test_write_wav_matches_vec_encoding() {
    let format = WavFormat::pcm16(1, 22050);
    let pcm = pcm16_to_bytes(&[1, -1, 300]);
    let mut streamed = Vec::new();
    write_wav(&mut streamed, &format, &pcm).unwrap();
    assert_eq!(streamed, write_wav_to_vec(&format, &pcm).unwrap());
}

#[test]
fn test_data_len_limit_matches_riff_size_field() {
    assert_eq!(checked_data_len(400).unwrap(), 400);
    assert_eq!(checked_data_len(MAX_DATA_LEN).unwrap() as u64 + 36, u32::MAX as u64);

    let err = checked_data_len(MAX_DATA_LEN + 1).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert!(checked_data_len(usize::MAX).is_err());
}

#[test]
fn test_pcm16_bytes_are_little_endian() {
    assert_eq!(pcm16_to_bytes(&[0x0102, -2]), vec![0x02, 0x01, 0xFE, 0xFF]);
}

// =========================================================================
// Result and hashing
// =========================================================================

#[test]
fn test_wav_result_counts_frames() {
    let wav = WavResult::from_pcm16(&[0, 0, 1, 1, 2, 2], 2, 48000).unwrap();
    assert_eq!(wav.num_samples, 3);
    assert_eq!(wav.channels, 2);
    assert_eq!(wav.wav_data.len(), 44 + 12);
    assert!((wav.duration_seconds() - 3.0 / 48000.0).abs() < 1e-15);
}

#[test]
fn test_pcm_hash_matches_extracted_payload() {
    let wav = WavResult::from_pcm16(&[5, -5, 1000, -1000], 1, 44100).unwrap();
    assert_eq!(extract_pcm_data(&wav.wav_data).unwrap().len(), 8);
    assert_eq!(compute_pcm_hash(&wav.wav_data).unwrap(), wav.pcm_hash);
}

#[test]
fn test_pcm_hash_differs_for_different_samples() {
    let a = WavResult::from_pcm16(&[1, 2, 3], 1, 48000).unwrap();
    let b = WavResult::from_pcm16(&[1, 2, 4], 1, 48000).unwrap();
    assert_ne!(a.pcm_hash, b.pcm_hash);
}

#[test]
fn test_encoding_is_deterministic() {
    let a = WavResult::from_pcm16(&[7; 64], 2, 48000).unwrap();
    let b = WavResult::from_pcm16(&[7; 64], 2, 48000).unwrap();
    assert_eq!(a.wav_data, b.wav_data);
}

#[test]
fn test_extract_rejects_non_wav() {
    assert!(extract_pcm_data(b"not a wav file at all, definitely not").is_none());
    assert!(extract_pcm_data(&[]).is_none());
}

#[test]
fn test_extract_skips_unknown_chunks() {
    let mut data = Vec::new();
    data.extend_from_slice(b"RIFF\0\0\0\0WAVE");
    data.extend_from_slice(b"LIST");
    data.extend_from_slice(&3u32.to_le_bytes());
    data.extend_from_slice(&[1, 2, 3, 0]); // odd chunk plus pad byte
    data.extend_from_slice(b"data");
    data.extend_from_slice(&2u32.to_le_bytes());
    data.extend_from_slice(&[9, 9]);
    assert_eq!(extract_pcm_data(&data), Some(&[9u8, 9][..]));
}

// =========================================================================
// Decoding
// =========================================================================

#[test]
fn test_decode_int16_scales_by_full_scale() {
    let spec = WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let buffer = decode_bytes(hound_bytes(spec, &[16384i16, -32768, 0])).unwrap();
    assert_eq!(buffer.sample_rate(), 16000);
    assert_eq!(buffer.channel(0), &[0.5, -1.0, 0.0]);
}

#[test]
fn test_decode_int24_stereo() {
    let spec = WavSpec {
        channels: 2,
        sample_rate: 48000,
        bits_per_sample: 24,
        sample_format: SampleFormat::Int,
    };
    let buffer = decode_bytes(hound_bytes(spec, &[4_194_304i32, -4_194_304])).unwrap();
    assert_eq!(buffer.num_channels(), 2);
    assert_eq!(buffer.channel(0), &[0.5]);
    assert_eq!(buffer.channel(1), &[-0.5]);
}

#[test]
fn test_decode_float_passes_through() {
    let spec = WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let buffer = decode_bytes(hound_bytes(spec, &[0.25f32, -1.5])).unwrap();
    assert_eq!(buffer.channel(0), &[0.25, -1.5]);
}

#[test]
fn test_decode_rejects_many_channels() {
    let spec = WavSpec {
        channels: 3,
        sample_rate: 48000,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let err = decode_bytes(hound_bytes(spec, &[0i16; 6])).unwrap_err();
    assert!(err.contains("channel count 3"));
}

#[test]
fn test_decode_rejects_empty_file() {
    let spec = WavSpec {
        channels: 1,
        sample_rate: 48000,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let err = decode_bytes(hound_bytes::<i16>(spec, &[])).unwrap_err();
    assert!(err.contains("no samples"));
}

#[test]
fn test_written_output_decodes_back() {
    let wav = WavResult::from_pcm16(&[16384, -16384, 0, 32767], 2, 48000).unwrap();
    let buffer = decode_bytes(wav.wav_data.clone()).unwrap();
    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.channel(0), &[0.5, 0.0]);
    assert_eq!(buffer.channel(1), &[-0.5, 32767.0 / 32768.0]);
}
